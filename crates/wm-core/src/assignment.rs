use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::matching::rank_freelancers;
use crate::shift::ShiftClock;
use crate::{FreelancerProfile, ProjectModule};

/// Primary/backup coverage proposal for one module. Pure data; the caller
/// decides whether and how to apply it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentPlan {
    pub module_id: String,
    pub primary_freelancer_id: Option<String>,
    pub backup_freelancer_id: Option<String>,
    pub shift_start: DateTime<Utc>,
    pub shift_end: DateTime<Utc>,
    /// `auto:<shift key>`, ties the plan back to the scheduling context that
    /// produced it.
    pub reason: String,
}

/// Plan coverage for a module at `now`.
///
/// An empty candidate pool is not a failure: the plan comes back with no
/// primary and the caller decides whether that blocks project creation.
/// The backup is the best-ranked candidate distinct from the primary, so
/// duplicate profile rows can never put the same person in both slots.
pub fn plan_assignments_for_module(
    module: &ProjectModule,
    freelancers: &[FreelancerProfile],
    clock: &ShiftClock,
    now: DateTime<Utc>,
) -> AssignmentPlan {
    let range = clock.resolve_range(now);
    let ranked = rank_freelancers(module, freelancers, Some(range.key));

    let primary = ranked.first().map(|r| r.freelancer_id.clone());
    let backup = match &primary {
        Some(primary_id) => ranked
            .iter()
            .skip(1)
            .find(|r| &r.freelancer_id != primary_id)
            .map(|r| r.freelancer_id.clone()),
        None => None,
    };

    info!(
        module_id = %module.id,
        shift = ?range.key,
        primary = primary.as_deref().unwrap_or("-"),
        backup = backup.as_deref().unwrap_or("-"),
        "planned module assignment"
    );

    AssignmentPlan {
        module_id: module.id.clone(),
        primary_freelancer_id: primary,
        backup_freelancer_id: backup,
        shift_start: range.start,
        shift_end: range.end,
        reason: format!("auto:{}", range.key.as_ref()),
    }
}
