use std::cmp::Ordering;

use tracing::debug;

use super::scoring::{score_freelancer_for_module, MatchResult};
use crate::shift::ShiftKey;
use crate::{FreelancerProfile, ProjectModule, UserRole};

/// Rank eligible freelancers for a module, best first.
///
/// Eligibility is a hard gate: the profile must have the freelancer role and
/// its specialty tags must contain the module key verbatim (case-sensitive,
/// no alias expansion). Ties keep their input order, which makes rankings
/// reproducible for equal scores.
///
/// The shift key is carried for trace context only; it never changes the
/// result set.
pub fn rank_freelancers(
    module: &ProjectModule,
    freelancers: &[FreelancerProfile],
    shift: Option<ShiftKey>,
) -> Vec<MatchResult> {
    let mut ranked: Vec<MatchResult> = freelancers
        .iter()
        .filter(|f| f.role == UserRole::Freelancer)
        .filter(|f| f.specialty_tags.iter().any(|tag| tag == &module.module_key))
        .map(|f| score_freelancer_for_module(module, f))
        .collect();

    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    debug!(
        module_id = %module.id,
        module_key = %module.module_key,
        shift = ?shift,
        pool = freelancers.len(),
        eligible = ranked.len(),
        "ranked freelancers for module"
    );

    ranked
}

/// Head of the ranking, if the module has any eligible candidate at all.
pub fn top_candidate(module: &ProjectModule, freelancers: &[FreelancerProfile]) -> Option<String> {
    rank_freelancers(module, freelancers, None)
        .into_iter()
        .next()
        .map(|result| result.freelancer_id)
}

/// Rank and hand the winner to the injected assigner.
///
/// Returns `Ok(None)` without invoking the assigner when no candidate is
/// eligible. An assigner failure propagates untouched; the ranking itself has
/// already been computed at that point and is not retried here.
pub fn auto_assign_top_candidate<E>(
    module: &ProjectModule,
    freelancers: &[FreelancerProfile],
    assign: impl FnOnce(&str, &str) -> Result<(), E>,
) -> Result<Option<MatchResult>, E> {
    let ranked = rank_freelancers(module, freelancers, None);
    let Some(top) = ranked.into_iter().next() else {
        return Ok(None);
    };

    assign(&module.id, &top.freelancer_id)?;
    Ok(Some(top))
}
