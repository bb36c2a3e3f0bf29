use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::ModuleStatus;

/// Work submission as it arrives from a freelancer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotInput {
    pub module_id: String,
    pub freelancer_id: String,
    pub work_summary: String,
    pub structured_progress: Value,
    pub file_references: Vec<String>,
}

/// Candidate record handed to the store: version attached, identity and
/// creation timestamp still unassigned (the store owns those).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSnapshot {
    pub module_id: String,
    pub freelancer_id: String,
    pub version_no: u32,
    pub work_summary: String,
    pub structured_progress: Value,
    pub file_references: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub id: String,
    pub module_id: String,
    pub freelancer_id: String,
    pub version_no: u32,
    pub work_summary: String,
    pub structured_progress: Value,
    pub file_references: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Persistence seam for versioned snapshots.
///
/// Versioning here is read-then-write and the engine takes no lock, so two
/// concurrent submissions for one module can compute the same next version.
/// Implementations MUST enforce uniqueness of (module_id, version_no) — a
/// unique constraint plus retry-on-conflict is the expected shape. Different
/// modules never contend.
pub trait SnapshotStore {
    type Error;

    /// Highest version persisted for the module; 0 when none exists yet.
    fn latest_version(&self, module_id: &str) -> Result<u32, Self::Error>;
    fn persist(&mut self, snapshot: NewSnapshot) -> Result<SnapshotRecord, Self::Error>;
    fn set_module_status(
        &mut self,
        module_id: &str,
        status: ModuleStatus,
    ) -> Result<(), Self::Error>;
}

/// Version and persist one submission, then move the module to handoff.
///
/// The status update runs unconditionally once the snapshot is durable. A
/// store failure at any step aborts the whole operation; a record that was
/// never persisted is never returned.
pub fn create_snapshot<S: SnapshotStore>(
    input: SnapshotInput,
    store: &mut S,
) -> Result<SnapshotRecord, S::Error> {
    let latest = store.latest_version(&input.module_id)?;

    let record = store.persist(NewSnapshot {
        module_id: input.module_id,
        freelancer_id: input.freelancer_id,
        version_no: latest + 1,
        work_summary: input.work_summary,
        structured_progress: input.structured_progress,
        file_references: input.file_references,
    })?;

    store.set_module_status(&record.module_id, ModuleStatus::Handoff)?;

    info!(
        module_id = %record.module_id,
        version_no = record.version_no,
        "snapshot recorded, module moved to handoff"
    );

    Ok(record)
}

pub const NO_PRIOR_WORK_SUMMARY: &str = "No prior work exists for this module.";

/// Summarize the latest snapshot for the next person picking the module up.
/// Both the lookup and the summarizer are injected; their failures propagate.
pub fn build_handoff_summary<E>(
    module_id: &str,
    fetch_latest: impl FnOnce(&str) -> Result<Option<SnapshotRecord>, E>,
    summarize: impl FnOnce(&SnapshotRecord) -> Result<String, E>,
) -> Result<String, E> {
    match fetch_latest(module_id)? {
        None => Ok(NO_PRIOR_WORK_SUMMARY.to_string()),
        Some(latest) => summarize(&latest),
    }
}
