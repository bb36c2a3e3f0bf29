pub mod assignment;
pub mod contribution;
pub mod date;
pub mod intake;
pub mod logging;
pub mod matching;
pub mod penalty;
pub mod planner;
pub mod pricing;
pub mod risk;
pub mod shift;
pub mod snapshot;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::AsRefStr;

/// Sparse skill/requirement vector keyed by tag. Missing keys mean weight 0.
pub type FeatureVector = BTreeMap<String, f64>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UserRole {
    Client,
    #[default]
    Freelancer,
    Admin,
    System,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ModuleStatus {
    #[default]
    Queued,
    Assigned,
    InProgress,
    Handoff,
    Review,
    Completed,
    Blocked,
    Reassigned,
}

// Commonly used data rows consumed by the decision engines. These mirror what
// the persistence layer hands us; the engines never write them back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FreelancerProfile {
    pub id: String,
    pub role: UserRole,
    pub full_name: String,
    pub specialty_tags: Vec<String>,
    pub skill_vector: FeatureVector,
    pub reliability_score: f64,
    pub availability_score: f64,
    pub wallet_balance: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectModule {
    pub id: String,
    pub project_id: String,
    pub module_key: String,
    pub module_name: String,
    pub status: ModuleStatus,
    pub assigned_freelancer_id: Option<String>,
    pub module_vector: FeatureVector,
    /// Share of total project value carried by this module, in [0, 1].
    pub module_weight: f64,
    pub expected_progress_rate: f64,
    pub due_at: Option<DateTime<Utc>>,
}

/// One work submission line, immutable once written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskLog {
    pub id: String,
    pub module_id: String,
    pub freelancer_id: String,
    pub time_spent_minutes: u32,
    pub completion_percentage: f64,
    pub ai_quality_score: f64,
    pub penalties: f64,
}
