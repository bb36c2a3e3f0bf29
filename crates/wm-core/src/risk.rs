use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::AsRefStr;
use tracing::info;

use crate::date::{is_past_due, minutes_since};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RiskTrigger {
    SnapshotDelay,
    ProgressLag,
    DeadlineDeviation,
}

/// Per-trigger contribution to the risk score. No partial credit: a trigger
/// either fires at its full weight or not at all.
#[derive(Debug, Clone, Copy)]
pub struct RiskWeights {
    pub snapshot_delay: f64,
    pub progress_lag: f64,
    pub deadline_deviation: f64,
}

impl RiskWeights {
    /// Uncapped sum of all trigger weights. Deliberately above 1.0; the
    /// evaluation caps the total after summing, not each trigger.
    pub fn raw_sum(&self) -> f64 {
        self.snapshot_delay + self.progress_lag + self.deadline_deviation
    }
}

pub const DEFAULT_RISK_WEIGHTS: RiskWeights = RiskWeights {
    snapshot_delay: 0.4,
    progress_lag: 0.3,
    deadline_deviation: 0.4,
};

impl Default for RiskWeights {
    fn default() -> Self {
        DEFAULT_RISK_WEIGHTS
    }
}

/// Delivery-state facts the orchestrator has gathered for one module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskInput {
    pub module_id: String,
    pub project_id: String,
    pub freelancer_id: Option<String>,
    pub last_snapshot_at: Option<DateTime<Utc>>,
    pub max_snapshot_delay_minutes: i64,
    pub progress: f64,
    pub expected_progress: f64,
    pub due_at: Option<DateTime<Utc>>,
}

/// Fresh on every call; trigger order is evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskEvaluation {
    pub score: f64,
    pub triggers: Vec<RiskTrigger>,
}

pub fn evaluate_risk(input: &RiskInput, now: DateTime<Utc>) -> RiskEvaluation {
    evaluate_risk_with_weights(input, now, &DEFAULT_RISK_WEIGHTS)
}

pub fn evaluate_risk_with_weights(
    input: &RiskInput,
    now: DateTime<Utc>,
    weights: &RiskWeights,
) -> RiskEvaluation {
    let mut triggers = Vec::new();
    let mut score = 0.0;

    let stale = match input.last_snapshot_at {
        None => true,
        Some(at) => minutes_since(at, now) > input.max_snapshot_delay_minutes,
    };
    if stale {
        triggers.push(RiskTrigger::SnapshotDelay);
        score += weights.snapshot_delay;
    }

    if input.progress < input.expected_progress {
        triggers.push(RiskTrigger::ProgressLag);
        score += weights.progress_lag;
    }

    if is_past_due(input.due_at, now) {
        triggers.push(RiskTrigger::DeadlineDeviation);
        score += weights.deadline_deviation;
    }

    RiskEvaluation {
        score: score.min(1.0),
        triggers,
    }
}

/// Default remediation threshold, overridable per deployment.
pub fn default_remediation_threshold() -> f64 {
    std::env::var("WM_RISK_THRESHOLD")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.6)
}

/// Side-effect seam for remediation. Implementations own persistence and
/// notification; the engine only decides what to call.
pub trait RiskResponder {
    type Error;

    fn log_risk(&mut self, evaluation: &RiskEvaluation) -> Result<(), Self::Error>;
    fn reassign_module(&mut self, module_id: &str) -> Result<(), Self::Error>;
    fn reduce_reliability(&mut self, freelancer_id: &str) -> Result<(), Self::Error>;
}

/// Evaluate and remediate in one pass.
///
/// The evaluation is always logged, remediated or not. Reassignment (and a
/// reliability penalty, when somebody is attached) happens only for scores
/// strictly above the threshold.
pub fn handle_risk<R: RiskResponder>(
    input: &RiskInput,
    threshold: f64,
    now: DateTime<Utc>,
    responder: &mut R,
) -> Result<RiskEvaluation, R::Error> {
    let evaluation = evaluate_risk(input, now);
    responder.log_risk(&evaluation)?;

    if evaluation.score > threshold {
        info!(
            module_id = %input.module_id,
            score = evaluation.score,
            threshold,
            triggers = ?evaluation.triggers,
            "risk above threshold, remediating"
        );
        responder.reassign_module(&input.module_id)?;
        if let Some(freelancer_id) = &input.freelancer_id {
            responder.reduce_reliability(freelancer_id)?;
        }
    }

    Ok(evaluation)
}
