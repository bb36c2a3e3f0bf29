use serde::{Deserialize, Serialize};
use strum::AsRefStr;

/// Violations that dock a freelancer's payout. Each carries its own rate and
/// absolute cap, in wallet currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PenaltyTrigger {
    ShiftMissed,
    Inactivity,
    QualityFail,
}

pub fn compute_penalty(trigger: PenaltyTrigger, base_amount: f64) -> f64 {
    match trigger {
        PenaltyTrigger::ShiftMissed => (base_amount * 0.25).min(5000.0),
        PenaltyTrigger::Inactivity => (base_amount * 0.10).min(2500.0),
        PenaltyTrigger::QualityFail => (base_amount * 0.20).min(4000.0),
    }
}
