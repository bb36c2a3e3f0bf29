use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{FreelancerProfile, TaskLog};

/// Module-side facts the payout needs; the caller resolves these before
/// settling a task log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoutContext {
    pub module_weight: f64,
    pub reliability_multiplier: f64,
}

/// One settlement per task log, never mutated afterwards. Amounts are
/// unrounded; currency rounding is the boundary's concern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoutResult {
    /// Pre-quality, pre-reliability, pre-penalty amount.
    pub gross_amount: f64,
    pub payout_amount: f64,
}

pub fn calculate_payout(log: &TaskLog, context: &PayoutContext) -> PayoutResult {
    let gross_amount = context.module_weight * log.completion_percentage;
    let payout_amount = (gross_amount * log.ai_quality_score * context.reliability_multiplier
        - log.penalties)
        .max(0.0);

    PayoutResult {
        gross_amount,
        payout_amount,
    }
}

/// Settle one task log: persist the result, then push the freelancer's new
/// wallet balance. The wallet update receives an absolute balance (current
/// plus payout), not a delta, so the caller must hand in a fresh profile.
pub fn apply_payout<E>(
    log: &TaskLog,
    context: &PayoutContext,
    freelancer: &FreelancerProfile,
    persist: impl FnOnce(&PayoutResult) -> Result<(), E>,
    update_wallet: impl FnOnce(&str, f64) -> Result<(), E>,
) -> Result<PayoutResult, E> {
    let result = calculate_payout(log, context);

    persist(&result)?;
    update_wallet(&freelancer.id, freelancer.wallet_balance + result.payout_amount)?;

    info!(
        module_id = %log.module_id,
        freelancer_id = %log.freelancer_id,
        payout = result.payout_amount,
        "task log settled"
    );

    Ok(result)
}
