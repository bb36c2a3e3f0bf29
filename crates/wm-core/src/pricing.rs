use serde::{Deserialize, Serialize};

/// Surge never adds more than half of base, no matter how far over capacity
/// the marketplace is running.
pub const SURGE_CAP: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingInput {
    pub complexity_score: f64,
    pub base_rate: f64,
    /// Pre-computed cost components, passed through as opaque additive terms.
    pub urgency_amount: f64,
    pub resource_load_amount: f64,
    pub integration_amount: f64,
    pub active_projects: u32,
    pub capacity_threshold: u32,
}

/// Per-term quote, all amounts in the currency unit of `base_rate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    pub base: f64,
    pub urgency: f64,
    pub resource_load: f64,
    pub integration: f64,
    pub surge: f64,
    pub total: f64,
}

pub fn calculate_dynamic_price(input: &PricingInput) -> PricingBreakdown {
    let base = input.complexity_score * input.base_rate;
    let urgency = input.urgency_amount;
    let resource_load = input.resource_load_amount;
    let integration = input.integration_amount;

    let threshold = input.capacity_threshold as f64;
    let over_capacity_ratio = if threshold > 0.0 {
        ((input.active_projects as f64 - threshold) / threshold).max(0.0)
    } else {
        0.0
    };
    let surge = if over_capacity_ratio > 0.0 {
        base * over_capacity_ratio.min(SURGE_CAP)
    } else {
        0.0
    };

    let total = base + urgency + resource_load + integration + surge;

    PricingBreakdown {
        base,
        urgency,
        resource_load,
        integration,
        surge,
        total,
    }
}
