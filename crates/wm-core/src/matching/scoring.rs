use serde::{Deserialize, Serialize};

use super::similarity::cosine_similarity;
use crate::{FreelancerProfile, ProjectModule};

/// Clamp ranges applied to the raw profile scores before they enter the
/// composite. Profiles arrive unclamped from upstream, so the engine bounds
/// them here rather than trusting the source.
#[derive(Debug, Clone, Copy)]
pub struct MatchBounds {
    pub reliability_min: f64,
    pub reliability_max: f64,
    pub availability_min: f64,
    pub availability_max: f64,
}

pub const DEFAULT_MATCH_BOUNDS: MatchBounds = MatchBounds {
    reliability_min: 0.5,
    reliability_max: 1.5,
    availability_min: 0.3,
    availability_max: 1.2,
};

impl Default for MatchBounds {
    fn default() -> Self {
        DEFAULT_MATCH_BOUNDS
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub freelancer_id: String,
    pub similarity: f64,
    pub reliability_multiplier: f64,
    pub availability_multiplier: f64,
    /// similarity x reliability x availability.
    pub score: f64,
}

pub fn score_freelancer_for_module(
    module: &ProjectModule,
    freelancer: &FreelancerProfile,
) -> MatchResult {
    score_with_bounds(module, freelancer, &DEFAULT_MATCH_BOUNDS)
}

pub fn score_with_bounds(
    module: &ProjectModule,
    freelancer: &FreelancerProfile,
    bounds: &MatchBounds,
) -> MatchResult {
    let similarity = cosine_similarity(&freelancer.skill_vector, &module.module_vector);
    let reliability_multiplier = freelancer
        .reliability_score
        .clamp(bounds.reliability_min, bounds.reliability_max);
    let availability_multiplier = freelancer
        .availability_score
        .clamp(bounds.availability_min, bounds.availability_max);
    let score = similarity * reliability_multiplier * availability_multiplier;

    MatchResult {
        freelancer_id: freelancer.id.clone(),
        similarity,
        reliability_multiplier,
        availability_multiplier,
        score,
    }
}
