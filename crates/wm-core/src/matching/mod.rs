pub mod engine;
pub mod scoring;
pub mod similarity;

pub use engine::{auto_assign_top_candidate, rank_freelancers, top_candidate};
pub use scoring::{score_freelancer_for_module, MatchBounds, MatchResult};
pub use similarity::cosine_similarity;
