// Core algorithm exports
pub mod filters;
pub mod ranker;
pub mod similarity;

pub use filters::{filter_candidates, is_eligible};
pub use ranker::{rank_pool, MatchRanker, RankError, RankOutcome};
pub use similarity::{cosine_similarity, hobby_similarity};
