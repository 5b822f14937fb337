//! Hobby Match - candidate matching and ranking service
//!
//! Given a user's profile, finds other profiles in the same country and
//! region within a small age window and orders them by cosine similarity of
//! their declared hobbies.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{MatchRanker, RankError, rank_pool, cosine_similarity, filter_candidates};
pub use models::{Profile, ScoredCandidate, LikeEvent, RankingOptions, RankRequest, RankResponse};
pub use services::{ProfileGateway, LikeStore, GatewayError, InMemoryStore};
