// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Profile, ScoredCandidate, LikeEvent, RankingOptions};
pub use requests::{RankRequest, RankQuery, RecordLikeRequest};
pub use responses::{RankResponse, HealthResponse, ErrorResponse, RecordLikeResponse};
