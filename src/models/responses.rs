use serde::{Deserialize, Serialize};
use crate::models::domain::ScoredCandidate;

/// Response for the rank endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponse {
    pub matches: Vec<ScoredCandidate>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

/// Record like response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordLikeResponse {
    pub success: bool,
    #[serde(rename = "likeId")]
    pub like_id: String,
}
