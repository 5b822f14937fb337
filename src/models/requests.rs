use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to rank candidates for a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(range(min = 1, max = 1000))]
    #[serde(default, alias = "top_n", rename = "topN")]
    pub top_n: Option<usize>,
}

/// Query string accepted by `GET /matches/{userId}`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankQuery {
    #[validate(range(min = 1, max = 1000))]
    #[serde(default, alias = "top_n", rename = "topN")]
    pub top_n: Option<usize>,
}

/// Request to record a like
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordLikeRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "target_user_id", rename = "targetUserId")]
    pub target_user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_request_defaults() {
        let req: RankRequest = serde_json::from_str(r#"{"userId":"abc"}"#).unwrap();
        assert_eq!(req.top_n, None);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_rank_request_rejects_zero_top_n() {
        let req: RankRequest = serde_json::from_str(r#"{"userId":"abc","topN":0}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_like_request_requires_target() {
        let req: RecordLikeRequest =
            serde_json::from_str(r#"{"userId":"a","targetUserId":""}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
