use async_trait::async_trait;
use crate::models::{LikeEvent, Profile};
use thiserror::Error;

/// Errors raised by the profile store behind a gateway
///
/// These are never retried or reinterpreted by the ranker; they reach the
/// caller unchanged.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Read access to the profile store, owned by the surrounding application
#[async_trait]
pub trait ProfileGateway: Send + Sync {
    /// Look up one profile. `Ok(None)` means no such profile exists.
    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, GatewayError>;

    /// Every profile in the store, in the store's own order
    async fn list_profiles(&self) -> Result<Vec<Profile>, GatewayError>;
}

/// Write access for one-directional like records
#[async_trait]
pub trait LikeStore: Send + Sync {
    async fn record_like(&self, like: &LikeEvent) -> Result<(), GatewayError>;
}

#[async_trait]
impl<G: ProfileGateway + ?Sized> ProfileGateway for std::sync::Arc<G> {
    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, GatewayError> {
        (**self).get_profile(user_id).await
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, GatewayError> {
        (**self).list_profiles().await
    }
}
