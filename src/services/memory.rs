use async_trait::async_trait;
use crate::models::{LikeEvent, Profile};
use crate::services::gateway::{GatewayError, LikeStore, ProfileGateway};
use std::path::Path;
use tokio::sync::RwLock;

/// In-process profile store
///
/// Keeps profiles in insertion order so listings are stable between calls.
/// Used for local development (seeded from a JSON file) and in tests.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    profiles: RwLock<Vec<Profile>>,
    likes: RwLock<Vec<LikeEvent>>,
}

impl InMemoryStore {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self {
            profiles: RwLock::new(profiles),
            likes: RwLock::new(Vec::new()),
        }
    }

    /// Load profiles from a JSON array of store documents
    ///
    /// Documents that cannot be keyed (no `userId`) are skipped.
    pub async fn from_seed_file<P: AsRef<Path>>(path: P) -> Result<Self, GatewayError> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let documents: Vec<serde_json::Value> = serde_json::from_str(&raw)?;

        let profiles: Vec<Profile> = documents
            .into_iter()
            .filter_map(|doc| match serde_json::from_value(doc) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    tracing::warn!("Skipping seed document without usable id: {}", e);
                    None
                }
            })
            .collect();

        tracing::info!(
            "Loaded {} seed profiles from {}",
            profiles.len(),
            path.as_ref().display()
        );

        Ok(Self::new(profiles))
    }

    /// Insert a profile, replacing any existing one with the same id in place
    pub async fn upsert(&self, profile: Profile) {
        let mut profiles = self.profiles.write().await;
        match profiles.iter_mut().find(|p| p.user_id == profile.user_id) {
            Some(existing) => *existing = profile,
            None => profiles.push(profile),
        }
    }

    /// Likes recorded so far, oldest first
    pub async fn likes(&self) -> Vec<LikeEvent> {
        self.likes.read().await.clone()
    }
}

#[async_trait]
impl ProfileGateway for InMemoryStore {
    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, GatewayError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.iter().find(|p| p.user_id == user_id).cloned())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, GatewayError> {
        Ok(self.profiles.read().await.clone())
    }
}

#[async_trait]
impl LikeStore for InMemoryStore {
    async fn record_like(&self, like: &LikeEvent) -> Result<(), GatewayError> {
        self.likes.write().await.push(like.clone());
        tracing::debug!("Recorded like: {} -> {}", like.user_id, like.target_user_id);
        Ok(())
    }
}
