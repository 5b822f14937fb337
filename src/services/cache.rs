use async_trait::async_trait;
use crate::models::Profile;
use crate::services::gateway::{GatewayError, ProfileGateway};
use std::sync::Arc;
use std::time::Duration;

/// Caching decorator over any profile gateway
///
/// Profile lookups and the full pool listing are held in an in-process TTL
/// cache. Only successful lookups of existing profiles are cached; misses
/// and errors always go back to the inner gateway.
pub struct CachedGateway<G> {
    inner: G,
    profiles: moka::future::Cache<String, Profile>,
    pool: moka::future::Cache<String, Arc<Vec<Profile>>>,
}

impl<G: ProfileGateway> CachedGateway<G> {
    /// Wrap a gateway with a cache of `max_entries` profiles living `ttl_secs`
    pub fn new(inner: G, max_entries: u64, ttl_secs: u64) -> Self {
        let ttl = Duration::from_secs(ttl_secs);

        let profiles = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(ttl)
            .build();

        let pool = moka::future::CacheBuilder::new(1)
            .time_to_live(ttl)
            .build();

        Self { inner, profiles, pool }
    }

    /// Drop one cached profile and the cached listing
    pub async fn invalidate(&self, user_id: &str) {
        self.profiles.invalidate(&CacheKey::profile(user_id)).await;
        self.pool.invalidate(&CacheKey::pool()).await;
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }
}

#[async_trait]
impl<G: ProfileGateway> ProfileGateway for CachedGateway<G> {
    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, GatewayError> {
        let key = CacheKey::profile(user_id);

        if let Some(profile) = self.profiles.get(&key).await {
            tracing::trace!("Cache hit: {}", key);
            return Ok(Some(profile));
        }

        tracing::trace!("Cache miss: {}", key);
        let profile = self.inner.get_profile(user_id).await?;

        if let Some(profile) = &profile {
            self.profiles.insert(key, profile.clone()).await;
        }

        Ok(profile)
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, GatewayError> {
        let key = CacheKey::pool();

        if let Some(pool) = self.pool.get(&key).await {
            tracing::trace!("Cache hit: {}", key);
            return Ok(pool.as_ref().clone());
        }

        tracing::trace!("Cache miss: {}", key);
        let pool = self.inner.list_profiles().await?;
        self.pool.insert(key, Arc::new(pool.clone())).await;

        Ok(pool)
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a single profile
    pub fn profile(user_id: &str) -> String {
        format!("profile:{}", user_id)
    }

    /// Build the cache key for the full candidate pool
    pub fn pool() -> String {
        "pool:all".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::InMemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls through to an in-memory store
    struct CountingGateway {
        store: InMemoryStore,
        lookups: AtomicUsize,
        listings: AtomicUsize,
    }

    #[async_trait]
    impl ProfileGateway for CountingGateway {
        async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, GatewayError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.store.get_profile(user_id).await
        }

        async fn list_profiles(&self) -> Result<Vec<Profile>, GatewayError> {
            self.listings.fetch_add(1, Ordering::SeqCst);
            self.store.list_profiles().await
        }
    }

    fn counting(profiles: Vec<Profile>) -> CountingGateway {
        CountingGateway {
            store: InMemoryStore::new(profiles),
            lookups: AtomicUsize::new(0),
            listings: AtomicUsize::new(0),
        }
    }

    #[tokio::test]
    async fn test_profile_lookups_are_cached() {
        let cached = CachedGateway::new(
            counting(vec![Profile::new("a", 25, "US", "NY", &["Art"])]),
            100,
            60,
        );

        cached.get_profile("a").await.unwrap();
        cached.get_profile("a").await.unwrap();

        assert_eq!(cached.inner().lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_profiles_are_not_cached() {
        let cached = CachedGateway::new(counting(vec![]), 100, 60);

        assert!(cached.get_profile("ghost").await.unwrap().is_none());
        assert!(cached.get_profile("ghost").await.unwrap().is_none());

        assert_eq!(cached.inner().lookups.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_refetches_pool() {
        let cached = CachedGateway::new(
            counting(vec![Profile::new("a", 25, "US", "NY", &["Art"])]),
            100,
            60,
        );

        cached.list_profiles().await.unwrap();
        cached.list_profiles().await.unwrap();
        assert_eq!(cached.inner().listings.load(Ordering::SeqCst), 1);

        cached.invalidate("a").await;
        cached.list_profiles().await.unwrap();
        assert_eq!(cached.inner().listings.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::profile("user123"), "profile:user123");
        assert_eq!(CacheKey::pool(), "pool:all");
    }
}
