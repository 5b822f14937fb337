use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::RankingOptions;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Which profile store backs the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    #[default]
    Memory,
    DocumentStore,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub backend: StoreBackend,
    /// JSON array of profile documents loaded by the memory backend
    pub seed_file: Option<String>,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub database_id: String,
    #[serde(default = "default_profiles_collection")]
    pub profiles_collection: String,
    #[serde(default = "default_likes_collection")]
    pub likes_collection: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            seed_file: None,
            endpoint: String::new(),
            api_key: String::new(),
            project_id: String::new(),
            database_id: String::new(),
            profiles_collection: default_profiles_collection(),
            likes_collection: default_likes_collection(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_profiles_collection() -> String { "profiles".to_string() }
fn default_likes_collection() -> String { "likes".to_string() }
fn default_page_size() -> usize { 100 }
fn default_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_secs: default_ttl_secs(),
            max_entries: default_max_entries(),
        }
    }
}

fn default_cache_enabled() -> bool { true }
fn default_ttl_secs() -> u64 { 300 }
fn default_max_entries() -> u64 { 10_000 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_age_tolerance")]
    pub age_tolerance: u32,
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
    #[serde(default = "default_max_top_n")]
    pub max_top_n: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            age_tolerance: default_age_tolerance(),
            default_top_n: default_top_n(),
            max_top_n: default_max_top_n(),
        }
    }
}

impl MatchingSettings {
    pub fn ranking_options(&self) -> RankingOptions {
        RankingOptions {
            age_tolerance: self.age_tolerance,
            default_top_n: self.default_top_n,
        }
    }
}

fn default_age_tolerance() -> u32 { 2 }
fn default_top_n() -> usize { 5 }
fn default_max_top_n() -> usize { 50 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration files (config/default.toml, config/local.toml)
    /// 3. Environment variables (prefixed with HOBBY_MATCH__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., HOBBY_MATCH__MATCHING__AGE_TOLERANCE -> matching.age_tolerance
            .add_source(env_source())
            .build()?;

        apply_store_overrides(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        apply_store_overrides(settings)?.try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("HOBBY_MATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Honor the conventional unprefixed store variables
/// (PROFILE_STORE_URL, PROFILE_STORE_API_KEY) used by deployments.
fn apply_store_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(endpoint) = env::var("PROFILE_STORE_URL") {
        builder = builder.set_override("store.endpoint", endpoint)?;
    }
    if let Ok(api_key) = env::var("PROFILE_STORE_API_KEY") {
        builder = builder.set_override("store.api_key", api_key)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matching() {
        let matching = MatchingSettings::default();
        assert_eq!(matching.age_tolerance, 2);
        assert_eq!(matching.default_top_n, 5);
        assert_eq!(matching.ranking_options(), RankingOptions::default());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_partial_toml() {
        let settings: Settings = toml::from_str(
            r#"
            [store]
            backend = "document_store"
            endpoint = "https://store.test/v1"

            [matching]
            age_tolerance = 3
            "#,
        )
        .unwrap();

        assert_eq!(settings.store.backend, StoreBackend::DocumentStore);
        assert_eq!(settings.store.page_size, 100);
        assert_eq!(settings.matching.age_tolerance, 3);
        assert_eq!(settings.matching.default_top_n, 5);
        assert_eq!(settings.server.port, 8080);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("hobby-match-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[server]\nport = 9090\n\n[cache]\nenabled = false\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.server.port, 9090);
        assert!(!settings.cache.enabled);
        assert_eq!(settings.store.backend, StoreBackend::Memory);
    }

    #[test]
    fn test_env_layers_over_file() {
        let path = std::env::temp_dir().join(format!("hobby-match-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "[store]\nendpoint = \"https://file.test/v1\"\n\n[matching]\nage_tolerance = 3\n",
        )
        .unwrap();

        std::env::set_var("HOBBY_MATCH__MATCHING__AGE_TOLERANCE", "7");
        std::env::set_var("PROFILE_STORE_URL", "https://env.test/v1");
        let settings = Settings::load_from(&path);
        std::env::remove_var("HOBBY_MATCH__MATCHING__AGE_TOLERANCE");
        std::env::remove_var("PROFILE_STORE_URL");
        std::fs::remove_file(&path).ok();

        let settings = settings.unwrap();
        assert_eq!(settings.matching.age_tolerance, 7);
        assert_eq!(settings.store.endpoint, "https://env.test/v1");
    }
}
