// src/config.rs
use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://en.wiktionary.org/w/api.php";
pub const DEFAULT_CACHE_PATH: &str = "etymology_cache.bin";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_USER_AGENT: &str = concat!(
    "etymology-lens/",
    env!("CARGO_PKG_VERSION"),
    " (word origin analyzer)"
);

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// MediaWiki action API endpoint.
    pub api_base: String,
    pub user_agent: String,
    pub request_timeout: Duration,
    /// Minimum spacing between outgoing requests. Zero disables throttling.
    pub min_request_interval: Duration,
    /// Where the day-scoped origin cache is persisted. `None` keeps it in memory.
    pub cache_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            min_request_interval: Duration::ZERO,
            cache_path: Some(PathBuf::from(DEFAULT_CACHE_PATH)),
        }
    }
}

impl EngineConfig {
    /// Defaults overlaid with `ETYM_API_BASE`, `ETYM_CACHE_PATH` and
    /// `ETYM_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(base) = lookup("ETYM_API_BASE") {
            if !base.starts_with("http://") && !base.starts_with("https://") {
                return Err(ConfigError::Invalid { key: "ETYM_API_BASE", value: base });
            }
            config.api_base = base;
        }
        if let Some(path) = lookup("ETYM_CACHE_PATH") {
            config.cache_path = (!path.is_empty()).then(|| PathBuf::from(path));
        }
        if let Some(secs) = lookup("ETYM_TIMEOUT_SECS") {
            let parsed = secs
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or(ConfigError::Invalid { key: "ETYM_TIMEOUT_SECS", value: secs })?;
            config.request_timeout = Duration::from_secs(parsed);
        }
        Ok(config)
    }
}
