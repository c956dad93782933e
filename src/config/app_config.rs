use std::time::Duration;

use serde::Deserialize;

use crate::infrastructure::book::{DEFAULT_DELAY, DEFAULT_TITLE};
use crate::infrastructure::cache::ReadThroughCacheConfig;
use crate::infrastructure::observability::ObservabilityConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Settings for the slow book backend
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Simulated latency of every backend lookup
    pub delay_ms: u64,
    /// Title given to every book
    pub title: String,
}

/// Optional bounds for the book cache; unset means unbounded and non-expiring
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CacheConfig {
    pub max_capacity: Option<u64>,
    pub time_to_live_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY.as_millis() as u64,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl LookupConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl CacheConfig {
    pub fn to_cache_config(&self) -> ReadThroughCacheConfig {
        ReadThroughCacheConfig {
            max_capacity: self.max_capacity,
            time_to_live: self.time_to_live_secs.map(Duration::from_secs),
        }
    }
}

impl AppConfig {
    /// Layers `config/default`, `config/local` and `APP__*` environment variables
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with_env(config::Environment::with_prefix("APP"))
    }

    fn load_with_env(environment: config::Environment) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(environment.separator("__").try_parsing(true))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_walkthrough() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.lookup.delay(), Duration::from_secs(3));
        assert_eq!(config.lookup.title, "Some book");
        assert_eq!(config.cache.max_capacity, None);
        assert_eq!(config.cache.time_to_live_secs, None);
    }

    #[test]
    fn test_cache_config_conversion() {
        let cache = CacheConfig {
            max_capacity: Some(500),
            time_to_live_secs: Some(60),
        };
        let converted = cache.to_cache_config();

        assert_eq!(converted.max_capacity, Some(500));
        assert_eq!(converted.time_to_live, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_partial_sections_fall_back_to_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{"lookup": {"delay_ms": 10}, "logging": {"level": "debug", "format": "json"}}"#,
        )
        .unwrap();

        assert_eq!(config.lookup.delay_ms, 10);
        assert_eq!(config.lookup.title, "Some book");
        assert!(matches!(config.logging.format, LogFormat::Json));
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_env_overrides_file_values() {
        let vars: config::Map<String, String> = [
            ("APP__LOOKUP__DELAY_MS", "25"),
            ("APP__SERVER__PORT", "9090"),
            ("OTHER__LOOKUP__DELAY_MS", "1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config =
            AppConfig::load_with_env(config::Environment::with_prefix("APP").source(Some(vars)))
                .unwrap();

        assert_eq!(config.lookup.delay(), Duration::from_millis(25));
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.lookup.title, "Some book");
    }
}
