use std::time::Duration;

use serde::Deserialize;

use crate::domain::lookup::LookupConfig;
use crate::infrastructure::cache::{CacheConfig, CacheType};
use crate::infrastructure::services::MenuCacheConfig;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub cache: CacheSettings,
    pub menu: MenuSettings,
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

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Cache backend settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// `in_memory` or `redis`
    pub backend: String,
    pub redis_url: Option<String>,
    pub connection_timeout_ms: u64,
    /// Upper bound for one cache round trip before it counts as a miss
    pub operation_timeout_ms: u64,
    pub max_capacity: u64,
}

/// Cache settings of the food menu lookups
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MenuSettings {
    /// Key prefix of lookups by identifier; empty disables caching
    pub prefix: String,
    pub ttl_ms: u64,
    /// Key prefix of price-filtered listings; empty disables caching
    pub query_prefix: String,
    pub query_ttl_ms: u64,
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

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: CacheType::InMemory.to_string(),
            redis_url: None,
            connection_timeout_ms: 5_000,
            operation_timeout_ms: 200,
            max_capacity: 10_000,
        }
    }
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            prefix: "foodMenu:".to_string(),
            ttl_ms: 500,
            query_prefix: "foodMenu:price:".to_string(),
            query_ttl_ms: 500,
        }
    }
}

impl CacheSettings {
    /// Backend factory configuration; fails on an unknown backend name
    pub fn to_cache_config(&self) -> Result<CacheConfig, crate::domain::DomainError> {
        Ok(CacheConfig {
            cache_type: self.backend.parse()?,
            redis_url: self.redis_url.clone(),
            connection_timeout: Duration::from_millis(self.connection_timeout_ms),
            max_capacity: Some(self.max_capacity),
        })
    }

    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }
}

impl MenuSettings {
    pub fn to_menu_cache_config(&self) -> MenuCacheConfig {
        MenuCacheConfig {
            by_id: LookupConfig::new(self.prefix.clone())
                .with_ttl(Duration::from_millis(self.ttl_ms)),
            by_price: LookupConfig::new(self.query_prefix.clone())
                .with_ttl(Duration::from_millis(self.query_ttl_ms)),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
