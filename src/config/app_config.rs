use serde::Deserialize;

use crate::domain::DomainError;
use crate::infrastructure::cart_store::CartStoreBackend;
use crate::infrastructure::catalog::CatalogBackend;

/// Longest accepted cart idle window (one year)
const MAX_CART_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cart: CartConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Cart lifecycle settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Idle window in seconds, refreshed on every add/update
    pub ttl_secs: u64,
    pub key_prefix: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: CartStoreBackend,
    pub redis_url: Option<String>,
    pub connection_timeout_secs: u64,
    /// Upper bound on carts held by the in-memory backend
    pub max_capacity: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub backend: CatalogBackend,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    /// JSON list of products loaded into the in-memory catalog
    pub seed_file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: u64,
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

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 3600,
            key_prefix: "cart".to_string(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: CartStoreBackend::default(),
            redis_url: None,
            connection_timeout_secs: 5,
            max_capacity: 100_000,
        }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            backend: CatalogBackend::default(),
            base_url: None,
            timeout_secs: 5,
            seed_file: None,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_expiration_hours: 24,
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

    /// Rejects settings the service cannot start with
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.cart.ttl_secs == 0 {
            return Err(DomainError::configuration("cart.ttl_secs must be greater than 0"));
        }

        if self.cart.ttl_secs > MAX_CART_TTL_SECS {
            return Err(DomainError::configuration(format!(
                "cart.ttl_secs cannot exceed {}",
                MAX_CART_TTL_SECS
            )));
        }

        if self.cart.key_prefix.trim().is_empty() {
            return Err(DomainError::configuration("cart.key_prefix cannot be empty"));
        }

        if self.store.backend == CartStoreBackend::Redis && is_blank(&self.store.redis_url) {
            return Err(DomainError::configuration(
                "store.redis_url is required for the redis backend",
            ));
        }

        if self.catalog.backend == CatalogBackend::Http && is_blank(&self.catalog.base_url) {
            return Err(DomainError::configuration(
                "catalog.base_url is required for the http catalog",
            ));
        }

        if self.catalog.timeout_secs == 0 {
            return Err(DomainError::configuration(
                "catalog.timeout_secs must be greater than 0",
            ));
        }

        if self.auth.jwt_secret.is_empty() {
            return Err(DomainError::configuration("auth.jwt_secret cannot be empty"));
        }

        Ok(())
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).is_none_or(str::is_empty)
}
