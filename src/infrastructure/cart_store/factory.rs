//! Cart store factory for runtime backend selection

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::cart::CartStore;
use crate::domain::DomainError;

use super::in_memory::{InMemoryCartStore, InMemoryCartStoreConfig};
use super::redis::{RedisCartStore, RedisCartStoreConfig};

/// Supported cart store backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartStoreBackend {
    /// In-memory store using moka
    #[default]
    InMemory,
    /// Redis hashes
    Redis,
}

impl std::fmt::Display for CartStoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartStoreBackend::InMemory => write!(f, "in_memory"),
            CartStoreBackend::Redis => write!(f, "redis"),
        }
    }
}

impl std::str::FromStr for CartStoreBackend {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(CartStoreBackend::InMemory),
            "redis" => Ok(CartStoreBackend::Redis),
            _ => Err(DomainError::configuration(format!(
                "Unknown cart store backend: {}. Valid backends: in_memory, redis",
                s
            ))),
        }
    }
}

/// Configuration for the cart store factory
#[derive(Debug, Clone, Default)]
pub struct CartStoreConfig {
    pub backend: CartStoreBackend,
    /// Redis URL (required for the Redis backend)
    pub redis_url: Option<String>,
    pub connection_timeout: Option<Duration>,
    /// Maximum number of carts (in-memory only)
    pub max_capacity: Option<u64>,
}

impl CartStoreConfig {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn redis(url: impl Into<String>) -> Self {
        Self {
            backend: CartStoreBackend::Redis,
            redis_url: Some(url.into()),
            ..Default::default()
        }
    }
}

/// Creates the configured cart store
pub async fn create_cart_store(config: &CartStoreConfig) -> Result<Arc<dyn CartStore>, DomainError> {
    match config.backend {
        CartStoreBackend::InMemory => {
            let mut in_memory_config = InMemoryCartStoreConfig::default();

            if let Some(capacity) = config.max_capacity {
                in_memory_config = in_memory_config.with_max_capacity(capacity);
            }

            Ok(Arc::new(InMemoryCartStore::with_config(in_memory_config)))
        }
        CartStoreBackend::Redis => {
            let url = config
                .redis_url
                .clone()
                .filter(|url| !url.trim().is_empty())
                .ok_or_else(|| {
                    DomainError::configuration("Redis URL is required for the redis cart store")
                })?;

            let mut redis_config = RedisCartStoreConfig::new(url);

            if let Some(timeout) = config.connection_timeout {
                redis_config = redis_config.with_connection_timeout(timeout);
            }

            Ok(Arc::new(RedisCartStore::new(redis_config).await?))
        }
    }
}
