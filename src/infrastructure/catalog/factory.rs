//! Catalog client factory for runtime backend selection

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::catalog::CatalogClient;
use crate::domain::DomainError;

use super::http::{HttpCatalogClient, HttpCatalogConfig};
use super::in_memory::InMemoryCatalog;

/// Supported catalog backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogBackend {
    /// Products held in memory, optionally seeded from a file
    #[default]
    InMemory,
    /// Remote catalog service over HTTP
    Http,
}

/// Configuration for the catalog factory
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    pub backend: CatalogBackend,
    /// Base URL (required for the HTTP backend)
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
    /// JSON seed file for the in-memory backend
    pub seed_file: Option<String>,
}

/// Creates the configured catalog client
pub fn create_catalog_client(config: &CatalogConfig) -> Result<Arc<dyn CatalogClient>, DomainError> {
    match config.backend {
        CatalogBackend::InMemory => {
            let catalog = match &config.seed_file {
                Some(path) => InMemoryCatalog::from_seed_file(path)?,
                None => InMemoryCatalog::new(),
            };

            Ok(Arc::new(catalog))
        }
        CatalogBackend::Http => {
            let base_url = config
                .base_url
                .clone()
                .filter(|url| !url.trim().is_empty())
                .ok_or_else(|| {
                    DomainError::configuration("Base URL is required for the http catalog")
                })?;

            let mut http_config = HttpCatalogConfig::new(base_url);

            if let Some(timeout) = config.timeout {
                http_config = http_config.with_timeout(timeout);
            }

            Ok(Arc::new(HttpCatalogClient::new(http_config)?))
        }
    }
}
