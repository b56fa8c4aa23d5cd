//! HTTP product catalog client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use crate::domain::catalog::{CatalogClient, Product};
use crate::domain::DomainError;

const PROVIDER: &str = "catalog";

/// Configuration for the HTTP catalog client
#[derive(Debug, Clone)]
pub struct HttpCatalogConfig {
    /// Base URL of the catalog service (e.g., "http://catalog:8080")
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl HttpCatalogConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Wire shape of `GET /v1/products/sku/{sku}`
#[derive(Debug, Deserialize)]
struct ProductLookupResponse {
    product: Product,
}

/// Catalog client speaking JSON over HTTP
///
/// `404` maps to "not found"; every other non-success status, transport
/// failure or malformed body is an opaque provider error.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: Client,
    base_url: Url,
}

impl HttpCatalogClient {
    pub fn new(config: HttpCatalogConfig) -> Result<Self, DomainError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            DomainError::configuration(format!(
                "Invalid catalog base URL '{}': {}",
                config.base_url, e
            ))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(DomainError::configuration(format!(
                "Catalog base URL '{}' cannot be used as a base",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build catalog HTTP client: {}", e))
            })?;

        Ok(Self { client, base_url })
    }

    fn product_url(&self, sku: &str) -> Result<Url, DomainError> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| DomainError::internal("Catalog base URL cannot be a base"))?
            .pop_if_empty()
            .extend(["v1", "products", "sku", sku]);

        Ok(url)
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn lookup(&self, sku: &str) -> Result<Option<Product>, DomainError> {
        let url = self.product_url(sku)?;

        debug!(sku = %sku, url = %url, "Looking up product");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::provider(PROVIDER, format!("Request failed: {}", e)))?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(DomainError::provider(
                PROVIDER,
                format!("HTTP {}: {}", status, error_body),
            ));
        }

        let body: ProductLookupResponse = response.json().await.map_err(|e| {
            DomainError::provider(PROVIDER, format!("Failed to parse response: {}", e))
        })?;

        Ok(Some(body.product))
    }
}
