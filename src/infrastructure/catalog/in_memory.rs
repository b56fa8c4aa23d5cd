//! In-memory product catalog

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::catalog::{CatalogClient, Product};
use crate::domain::DomainError;

/// Catalog held in process memory
///
/// Used for local runs (optionally seeded from a JSON file holding a list of
/// products) and as a real collaborator in tests.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<String, Product>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(self, product: Product) -> Self {
        self.upsert(product);
        self
    }

    /// Builds a catalog from a JSON array of products
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let products: Vec<Product> = serde_json::from_str(json).map_err(|e| {
            DomainError::configuration(format!("Invalid catalog seed data: {}", e))
        })?;

        let catalog = Self::new();

        for product in products {
            catalog.upsert(product);
        }

        Ok(catalog)
    }

    /// Loads a catalog seed file
    pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            DomainError::configuration(format!(
                "Failed to read catalog seed file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_json(&json)
    }

    /// Inserts or replaces a product
    pub fn upsert(&self, product: Product) {
        if let Ok(mut products) = self.products.write() {
            products.insert(product.sku.clone(), product);
        }
    }

    pub fn remove(&self, sku: &str) -> Option<Product> {
        self.products
            .write()
            .ok()
            .and_then(|mut products| products.remove(sku))
    }

    pub fn len(&self) -> usize {
        self.products.read().map(|products| products.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CatalogClient for InMemoryCatalog {
    async fn lookup(&self, sku: &str) -> Result<Option<Product>, DomainError> {
        let products = self
            .products
            .read()
            .map_err(|_| DomainError::internal("Catalog lock poisoned"))?;

        Ok(products.get(sku).cloned())
    }
}
