//! Catalog lookup contract

use async_trait::async_trait;

use super::Product;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Unary product lookup by SKU
///
/// `Ok(None)` means the catalog has no such SKU. `Err` is reserved for
/// transient or unclassified upstream failures.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Looks up a product by SKU
    async fn lookup(&self, sku: &str) -> Result<Option<Product>, DomainError>;
}
