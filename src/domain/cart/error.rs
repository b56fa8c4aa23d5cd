//! Cart operation errors

use thiserror::Error;

use crate::domain::DomainError;

/// Classified failures of cart operations
///
/// Every failure of the cart manager is returned as exactly one of these
/// kinds; nothing is retried or swallowed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CartError {
    #[error("Invalid quantity {quantity}: must be at least 1")]
    InvalidQuantity { quantity: i32 },

    #[error("Invalid SKU: must not be empty")]
    InvalidSku,

    #[error("Item '{sku}' not found in cart")]
    ItemNotFound { sku: String },

    #[error("Product '{sku}' not found")]
    ProductNotFound { sku: String },

    #[error("Insufficient stock for product '{sku}': requested {requested}, available {available}")]
    InsufficientStock {
        sku: String,
        requested: i32,
        available: i32,
    },

    #[error("Corrupt cart entry '{sku}': {message}")]
    CorruptEntry { sku: String, message: String },

    #[error("Cart store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Catalog error: {message}")]
    Catalog { message: String },
}

impl CartError {
    pub fn item_not_found(sku: impl Into<String>) -> Self {
        Self::ItemNotFound { sku: sku.into() }
    }

    pub fn product_not_found(sku: impl Into<String>) -> Self {
        Self::ProductNotFound { sku: sku.into() }
    }

    pub fn insufficient_stock(sku: impl Into<String>, requested: i32, available: i32) -> Self {
        Self::InsufficientStock {
            sku: sku.into(),
            requested,
            available,
        }
    }

    pub fn corrupt_entry(sku: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CorruptEntry {
            sku: sku.into(),
            message: message.into(),
        }
    }

    /// Stable snake_case identifier for this kind
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidQuantity { .. } => "invalid_quantity",
            Self::InvalidSku => "invalid_sku",
            Self::ItemNotFound { .. } => "item_not_found",
            Self::ProductNotFound { .. } => "product_not_found",
            Self::InsufficientStock { .. } => "insufficient_stock",
            Self::CorruptEntry { .. } => "corrupt_entry",
            Self::StoreUnavailable { .. } => "store_unavailable",
            Self::Catalog { .. } => "catalog_error",
        }
    }

    /// Internal faults whose text must not reach callers
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::CorruptEntry { .. } | Self::StoreUnavailable { .. } | Self::Catalog { .. }
        )
    }

    /// Classifies a failure of the cart store
    pub(crate) fn from_store(err: DomainError) -> Self {
        Self::StoreUnavailable {
            message: err.to_string(),
        }
    }

    /// Classifies an unexpected catalog failure
    pub(crate) fn from_catalog(err: DomainError) -> Self {
        Self::Catalog {
            message: err.to_string(),
        }
    }
}
