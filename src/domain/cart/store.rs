//! Cart store contract

use std::collections::HashMap;
use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;

use super::CartKey;
use crate::domain::DomainError;

/// Hash-per-key persistence with expiry
///
/// Field values are opaque serialized payloads to this layer. Implementations
/// perform no validation and no retries; every backend failure is returned
/// as [`DomainError::Store`].
#[async_trait]
pub trait CartStore: Send + Sync + Debug {
    /// Returns every field of the hash, empty when the key does not exist
    async fn get_all_fields(&self, key: &CartKey) -> Result<HashMap<String, String>, DomainError>;

    /// Returns one field of the hash
    async fn get_field(&self, key: &CartKey, field: &str) -> Result<Option<String>, DomainError>;

    /// Writes one field, creating the hash if needed
    async fn set_field(&self, key: &CartKey, field: &str, value: &str) -> Result<(), DomainError>;

    /// Removes one field, returning whether it existed
    async fn delete_field(&self, key: &CartKey, field: &str) -> Result<bool, DomainError>;

    /// Removes the whole hash, returning whether it existed
    async fn delete_key(&self, key: &CartKey) -> Result<bool, DomainError>;

    /// Sets the time-to-live of the hash, returning whether the key existed
    async fn set_expiry(&self, key: &CartKey, ttl: Duration) -> Result<bool, DomainError>;

    /// Remaining time-to-live, `None` when the key is missing or has no expiry
    async fn expiry(&self, key: &CartKey) -> Result<Option<Duration>, DomainError>;

    /// Checks connectivity with the backend
    async fn ping(&self) -> Result<(), DomainError>;
}
