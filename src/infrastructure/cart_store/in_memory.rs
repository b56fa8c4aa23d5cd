//! In-memory cart store using moka

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache as MokaCache;
use moka::ops::compute::Op;

use crate::domain::cart::{CartKey, CartStore};
use crate::domain::DomainError;

/// Configuration for the in-memory cart store
#[derive(Debug, Clone)]
pub struct InMemoryCartStoreConfig {
    /// Maximum number of carts held at once
    pub max_capacity: u64,
}

impl Default for InMemoryCartStoreConfig {
    fn default() -> Self {
        Self {
            max_capacity: 100_000,
        }
    }
}

impl InMemoryCartStoreConfig {
    /// Sets the maximum number of carts
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }
}

/// One cart hash plus its optional deadline
#[derive(Debug, Clone, Default)]
struct CartBucket {
    fields: HashMap<String, String>,
    expires_at: Option<Instant>,
}

impl CartBucket {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| deadline <= now)
    }

    fn remaining(&self, now: Instant) -> Option<Duration> {
        self.expires_at
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Drops the bucket contents when its deadline has passed
    fn live(self, now: Instant) -> Option<Self> {
        if self.is_expired(now) { None } else { Some(self) }
    }
}

/// Evicts buckets at their own deadline
struct BucketExpiry;

impl Expiry<String, CartBucket> for BucketExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CartBucket,
        created_at: Instant,
    ) -> Option<Duration> {
        value.remaining(created_at)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CartBucket,
        updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.remaining(updated_at)
    }
}

/// Thread-safe in-memory cart store
///
/// Mirrors Redis hash semantics: a hash without fields does not exist, a new
/// hash carries no expiry until one is set, and field writes keep the
/// existing deadline. Mutations of one key are applied atomically through
/// moka's entry compute API.
#[derive(Debug)]
pub struct InMemoryCartStore {
    cache: MokaCache<String, CartBucket>,
}

impl InMemoryCartStore {
    /// Creates a new in-memory store with default configuration
    pub fn new() -> Self {
        Self::with_config(InMemoryCartStoreConfig::default())
    }

    /// Creates a new in-memory store with the given configuration
    pub fn with_config(config: InMemoryCartStoreConfig) -> Self {
        let cache = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(BucketExpiry)
            .build();

        Self { cache }
    }

    async fn live_bucket(&self, key: &CartKey) -> Option<CartBucket> {
        self.cache
            .get(key.as_str())
            .await
            .and_then(|bucket| bucket.live(Instant::now()))
    }
}

impl Default for InMemoryCartStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn get_all_fields(&self, key: &CartKey) -> Result<HashMap<String, String>, DomainError> {
        Ok(self
            .live_bucket(key)
            .await
            .map(|bucket| bucket.fields)
            .unwrap_or_default())
    }

    async fn get_field(&self, key: &CartKey, field: &str) -> Result<Option<String>, DomainError> {
        Ok(self
            .live_bucket(key)
            .await
            .and_then(|bucket| bucket.fields.get(field).cloned()))
    }

    async fn set_field(&self, key: &CartKey, field: &str, value: &str) -> Result<(), DomainError> {
        let field = field.to_string();
        let value = value.to_string();

        self.cache
            .entry(key.to_string())
            .and_compute_with(|current| {
                let now = Instant::now();
                let mut bucket = current
                    .and_then(|entry| entry.into_value().live(now))
                    .unwrap_or_default();

                bucket.fields.insert(field, value);
                std::future::ready(Op::Put(bucket))
            })
            .await;

        Ok(())
    }

    async fn delete_field(&self, key: &CartKey, field: &str) -> Result<bool, DomainError> {
        let mut existed = false;

        self.cache
            .entry(key.to_string())
            .and_compute_with(|current| {
                let now = Instant::now();
                let op = match current.and_then(|entry| entry.into_value().live(now)) {
                    Some(mut bucket) => {
                        existed = bucket.fields.remove(field).is_some();

                        if bucket.fields.is_empty() {
                            Op::Remove
                        } else {
                            Op::Put(bucket)
                        }
                    }
                    None => Op::Nop,
                };

                std::future::ready(op)
            })
            .await;

        Ok(existed)
    }

    async fn delete_key(&self, key: &CartKey) -> Result<bool, DomainError> {
        let removed = self.cache.remove(key.as_str()).await;
        let now = Instant::now();

        Ok(removed.is_some_and(|bucket| !bucket.is_expired(now)))
    }

    async fn set_expiry(&self, key: &CartKey, ttl: Duration) -> Result<bool, DomainError> {
        let mut existed = false;
        let mut overflowed = false;

        self.cache
            .entry(key.to_string())
            .and_compute_with(|current| {
                let now = Instant::now();
                let op = match current.and_then(|entry| entry.into_value().live(now)) {
                    Some(mut bucket) => match now.checked_add(ttl) {
                        Some(deadline) => {
                            existed = true;
                            bucket.expires_at = Some(deadline);
                            Op::Put(bucket)
                        }
                        None => {
                            overflowed = true;
                            Op::Nop
                        }
                    },
                    None => Op::Nop,
                };

                std::future::ready(op)
            })
            .await;

        if overflowed {
            return Err(DomainError::store(format!(
                "Expiry of {}s is out of range",
                ttl.as_secs()
            )));
        }

        Ok(existed)
    }

    async fn expiry(&self, key: &CartKey) -> Result<Option<Duration>, DomainError> {
        let now = Instant::now();

        Ok(self
            .live_bucket(key)
            .await
            .and_then(|bucket| bucket.remaining(now)))
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
