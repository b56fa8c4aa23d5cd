//! Redis cart store implementation

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use crate::domain::cart::{CartKey, CartStore};
use crate::domain::DomainError;

/// Configuration for the Redis cart store
#[derive(Debug, Clone)]
pub struct RedisCartStoreConfig {
    /// Redis connection URL (e.g., "redis://127.0.0.1:6379")
    pub url: String,
    /// Time allowed for the initial connection
    pub connection_timeout: Duration,
}

impl Default for RedisCartStoreConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            connection_timeout: Duration::from_secs(5),
        }
    }
}

impl RedisCartStoreConfig {
    /// Creates a new configuration with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Sets the connection timeout
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }
}

/// Cart store backed by Redis hashes
///
/// One hash per cart key, one field per SKU; expiry uses `EXPIRE` on the
/// hash key. The `ConnectionManager` multiplexes a single connection and
/// reconnects on its own; this adapter adds no retries.
#[derive(Clone)]
pub struct RedisCartStore {
    connection: ConnectionManager,
    config: RedisCartStoreConfig,
}

impl fmt::Debug for RedisCartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCartStore")
            .field("config", &self.config)
            .field("connection", &"<ConnectionManager>")
            .finish()
    }
}

impl RedisCartStore {
    /// Connects to Redis
    pub async fn new(config: RedisCartStoreConfig) -> Result<Self, DomainError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| DomainError::store(format!("Failed to create Redis client: {}", e)))?;

        let connection = tokio::time::timeout(config.connection_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| {
                DomainError::store(format!(
                    "Timed out connecting to Redis after {:?}",
                    config.connection_timeout
                ))
            })?
            .map_err(|e| DomainError::store(format!("Failed to connect to Redis: {}", e)))?;

        Ok(Self { connection, config })
    }

    /// Connects with default settings
    pub async fn with_url(url: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(RedisCartStoreConfig::new(url)).await
    }
}

#[async_trait]
impl CartStore for RedisCartStore {
    async fn get_all_fields(&self, key: &CartKey) -> Result<HashMap<String, String>, DomainError> {
        let mut conn = self.connection.clone();

        let fields: HashMap<String, String> = conn.hgetall(key.as_str()).await.map_err(|e| {
            DomainError::store(format!("Failed to read cart '{}': {}", key, e))
        })?;

        Ok(fields)
    }

    async fn get_field(&self, key: &CartKey, field: &str) -> Result<Option<String>, DomainError> {
        let mut conn = self.connection.clone();

        let value: Option<String> = conn.hget(key.as_str(), field).await.map_err(|e| {
            DomainError::store(format!("Failed to read '{}' from cart '{}': {}", field, key, e))
        })?;

        Ok(value)
    }

    async fn set_field(&self, key: &CartKey, field: &str, value: &str) -> Result<(), DomainError> {
        let mut conn = self.connection.clone();

        let _: i64 = conn.hset(key.as_str(), field, value).await.map_err(|e| {
            DomainError::store(format!("Failed to write '{}' to cart '{}': {}", field, key, e))
        })?;

        Ok(())
    }

    async fn delete_field(&self, key: &CartKey, field: &str) -> Result<bool, DomainError> {
        let mut conn = self.connection.clone();

        let deleted: i64 = conn.hdel(key.as_str(), field).await.map_err(|e| {
            DomainError::store(format!(
                "Failed to delete '{}' from cart '{}': {}",
                field, key, e
            ))
        })?;

        Ok(deleted > 0)
    }

    async fn delete_key(&self, key: &CartKey) -> Result<bool, DomainError> {
        let mut conn = self.connection.clone();

        let deleted: i64 = conn.del(key.as_str()).await.map_err(|e| {
            DomainError::store(format!("Failed to delete cart '{}': {}", key, e))
        })?;

        Ok(deleted > 0)
    }

    async fn set_expiry(&self, key: &CartKey, ttl: Duration) -> Result<bool, DomainError> {
        let mut conn = self.connection.clone();

        let ttl_secs = expire_seconds(ttl)?;

        let updated: bool = conn.expire(key.as_str(), ttl_secs).await.map_err(|e| {
            DomainError::store(format!("Failed to set TTL for cart '{}': {}", key, e))
        })?;

        Ok(updated)
    }

    async fn expiry(&self, key: &CartKey) -> Result<Option<Duration>, DomainError> {
        let mut conn = self.connection.clone();

        let ttl_secs: i64 = conn.ttl(key.as_str()).await.map_err(|e| {
            DomainError::store(format!("Failed to get TTL for cart '{}': {}", key, e))
        })?;

        // Redis returns -2 if key doesn't exist, -1 if no TTL
        if ttl_secs < 0 {
            Ok(None)
        } else {
            Ok(Some(Duration::from_secs(ttl_secs as u64)))
        }
    }

    async fn ping(&self) -> Result<(), DomainError> {
        let mut conn = self.connection.clone();

        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| DomainError::store(format!("Failed to ping Redis: {}", e)))?;

        Ok(())
    }
}

/// Convert a TTL into the argument of `EXPIRE`
///
/// EXPIRE has second granularity, deletes the key on 0 and treats negative
/// values as already expired.
fn expire_seconds(ttl: Duration) -> Result<i64, DomainError> {
    i64::try_from(ttl.as_secs().max(1)).map_err(|_| {
        DomainError::store(format!("Expiry of {}s is out of range", ttl.as_secs()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;

    // Note: These tests require a running Redis instance
    // Run with: cargo test -- --ignored

    fn get_test_config() -> RedisCartStoreConfig {
        RedisCartStoreConfig::new("redis://127.0.0.1:6379")
            .with_connection_timeout(Duration::from_secs(2))
    }

    fn test_key(user: i64) -> CartKey {
        CartKey::for_user("test-cart", UserId::new(user).unwrap())
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_set_and_get_field() {
        let store = RedisCartStore::new(get_test_config()).await.unwrap();
        let key = test_key(1001);

        store.set_field(&key, "SKU-1", "payload").await.unwrap();

        let value = store.get_field(&key, "SKU-1").await.unwrap();
        assert_eq!(value, Some("payload".to_string()));

        let fields = store.get_all_fields(&key).await.unwrap();
        assert_eq!(fields.len(), 1);

        // Cleanup
        store.delete_key(&key).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_delete_field_and_key() {
        let store = RedisCartStore::new(get_test_config()).await.unwrap();
        let key = test_key(1002);

        store.set_field(&key, "SKU-1", "a").await.unwrap();
        store.set_field(&key, "SKU-2", "b").await.unwrap();

        assert!(store.delete_field(&key, "SKU-1").await.unwrap());
        assert!(!store.delete_field(&key, "SKU-1").await.unwrap());

        assert!(store.delete_key(&key).await.unwrap());
        assert!(!store.delete_key(&key).await.unwrap());
        assert!(store.get_all_fields(&key).await.unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_expiry() {
        let store = RedisCartStore::new(get_test_config()).await.unwrap();
        let key = test_key(1003);

        store.set_field(&key, "SKU-1", "a").await.unwrap();
        assert_eq!(store.expiry(&key).await.unwrap(), None);

        assert!(store.set_expiry(&key, Duration::from_secs(60)).await.unwrap());

        let ttl = store.expiry(&key).await.unwrap();
        assert!(ttl.is_some());
        assert!(ttl.unwrap().as_secs() > 50);

        // Cleanup
        store.delete_key(&key).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_ping() {
        let store = RedisCartStore::new(get_test_config()).await.unwrap();

        store.ping().await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_url_is_store_error() {
        let result = RedisCartStore::with_url("not-a-redis-url").await;

        assert!(matches!(result, Err(DomainError::Store { .. })));
    }

    #[test]
    fn test_expire_seconds_rounds_up_sub_second_ttl() {
        assert_eq!(expire_seconds(Duration::from_millis(200)).unwrap(), 1);
        assert_eq!(expire_seconds(Duration::from_secs(3600)).unwrap(), 3600);
    }

    #[test]
    fn test_expire_seconds_rejects_out_of_range_ttl() {
        let result = expire_seconds(Duration::from_secs(u64::MAX / 2 + 1));

        assert!(matches!(result, Err(DomainError::Store { .. })));
    }
}
