//! Cart store infrastructure - CartStore implementations

mod factory;
mod in_memory;
mod redis;

pub use factory::{create_cart_store, CartStoreBackend, CartStoreConfig};
pub use in_memory::{InMemoryCartStore, InMemoryCartStoreConfig};
pub use self::redis::{RedisCartStore, RedisCartStoreConfig};
