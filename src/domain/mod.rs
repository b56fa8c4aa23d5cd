//! Domain layer - Core cart entities, contracts and errors

pub mod cart;
pub mod catalog;
pub mod error;
pub mod user;

pub use cart::{
    validate_quantity, validate_sku, Cart, CartEntry, CartError, CartItem, CartKey, CartStore,
    DEFAULT_CART_KEY_PREFIX,
};
pub use catalog::{CatalogClient, Product};
pub use error::DomainError;
pub use user::{UserId, UserIdError};
