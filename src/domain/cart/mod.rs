//! Cart domain - entries, keys, validation and the store contract

mod entity;
mod error;
mod key;
mod store;
mod validation;

pub use entity::{Cart, CartEntry, CartItem};
pub use error::CartError;
pub use key::{CartKey, DEFAULT_CART_KEY_PREFIX};
pub use store::CartStore;
pub use validation::{validate_quantity, validate_sku};

#[cfg(test)]
pub use store::mock::MockCartStore;
