//! Store key derivation for per-user carts

use std::fmt;

use crate::domain::user::UserId;

/// Namespace used when none is configured
pub const DEFAULT_CART_KEY_PREFIX: &str = "cart";

/// Key of the hash holding one user's cart, e.g. `cart:42`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CartKey(String);

impl CartKey {
    /// Derives the key for a user under the given namespace
    pub fn for_user(prefix: &str, user: UserId) -> Self {
        Self(format!("{}:{}", prefix, user.value()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CartKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
