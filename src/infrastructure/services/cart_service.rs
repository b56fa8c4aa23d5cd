//! Cart service - validated mutations and reads of per-user carts
//!
//! Every mutation follows the same order: local input checks, then the
//! store (for updates), then the catalog round-trip. Writes are plain
//! read-then-write sequences without compare-and-swap, so two concurrent
//! mutations of the same SKU resolve as last-write-wins.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::cart::{
    validate_quantity, validate_sku, Cart, CartEntry, CartError, CartItem, CartKey, CartStore,
    DEFAULT_CART_KEY_PREFIX,
};
use crate::domain::catalog::{CatalogClient, Product};
use crate::domain::user::UserId;

/// Default idle window of a cart
pub const DEFAULT_CART_TTL: Duration = Duration::from_secs(3600);

/// Tunables of the cart service
#[derive(Debug, Clone)]
pub struct CartSettings {
    /// Idle window applied after every successful mutation
    pub ttl: Duration,
    /// Namespace of cart keys in the store
    pub key_prefix: String,
}

impl Default for CartSettings {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_CART_TTL,
            key_prefix: DEFAULT_CART_KEY_PREFIX.to_string(),
        }
    }
}

impl CartSettings {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            ..Default::default()
        }
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }
}

/// Trait for cart service operations
#[async_trait]
pub trait CartServiceTrait: Send + Sync {
    /// Returns every line of the user's cart with aggregated totals
    async fn get_cart(&self, user: UserId) -> Result<Cart, CartError>;

    /// Puts a SKU in the cart, replacing any previous line for it
    async fn add_item(&self, user: UserId, sku: &str, quantity: i32)
    -> Result<CartEntry, CartError>;

    /// Changes the quantity of a SKU already in the cart
    async fn update_item_quantity(
        &self,
        user: UserId,
        sku: &str,
        quantity: i32,
    ) -> Result<CartEntry, CartError>;

    /// Removes a SKU from the cart; absent SKUs are not an error
    async fn remove_item(&self, user: UserId, sku: &str) -> Result<(), CartError>;

    /// Removes the whole cart; absent carts are not an error
    async fn clear_cart(&self, user: UserId) -> Result<(), CartError>;

    /// Checks that the backing store answers
    async fn check_store(&self) -> Result<(), CartError>;
}

/// Cart service over a store and a catalog
///
/// Holds no mutable state of its own; all cart state lives in the store.
pub struct CartService<S: CartStore + ?Sized, C: CatalogClient + ?Sized> {
    store: Arc<S>,
    catalog: Arc<C>,
    settings: CartSettings,
}

impl<S: CartStore + ?Sized, C: CatalogClient + ?Sized> fmt::Debug for CartService<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartService")
            .field("store", &self.store)
            .field("catalog", &"<CatalogClient>")
            .field("settings", &self.settings)
            .finish()
    }
}

impl<S: CartStore + ?Sized, C: CatalogClient + ?Sized> CartService<S, C> {
    /// Create a new CartService with explicit collaborators
    pub fn new(store: Arc<S>, catalog: Arc<C>, settings: CartSettings) -> Self {
        Self {
            store,
            catalog,
            settings,
        }
    }

    pub fn settings(&self) -> &CartSettings {
        &self.settings
    }

    /// Store key of the user's cart
    pub fn cart_key(&self, user: UserId) -> CartKey {
        CartKey::for_user(&self.settings.key_prefix, user)
    }

    /// Get the user's cart
    ///
    /// A single undecodable entry fails the whole read; totals over a
    /// partial cart would be wrong.
    pub async fn get_cart(&self, user: UserId) -> Result<Cart, CartError> {
        let key = self.cart_key(user);
        debug!(user_id = %user, "Reading cart");

        let fields = self
            .store
            .get_all_fields(&key)
            .await
            .map_err(CartError::from_store)?;

        let mut items = Vec::with_capacity(fields.len());

        for (sku, raw) in fields {
            let entry = decode_entry(&sku, &raw)?;
            items.push(CartItem { sku, entry });
        }

        Ok(Cart::from_items(items))
    }

    /// Add an item, overwriting any existing line for the SKU
    pub async fn add_item(
        &self,
        user: UserId,
        sku: &str,
        quantity: i32,
    ) -> Result<CartEntry, CartError> {
        validate_quantity(quantity)?;
        validate_sku(sku)?;

        debug!(user_id = %user, sku = %sku, quantity, "Adding item to cart");

        let product = self.snapshot(sku, quantity).await?;
        let entry = CartEntry::from_product(&product, quantity);

        self.persist(&self.cart_key(user), sku, &entry).await?;

        info!(user_id = %user, sku = %sku, quantity, "Item added to cart");
        Ok(entry)
    }

    /// Update the quantity of an item already in the cart
    ///
    /// Price, name and image are re-read from the catalog rather than kept
    /// from the previous snapshot.
    pub async fn update_item_quantity(
        &self,
        user: UserId,
        sku: &str,
        quantity: i32,
    ) -> Result<CartEntry, CartError> {
        validate_quantity(quantity)?;
        validate_sku(sku)?;

        debug!(user_id = %user, sku = %sku, quantity, "Updating cart item");

        let key = self.cart_key(user);

        let existing = self
            .store
            .get_field(&key, sku)
            .await
            .map_err(CartError::from_store)?;

        if existing.is_none() {
            return Err(CartError::item_not_found(sku));
        }

        let product = self.snapshot(sku, quantity).await?;
        let entry = CartEntry::from_product(&product, quantity);

        self.persist(&key, sku, &entry).await?;

        info!(user_id = %user, sku = %sku, quantity, "Cart item updated");
        Ok(entry)
    }

    /// Remove an item; does not touch the cart's expiry
    pub async fn remove_item(&self, user: UserId, sku: &str) -> Result<(), CartError> {
        let removed = self
            .store
            .delete_field(&self.cart_key(user), sku)
            .await
            .map_err(CartError::from_store)?;

        debug!(user_id = %user, sku = %sku, removed, "Removed cart item");
        Ok(())
    }

    /// Delete the whole cart
    pub async fn clear_cart(&self, user: UserId) -> Result<(), CartError> {
        let removed = self
            .store
            .delete_key(&self.cart_key(user))
            .await
            .map_err(CartError::from_store)?;

        debug!(user_id = %user, removed, "Cleared cart");
        Ok(())
    }

    /// Ping the backing store
    pub async fn check_store(&self) -> Result<(), CartError> {
        self.store.ping().await.map_err(CartError::from_store)
    }

    /// Looks up the SKU and checks that stock covers the quantity
    async fn snapshot(&self, sku: &str, quantity: i32) -> Result<Product, CartError> {
        let product = match self.catalog.lookup(sku).await {
            Ok(Some(product)) => product,
            Ok(None) => return Err(CartError::product_not_found(sku)),
            Err(e) => {
                warn!(sku = %sku, error = %e, "Catalog lookup failed");
                return Err(CartError::from_catalog(e));
            }
        };

        if !product.has_stock_for(quantity) {
            return Err(CartError::insufficient_stock(
                sku,
                quantity,
                product.stock_quantity,
            ));
        }

        Ok(product)
    }

    /// Writes the entry and pushes the cart's expiry forward
    async fn persist(&self, key: &CartKey, sku: &str, entry: &CartEntry) -> Result<(), CartError> {
        let raw = entry
            .encode()
            .map_err(|e| CartError::corrupt_entry(sku, e.to_string()))?;

        self.store
            .set_field(key, sku, &raw)
            .await
            .map_err(CartError::from_store)?;

        self.store
            .set_expiry(key, self.settings.ttl)
            .await
            .map_err(CartError::from_store)?;

        Ok(())
    }
}

/// Parses a stored entry, rejecting values that break the entry invariants
fn decode_entry(sku: &str, raw: &str) -> Result<CartEntry, CartError> {
    let entry = CartEntry::decode(raw).map_err(|e| {
        warn!(sku = %sku, error = %e, "Corrupt cart entry");
        CartError::corrupt_entry(sku, e.to_string())
    })?;

    if entry.quantity < 1 {
        warn!(sku = %sku, quantity = entry.quantity, "Stored cart entry has invalid quantity");
        return Err(CartError::corrupt_entry(
            sku,
            format!("stored quantity {} is below 1", entry.quantity),
        ));
    }

    Ok(entry)
}

#[async_trait]
impl<S, C> CartServiceTrait for CartService<S, C>
where
    S: CartStore + ?Sized + 'static,
    C: CatalogClient + ?Sized + 'static,
{
    async fn get_cart(&self, user: UserId) -> Result<Cart, CartError> {
        CartService::get_cart(self, user).await
    }

    async fn add_item(
        &self,
        user: UserId,
        sku: &str,
        quantity: i32,
    ) -> Result<CartEntry, CartError> {
        CartService::add_item(self, user, sku, quantity).await
    }

    async fn update_item_quantity(
        &self,
        user: UserId,
        sku: &str,
        quantity: i32,
    ) -> Result<CartEntry, CartError> {
        CartService::update_item_quantity(self, user, sku, quantity).await
    }

    async fn remove_item(&self, user: UserId, sku: &str) -> Result<(), CartError> {
        CartService::remove_item(self, user, sku).await
    }

    async fn clear_cart(&self, user: UserId) -> Result<(), CartError> {
        CartService::clear_cart(self, user).await
    }

    async fn check_store(&self) -> Result<(), CartError> {
        CartService::check_store(self).await
    }
}
