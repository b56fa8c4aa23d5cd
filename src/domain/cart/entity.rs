//! Cart entries and the aggregated cart view

use serde::{Deserialize, Serialize};

use crate::domain::catalog::Product;

/// Stored value of one SKU within a user's cart
///
/// Price, name and image are catalog snapshots taken at the last mutation;
/// they are never repriced on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    pub quantity: i32,
    /// Unit price
    pub price: f64,
    pub name: String,
    pub image_url: String,
    /// quantity * price, stored alongside the inputs
    pub item_total_price: f64,
}

impl CartEntry {
    /// Builds a fresh entry from the catalog snapshot
    pub fn from_product(product: &Product, quantity: i32) -> Self {
        Self {
            quantity,
            price: product.price,
            name: product.name.clone(),
            image_url: product.image_url.clone(),
            item_total_price: f64::from(quantity) * product.price,
        }
    }

    /// Serializes the entry into its stored form
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses a stored value
    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// One line of a cart as returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub sku: String,
    #[serde(flatten)]
    pub entry: CartEntry,
}

/// Read-side view of a user's cart
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cart {
    /// Lines ordered by SKU
    pub items: Vec<CartItem>,
    pub total_price: f64,
    pub total_items: i64,
}

impl Cart {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Aggregates lines into a cart, ordering them by SKU
    pub fn from_items(mut items: Vec<CartItem>) -> Self {
        items.sort_by(|a, b| a.sku.cmp(&b.sku));

        let mut total_price = 0.0;
        let mut total_items = 0i64;

        for item in &items {
            total_price += f64::from(item.entry.quantity) * item.entry.price;
            total_items += i64::from(item.entry.quantity);
        }

        Self {
            items,
            total_price,
            total_items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, sku: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.sku == sku)
    }
}
