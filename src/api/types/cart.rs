//! Request and response bodies of the cart endpoints

use serde::{Deserialize, Serialize};

use crate::domain::{Cart, CartEntry, CartItem};

/// POST /v1/cart/items
#[derive(Debug, Clone, Deserialize)]
pub struct AddItemRequest {
    pub sku: String,
    pub quantity: i32,
}

/// PUT /v1/cart/items/{sku}
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateItemRequest {
    pub quantity: i32,
}

/// One cart line as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItemResponse {
    pub sku: String,
    pub quantity: i32,
    pub price: f64,
    pub name: String,
    pub image_url: String,
    pub item_total_price: f64,
}

impl CartItemResponse {
    pub fn new(sku: impl Into<String>, entry: CartEntry) -> Self {
        Self {
            sku: sku.into(),
            quantity: entry.quantity,
            price: entry.price,
            name: entry.name,
            image_url: entry.image_url,
            item_total_price: entry.item_total_price,
        }
    }
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self::new(item.sku, item.entry)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartResponse {
    pub items: Vec<CartItemResponse>,
    pub total_price: f64,
    pub total_items: i64,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            total_price: cart.total_price,
            total_items: cart.total_items,
        }
    }
}

/// Body of a successful add or update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemEnvelope {
    pub item: CartItemResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Product;

    #[test]
    fn test_cart_response_shape() {
        let product = Product::new("SKU-1", "Mug", 10.0).with_stock(5);
        let cart = Cart::from_items(vec![CartItem {
            sku: "SKU-1".to_string(),
            entry: CartEntry::from_product(&product, 2),
        }]);

        let json = serde_json::to_value(CartResponse::from(cart)).unwrap();

        assert_eq!(json["items"][0]["sku"], "SKU-1");
        assert_eq!(json["items"][0]["quantity"], 2);
        assert_eq!(json["items"][0]["item_total_price"], 20.0);
        assert_eq!(json["total_price"], 20.0);
        assert_eq!(json["total_items"], 2);
    }

    #[test]
    fn test_add_item_request_requires_quantity() {
        let result: Result<AddItemRequest, _> = serde_json::from_str(r#"{"sku":"SKU-1"}"#);
        assert!(result.is_err());
    }
}
