//! Product snapshot returned by the catalog

use serde::{Deserialize, Serialize};

/// Catalog view of a product at lookup time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub sku: String,
    pub name: String,
    /// Unit price
    pub price: f64,
    #[serde(default)]
    pub image_url: String,
    /// Units currently in stock; checked, never reserved
    pub stock_quantity: i32,
}

impl Product {
    pub fn new(sku: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            price,
            image_url: String::new(),
            stock_quantity: 0,
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub fn with_stock(mut self, stock_quantity: i32) -> Self {
        self.stock_quantity = stock_quantity;
        self
    }

    /// Whether the catalog can cover the requested quantity
    pub fn has_stock_for(&self, quantity: i32) -> bool {
        self.stock_quantity >= quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_builder() {
        let product = Product::new("SKU-1", "Mug", 10.0)
            .with_image_url("https://img.example.com/mug.png")
            .with_stock(5);

        assert_eq!(product.sku, "SKU-1");
        assert_eq!(product.image_url, "https://img.example.com/mug.png");
        assert_eq!(product.stock_quantity, 5);
    }

    #[test]
    fn test_has_stock_for() {
        let product = Product::new("SKU-1", "Mug", 10.0).with_stock(3);

        assert!(product.has_stock_for(1));
        assert!(product.has_stock_for(3));
        assert!(!product.has_stock_for(4));
    }

    #[test]
    fn test_deserialize_without_image() {
        let product: Product = serde_json::from_str(
            r#"{"sku":"SKU-2","name":"Pen","price":1.5,"stock_quantity":10}"#,
        )
        .unwrap();

        assert_eq!(product.image_url, "");
        assert_eq!(product.stock_quantity, 10);
    }
}
