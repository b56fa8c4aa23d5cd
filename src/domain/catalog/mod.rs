//! Catalog domain - read-only product lookups consumed by the cart

mod client;
mod entity;

pub use client::CatalogClient;
pub use entity::Product;

#[cfg(test)]
pub use client::MockCatalogClient;
