//! Catalog infrastructure - CatalogClient implementations

mod factory;
mod http;
mod in_memory;

pub use factory::{create_catalog_client, CatalogBackend, CatalogConfig};
pub use http::{HttpCatalogClient, HttpCatalogConfig};
pub use in_memory::InMemoryCatalog;
