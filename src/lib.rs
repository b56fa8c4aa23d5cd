//! Shopping Cart Service
//!
//! Per-user shopping carts with:
//! - Catalog-validated mutations (price, display data and stock snapshots)
//! - Idle expiry refreshed on every add/update
//! - Redis or in-memory cart storage
//! - JWT-authenticated HTTP API

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use infrastructure::{
    auth::{JwtConfig, JwtService},
    cart_store::{create_cart_store, CartStoreConfig},
    catalog::{create_catalog_client, CatalogConfig},
    services::{CartService, CartSettings},
};
use tracing::info;

/// Create the application state from configuration
///
/// Connects to the configured cart store and builds the catalog client;
/// the configuration is expected to have passed [`AppConfig::validate`].
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    info!(backend = %config.store.backend, "Creating cart store");

    let store = create_cart_store(&CartStoreConfig {
        backend: config.store.backend,
        redis_url: config.store.redis_url.clone(),
        connection_timeout: Some(Duration::from_secs(config.store.connection_timeout_secs)),
        max_capacity: Some(config.store.max_capacity),
    })
    .await?;

    info!(backend = ?config.catalog.backend, "Creating catalog client");

    let catalog = create_catalog_client(&CatalogConfig {
        backend: config.catalog.backend,
        base_url: config.catalog.base_url.clone(),
        timeout: Some(Duration::from_secs(config.catalog.timeout_secs)),
        seed_file: config.catalog.seed_file.clone(),
    })?;

    let settings = CartSettings::new(Duration::from_secs(config.cart.ttl_secs))
        .with_key_prefix(config.cart.key_prefix.clone());

    let cart_service = CartService::new(store, catalog, settings);

    let jwt_service = JwtService::new(JwtConfig::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
    ));

    Ok(AppState::new(Arc::new(cart_service), Arc::new(jwt_service)))
}
