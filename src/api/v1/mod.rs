//! v1 API endpoints

pub mod cart;

use axum::{
    routing::{get, post, put},
    Router,
};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/cart", get(cart::get_cart).delete(cart::clear_cart))
        .route("/cart/items", post(cart::add_item))
        .route(
            "/cart/items/{sku}",
            put(cart::update_item).delete(cart::remove_item),
        )
}
