//! Cart endpoint handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{
    AddItemRequest, ApiError, CartItemEnvelope, CartItemResponse, CartResponse, Json,
    UpdateItemRequest,
};

/// GET /v1/cart
pub async fn get_cart(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<CartResponse>, ApiError> {
    debug!(user_id = %user, "Getting cart");

    let cart = state.cart_service.get_cart(user).await?;

    Ok(Json(CartResponse::from(cart)))
}

/// POST /v1/cart/items
pub async fn add_item(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<CartItemEnvelope>, ApiError> {
    let entry = state
        .cart_service
        .add_item(user, &request.sku, request.quantity)
        .await?;

    Ok(Json(CartItemEnvelope {
        item: CartItemResponse::new(request.sku, entry),
    }))
}

/// PUT /v1/cart/items/{sku}
pub async fn update_item(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(sku): Path<String>,
    Json(request): Json<UpdateItemRequest>,
) -> Result<Json<CartItemEnvelope>, ApiError> {
    let entry = state
        .cart_service
        .update_item_quantity(user, &sku, request.quantity)
        .await?;

    Ok(Json(CartItemEnvelope {
        item: CartItemResponse::new(sku, entry),
    }))
}

/// DELETE /v1/cart/items/{sku}
pub async fn remove_item(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(sku): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.cart_service.remove_item(user, &sku).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /v1/cart
pub async fn clear_cart(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<StatusCode, ApiError> {
    state.cart_service.clear_cart(user).await?;

    Ok(StatusCode::NO_CONTENT)
}
