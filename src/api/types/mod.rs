//! API request, response and error types

pub mod cart;
pub mod error;
pub mod json;

pub use cart::{
    AddItemRequest, CartItemEnvelope, CartItemResponse, CartResponse, UpdateItemRequest,
};
pub use error::ApiError;
pub use json::Json;
