//! Infrastructure services

mod cart_service;

pub use cart_service::{
    CartService, CartServiceTrait, CartSettings, DEFAULT_CART_TTL,
};
