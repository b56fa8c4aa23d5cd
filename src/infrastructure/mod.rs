//! Infrastructure layer - External service implementations

pub mod auth;
pub mod cart_store;
pub mod catalog;
pub mod logging;
pub mod services;
