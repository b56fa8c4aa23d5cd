//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::auth::JwtValidator;
use crate::infrastructure::services::CartServiceTrait;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub cart_service: Arc<dyn CartServiceTrait>,
    pub jwt_service: Arc<dyn JwtValidator>,
}

impl AppState {
    pub fn new(cart_service: Arc<dyn CartServiceTrait>, jwt_service: Arc<dyn JwtValidator>) -> Self {
        Self {
            cart_service,
            jwt_service,
        }
    }
}
