//! Authentication infrastructure module
//!
//! Validates the bearer tokens that carry the caller's user id.

mod jwt;

pub use jwt::{JwtClaims, JwtConfig, JwtService, JwtValidator};
