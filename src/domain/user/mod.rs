//! User domain
//!
//! Callers reach the cart layer only through an already-resolved, strongly
//! typed [`UserId`].

mod entity;
mod validation;

pub use entity::UserId;
pub use validation::{parse_user_id, UserIdError};
