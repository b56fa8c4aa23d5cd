//! User identifier validation

use thiserror::Error;

/// Errors raised while turning an external identity claim into a [`super::UserId`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserIdError {
    #[error("User ID cannot be empty")]
    Empty,

    #[error("User ID must be numeric, got '{0}'")]
    NotNumeric(String),

    #[error("User ID must be positive, got {0}")]
    NotPositive(i64),
}

/// Parse a user identifier claim (e.g. a JWT `sub`) into its numeric value
pub fn parse_user_id(raw: &str) -> Result<i64, UserIdError> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(UserIdError::Empty);
    }

    let id: i64 = raw
        .parse()
        .map_err(|_| UserIdError::NotNumeric(raw.to_string()))?;

    if id <= 0 {
        return Err(UserIdError::NotPositive(id));
    }

    Ok(id)
}
