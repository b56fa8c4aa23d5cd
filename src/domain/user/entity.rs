//! User identity type

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::{parse_user_id, UserIdError};

/// Numeric identifier of a shopper, resolved by the transport layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Create a new UserId after validation
    pub fn new(id: i64) -> Result<Self, UserIdError> {
        if id <= 0 {
            return Err(UserIdError::NotPositive(id));
        }

        Ok(Self(id))
    }

    /// Get the inner numeric value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserIdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl FromStr for UserId {
    type Err = UserIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_user_id(s).map(Self)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
