//! Bearer token issuing and validation (HS256, shared secret)

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::user::UserId;
use crate::domain::DomainError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject, the numeric user id as a string
    pub sub: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl JwtClaims {
    pub fn new(user: UserId, expiration_hours: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours as i64);

        Self {
            sub: user.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Parses the subject into a user id
    pub fn user_id(&self) -> Result<UserId, DomainError> {
        self.sub
            .parse::<UserId>()
            .map_err(|e| DomainError::validation(format!("Invalid token subject: {}", e)))
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret shared with the token issuer
    pub secret: String,
    /// Lifetime of tokens issued by [`JwtService::generate`]
    pub expiration_hours: u64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }
}

/// Trait for JWT operations
pub trait JwtValidator: Send + Sync + Debug {
    /// Validate a token and return its claims
    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError>;
}

/// HS256 JWT service
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expiration_hours", &self.config.expiration_hours)
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issues a token for the user; used by tooling and tests
    pub fn generate(&self, user: UserId) -> Result<String, DomainError> {
        let claims = JwtClaims::new(user, self.config.expiration_hours);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate JWT: {}", e)))
    }
}

impl JwtValidator for JwtService {
    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| DomainError::validation(format!("Invalid JWT: {}", e)))?;

        Ok(token_data.claims)
    }
}
