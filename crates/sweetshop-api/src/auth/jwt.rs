//! Access token issuance and validation
//!
//! Tokens are HMAC-SHA256 signed JWTs carrying the user's email as subject
//! and an absolute expiry. Validation deliberately collapses every failure
//! mode (bad signature, malformed payload, expired) into a single error so
//! callers cannot distinguish them.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sweetshop_core::AuthConfig;
use thiserror::Error;

/// Claims embedded in an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user's email
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiry (Unix timestamp)
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    Encoding(String),

    #[error("Invalid or expired token")]
    InvalidToken,
}

/// Issue a signed access token for the given subject.
pub fn issue_access_token(config: &AuthConfig, subject: &str) -> Result<String, JwtError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: subject.to_string(),
        iat: now,
        exp: now + (config.token_ttl_minutes as i64) * 60,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret_key.as_bytes()),
    )
    .map_err(|e| JwtError::Encoding(e.to_string()))
}

/// Validate a token and return its claims. Expiry is checked as part of
/// validation.
pub fn validate_access_token(config: &AuthConfig, token: &str) -> Result<Claims, JwtError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret_key.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|_| JwtError::InvalidToken)?;

    Ok(token_data.claims)
}
