//! User account models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored user account. Never serialized directly; handlers return
/// [`UserPublic`] instead so the password hash cannot leak.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_admin: bool,
}

impl User {
    pub fn to_public(&self) -> UserPublic {
        UserPublic {
            id: self.id,
            email: self.email.clone(),
            is_active: self.is_active,
        }
    }
}

/// Public view of a user account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserPublic {
    pub id: i64,
    pub email: String,
    pub is_active: bool,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Login form body. Field names follow the OAuth2 password grant, so the
/// `username` field carries the email.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}
