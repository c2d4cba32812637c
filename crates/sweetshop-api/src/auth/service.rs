//! Authentication service
//!
//! Registration and login against the user store. Login failures are
//! indistinguishable on the wire whether the email is unknown or the
//! password is wrong.

use sqlx::SqlitePool;
use sweetshop_core::AuthConfig;

use super::jwt::issue_access_token;
use super::models::{LoginForm, RegisterRequest, TokenResponse, User, UserPublic};
use super::password::{hash_password, verify_password};
use crate::error::AppError;

pub struct AuthService {
    db_pool: SqlitePool,
    auth_config: AuthConfig,
}

impl AuthService {
    pub fn new(db_pool: SqlitePool, auth_config: AuthConfig) -> Self {
        Self {
            db_pool,
            auth_config,
        }
    }

    /// Create a new user account. New accounts are active and non-admin;
    /// admin status is only ever granted out of band.
    pub async fn register(&self, request: RegisterRequest) -> Result<UserPublic, AppError> {
        if !request.email.contains('@') {
            return Err(AppError::BadRequest("Invalid email format".to_string()));
        }

        let existing =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = ?")
                .bind(&request.email)
                .fetch_one(&self.db_pool)
                .await
                .map_err(|e| AppError::Database(format!("Failed to check existing user: {e}")))?;

        if existing > 0 {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = hash_password(&request.password)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, is_active, is_admin) \
             VALUES (?, ?, TRUE, FALSE) \
             RETURNING id, email, password_hash, is_active, is_admin",
        )
        .bind(&request.email)
        .bind(&password_hash)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| match &e {
            // Two concurrent registrations can both pass the existence check;
            // the unique index decides the loser.
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("Email already registered".to_string())
            }
            _ => AppError::Database(format!("Failed to create user: {e}")),
        })?;

        tracing::info!(user_id = user.id, email = %user.email, "registered new user");

        Ok(user.to_public())
    }

    /// Verify credentials and issue an access token.
    pub async fn login(&self, form: LoginForm) -> Result<TokenResponse, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, is_active, is_admin FROM users WHERE email = ?",
        )
        .bind(&form.username)
        .fetch_optional(&self.db_pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to fetch user: {e}")))?
        .ok_or_else(|| AppError::Unauthorized("Incorrect email or password".to_string()))?;

        if !verify_password(&form.password, &user.password_hash) {
            return Err(AppError::Unauthorized(
                "Incorrect email or password".to_string(),
            ));
        }

        let access_token = issue_access_token(&self.auth_config, &user.email)
            .map_err(|e| AppError::Internal(format!("Failed to issue access token: {e}")))?;

        tracing::debug!(email = %user.email, "issued access token");

        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
        })
    }
}
