//! Request authentication middleware
//!
//! Three escalating gates, each a precondition for the next:
//!
//! 1. [`authenticate`] resolves the bearer token to a stored user and puts a
//!    [`CurrentUser`] into request extensions.
//! 2. [`require_active`] rejects disabled accounts.
//! 3. [`require_admin`] rejects accounts without the admin flag.
//!
//! Routers stack them with `route_layer`; layers run outermost-last, so
//! `authenticate` is always added last:
//!
//! ```ignore
//! Router::new()
//!     .route("/sweets", post(create_sweet))
//!     .route_layer(middleware::from_fn(require_admin))
//!     .route_layer(middleware::from_fn(require_active))
//!     .route_layer(middleware::from_fn_with_state(state, authenticate))
//! ```

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use thiserror::Error;

use super::jwt::validate_access_token;
use super::models::User;
use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller, resolved from the token subject on every
/// request. Handlers extract it with `Extension<CurrentUser>`.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub is_active: bool,
    pub is_admin: bool,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_active: user.is_active,
            is_admin: user.is_admin,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingAuthHeader,

    #[error("Invalid Authorization header format")]
    InvalidAuthHeader,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("No user for token subject")]
    UnknownUser,

    #[error("Inactive user")]
    InactiveUser,

    #[error("Not enough privileges")]
    NotEnoughPrivileges,

    #[error("Database error: {0}")]
    Database(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // Every credential failure collapses to the same 401 so callers
        // cannot probe which part of the token was wrong.
        let (status, error) = match self {
            AuthError::MissingAuthHeader
            | AuthError::InvalidAuthHeader
            | AuthError::InvalidToken
            | AuthError::UnknownUser => (
                StatusCode::UNAUTHORIZED,
                ApiError::unauthorized("Could not validate credentials"),
            ),
            AuthError::InactiveUser => {
                (StatusCode::BAD_REQUEST, ApiError::bad_request("Inactive user"))
            }
            AuthError::NotEnoughPrivileges => (
                StatusCode::FORBIDDEN,
                ApiError::forbidden("Not enough privileges"),
            ),
            AuthError::Database(msg) => {
                tracing::error!("database error during authentication: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, ApiError::internal_error())
            }
        };

        if status == StatusCode::UNAUTHORIZED {
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], Json(error)).into_response()
        } else {
            (status, Json(error)).into_response()
        }
    }
}

/// Resolve the bearer token into a [`CurrentUser`].
///
/// The token carries only the subject; the account row is re-read on every
/// request so deactivation, deletion, and privilege changes take effect
/// immediately instead of at token expiry.
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidAuthHeader)?;

    let claims =
        validate_access_token(&state.config.auth, token).map_err(|_| AuthError::InvalidToken)?;

    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, is_active, is_admin FROM users WHERE email = ?",
    )
    .bind(&claims.sub)
    .fetch_optional(&state.db_pool)
    .await
    .map_err(|e| AuthError::Database(e.to_string()))?
    .ok_or(AuthError::UnknownUser)?;

    request.extensions_mut().insert(CurrentUser::from(user));

    Ok(next.run(request).await)
}

/// Reject requests from deactivated accounts. Must run after
/// [`authenticate`].
pub async fn require_active(request: Request, next: Next) -> Result<Response, AuthError> {
    let user = request
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AuthError::MissingAuthHeader)?;

    if !user.is_active {
        tracing::warn!(email = %user.email, "rejected inactive user");
        return Err(AuthError::InactiveUser);
    }

    Ok(next.run(request).await)
}

/// Reject requests from non-admin accounts. Must run after
/// [`authenticate`].
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AuthError> {
    let user = request
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AuthError::MissingAuthHeader)?;

    if !user.is_admin {
        tracing::warn!(email = %user.email, "rejected non-admin user");
        return Err(AuthError::NotEnoughPrivileges);
    }

    Ok(next.run(request).await)
}
