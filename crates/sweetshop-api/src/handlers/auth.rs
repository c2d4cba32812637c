//! Authentication handlers

use axum::{extract::State, response::IntoResponse, Form, Json};
use std::sync::Arc;

use crate::auth::models::{LoginForm, RegisterRequest};
use crate::auth::AuthService;
use crate::error::AppError;
use crate::state::AppState;

/// Register a new user account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = crate::auth::models::UserPublic),
        (status = 400, description = "Invalid email format", body = crate::error::ApiError),
        (status = 409, description = "Email already registered", body = crate::error::ApiError),
    ),
    tag = "auth"
)]
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = AuthService::new(state.db_pool.clone(), state.config.auth.clone());
    let user = auth_service.register(request).await?;
    Ok(Json(user))
}

/// Exchange credentials for an access token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body(
        content = LoginForm,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Token issued", body = crate::auth::models::TokenResponse),
        (status = 401, description = "Incorrect email or password", body = crate::error::ApiError),
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = AuthService::new(state.db_pool.clone(), state.config.auth.clone());
    let response = auth_service.login(form).await?;
    Ok(Json(response))
}
