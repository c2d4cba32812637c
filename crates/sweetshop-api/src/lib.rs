//! Sweet Shop API
//!
//! REST backend for a sweet shop: token-based authentication and an
//! inventory with race-free stock arithmetic. Reads are public, purchasing
//! needs an active account, and inventory mutation needs an admin.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod inventory;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{
    http::{header, HeaderValue, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use sweetshop_core::ServerConfig;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::{Modify, OpenApi};

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register_handler,
        handlers::auth::login_handler,
        handlers::sweets::list_sweets,
        handlers::sweets::search_sweets,
        handlers::sweets::create_sweet,
        handlers::sweets::update_sweet,
        handlers::sweets::delete_sweet,
        handlers::sweets::restock_sweet,
        handlers::sweets::purchase_sweet,
        handlers::health::health_check,
    ),
    components(schemas(
        error::ApiError,
        auth::models::UserPublic,
        auth::models::RegisterRequest,
        auth::models::LoginForm,
        auth::models::TokenResponse,
        inventory::models::Sweet,
        inventory::models::CreateSweetRequest,
        inventory::models::UpdateSweetRequest,
        inventory::models::RestockRequest,
        inventory::models::PurchaseResponse,
        handlers::health::WelcomeResponse,
        handlers::health::HealthResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "sweets", description = "Sweet inventory"),
        (name = "health", description = "Service health"),
    ),
    info(
        title = "Sweet Shop API",
        description = "Inventory management for a sweet shop with token-based authentication",
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

async fn openapi_spec() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Build the full application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server);

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::health::metrics))
        .route("/api-docs/openapi.json", get(openapi_spec))
        .nest("/api", routes::api_routes(state.clone()))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::metrics::track_requests,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
