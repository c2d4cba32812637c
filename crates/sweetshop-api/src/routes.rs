//! API route definitions
//!
//! Three tiers share the `/api` prefix:
//!
//! - public: registration, login, and read-only inventory access
//! - active users: purchasing
//! - admins: every inventory mutation
//!
//! Route layers run outermost-last, so each gated router adds its privilege
//! checks first and `authenticate` last.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::auth::{authenticate, require_active, require_admin};
use crate::handlers::{auth, sweets};
use crate::state::AppState;

pub fn api_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    // Public routes: no token required.
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/sweets", get(sweets::list_sweets))
        .route("/sweets/search", get(sweets::search_sweets));

    // Any active account may purchase.
    let purchase_routes = Router::new()
        .route("/sweets/:id/purchase", post(sweets::purchase_sweet))
        .route_layer(middleware::from_fn(require_active))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    // Inventory mutation needs the admin flag.
    let admin_routes = Router::new()
        .route("/sweets", post(sweets::create_sweet))
        .route("/sweets/:id", put(sweets::update_sweet).delete(sweets::delete_sweet))
        .route("/sweets/:id/restock", post(sweets::restock_sweet))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn(require_active))
        .route_layer(middleware::from_fn_with_state(state, authenticate));

    Router::new()
        .merge(public_routes)
        .merge(purchase_routes)
        .merge(admin_routes)
}
