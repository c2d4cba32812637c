//! Inventory handlers
//!
//! Reads are public. Purchase requires an active account, and every other
//! mutation requires an admin; the route layers in `routes.rs` enforce
//! that, so handlers here only see requests that already passed the gate.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use std::sync::Arc;

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::inventory::models::{
    CreateSweetRequest, ListSweetsQuery, PurchaseResponse, RestockRequest, SearchSweetsQuery,
    UpdateSweetRequest,
};
use crate::inventory::InventoryService;
use crate::state::AppState;

/// List sweets with offset pagination
#[utoipa::path(
    get,
    path = "/api/sweets",
    params(ListSweetsQuery),
    responses(
        (status = 200, description = "Sweets in the inventory", body = [crate::inventory::models::Sweet]),
    ),
    tag = "sweets"
)]
pub async fn list_sweets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListSweetsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = InventoryService::new(state.db_pool.clone());
    let sweets = service
        .list(params.skip.unwrap_or(0), params.limit.unwrap_or(100))
        .await?;
    Ok(Json(sweets))
}

/// Search sweets by name, category, and price range
#[utoipa::path(
    get,
    path = "/api/sweets/search",
    params(SearchSweetsQuery),
    responses(
        (status = 200, description = "Sweets matching every given filter", body = [crate::inventory::models::Sweet]),
    ),
    tag = "sweets"
)]
pub async fn search_sweets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchSweetsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = InventoryService::new(state.db_pool.clone());
    let sweets = service.search(params).await?;
    Ok(Json(sweets))
}

/// Add a sweet to the inventory (admin only)
#[utoipa::path(
    post,
    path = "/api/sweets",
    request_body = CreateSweetRequest,
    responses(
        (status = 201, description = "Sweet created", body = crate::inventory::models::Sweet),
        (status = 400, description = "Negative price or quantity", body = crate::error::ApiError),
        (status = 401, description = "Could not validate credentials", body = crate::error::ApiError),
        (status = 403, description = "Not enough privileges", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = [])),
    tag = "sweets"
)]
pub async fn create_sweet(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<CreateSweetRequest>,
) -> Result<impl IntoResponse, AppError> {
    let service = InventoryService::new(state.db_pool.clone());
    let sweet = service.create(request).await?;

    tracing::info!(admin = %user.email, sweet_id = sweet.id, name = %sweet.name, "created sweet");

    Ok((StatusCode::CREATED, Json(sweet)))
}

/// Update fields of a sweet (admin only)
#[utoipa::path(
    put,
    path = "/api/sweets/{id}",
    params(("id" = i64, Path, description = "Sweet id")),
    request_body = UpdateSweetRequest,
    responses(
        (status = 200, description = "Updated sweet", body = crate::inventory::models::Sweet),
        (status = 404, description = "Sweet not found", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = [])),
    tag = "sweets"
)]
pub async fn update_sweet(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(patch): Json<UpdateSweetRequest>,
) -> Result<impl IntoResponse, AppError> {
    let service = InventoryService::new(state.db_pool.clone());
    let sweet = service.update(id, patch).await?;

    tracing::info!(admin = %user.email, sweet_id = id, "updated sweet");

    Ok(Json(sweet))
}

/// Remove a sweet from the inventory (admin only)
#[utoipa::path(
    delete,
    path = "/api/sweets/{id}",
    params(("id" = i64, Path, description = "Sweet id")),
    responses(
        (status = 204, description = "Sweet deleted"),
        (status = 404, description = "Sweet not found", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = [])),
    tag = "sweets"
)]
pub async fn delete_sweet(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let service = InventoryService::new(state.db_pool.clone());
    service.delete(id).await?;

    tracing::info!(admin = %user.email, sweet_id = id, "deleted sweet");

    Ok(StatusCode::NO_CONTENT)
}

/// Increase the stock of a sweet (admin only)
#[utoipa::path(
    post,
    path = "/api/sweets/{id}/restock",
    params(("id" = i64, Path, description = "Sweet id")),
    request_body = RestockRequest,
    responses(
        (status = 200, description = "Sweet with increased stock", body = crate::inventory::models::Sweet),
        (status = 400, description = "Restock amount must be positive", body = crate::error::ApiError),
        (status = 404, description = "Sweet not found", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = [])),
    tag = "sweets"
)]
pub async fn restock_sweet(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(request): Json<RestockRequest>,
) -> Result<impl IntoResponse, AppError> {
    let service = InventoryService::new(state.db_pool.clone());
    let sweet = service.restock(id, request.amount).await?;

    tracing::info!(
        admin = %user.email,
        sweet_id = id,
        amount = request.amount,
        quantity = sweet.quantity,
        "restocked sweet"
    );

    Ok(Json(sweet))
}

/// Purchase one unit of a sweet
#[utoipa::path(
    post,
    path = "/api/sweets/{id}/purchase",
    params(("id" = i64, Path, description = "Sweet id")),
    responses(
        (status = 200, description = "Purchase successful", body = PurchaseResponse),
        (status = 400, description = "Out of stock", body = crate::error::ApiError),
        (status = 404, description = "Sweet not found", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = [])),
    tag = "sweets"
)]
pub async fn purchase_sweet(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let service = InventoryService::new(state.db_pool.clone());
    let sweet = service.purchase(id).await?;

    tracing::info!(
        buyer = %user.email,
        sweet_id = id,
        remaining = sweet.quantity,
        "purchased sweet"
    );

    Ok(Json(PurchaseResponse {
        message: "Purchase successful".to_string(),
    }))
}
