//! Inventory models

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A sweet in the shop inventory.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Sweet {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i64,
    pub image_url: Option<String>,
}

/// Request body for creating a sweet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateSweetRequest {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i64,
    pub image_url: Option<String>,
}

/// Request body for updating a sweet. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateSweetRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    pub image_url: Option<String>,
}

/// Request body for restocking a sweet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RestockRequest {
    /// Units to add; must be positive.
    pub amount: i64,
}

/// Response body for a successful purchase.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PurchaseResponse {
    pub message: String,
}

/// Query parameters for searching the inventory. All filters are optional
/// and combine conjunctively.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct SearchSweetsQuery {
    /// Case-insensitive substring match on the name
    pub q: Option<String>,
    /// Case-insensitive substring match on the category
    pub category: Option<String>,
    /// Minimum price, inclusive
    pub price_min: Option<f64>,
    /// Maximum price, inclusive
    pub price_max: Option<f64>,
}

/// Query parameters for listing the inventory.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListSweetsQuery {
    /// Rows to skip
    #[param(default = 0)]
    pub skip: Option<i64>,
    /// Maximum rows to return
    #[param(default = 100)]
    pub limit: Option<i64>,
}
