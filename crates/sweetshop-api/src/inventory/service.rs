//! Inventory service
//!
//! All stock arithmetic happens server-side in single statements. Nothing
//! here reads a quantity and writes it back in a separate round trip, so
//! concurrent purchases and restocks cannot interleave into a lost update
//! or a negative stock level.

use sqlx::SqlitePool;

use super::models::{CreateSweetRequest, SearchSweetsQuery, Sweet, UpdateSweetRequest};
use crate::error::AppError;

pub struct InventoryService {
    db_pool: SqlitePool,
}

impl InventoryService {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    /// Add a new sweet to the inventory.
    pub async fn create(&self, request: CreateSweetRequest) -> Result<Sweet, AppError> {
        if request.price < 0.0 {
            return Err(AppError::BadRequest("Price must be non-negative".to_string()));
        }
        if request.quantity < 0 {
            return Err(AppError::BadRequest(
                "Quantity must be non-negative".to_string(),
            ));
        }

        let sweet = sqlx::query_as::<_, Sweet>(
            "INSERT INTO sweets (name, category, price, quantity, image_url) \
             VALUES (?, ?, ?, ?, ?) \
             RETURNING id, name, category, price, quantity, image_url",
        )
        .bind(&request.name)
        .bind(&request.category)
        .bind(request.price)
        .bind(request.quantity)
        .bind(&request.image_url)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create sweet: {e}")))?;

        Ok(sweet)
    }

    /// Fetch a single sweet by id.
    pub async fn get(&self, id: i64) -> Result<Sweet, AppError> {
        sqlx::query_as::<_, Sweet>(
            "SELECT id, name, category, price, quantity, image_url FROM sweets WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to fetch sweet: {e}")))?
        .ok_or_else(|| AppError::NotFound("Sweet not found".to_string()))
    }

    /// Apply a sparse update. Only the fields present in the patch change.
    pub async fn update(&self, id: i64, patch: UpdateSweetRequest) -> Result<Sweet, AppError> {
        if let Some(price) = patch.price {
            if price < 0.0 {
                return Err(AppError::BadRequest(
                    "Price must be non-negative".to_string(),
                ));
            }
        }
        if let Some(quantity) = patch.quantity {
            if quantity < 0 {
                return Err(AppError::BadRequest(
                    "Quantity must be non-negative".to_string(),
                ));
            }
        }

        let mut sets: Vec<&str> = Vec::new();
        if patch.name.is_some() {
            sets.push("name = ?");
        }
        if patch.category.is_some() {
            sets.push("category = ?");
        }
        if patch.price.is_some() {
            sets.push("price = ?");
        }
        if patch.quantity.is_some() {
            sets.push("quantity = ?");
        }
        if patch.image_url.is_some() {
            sets.push("image_url = ?");
        }

        // An empty patch still has to 404 on an unknown id, so it reads the
        // row instead of updating it.
        if sets.is_empty() {
            return self.get(id).await;
        }

        let sql = format!(
            "UPDATE sweets SET {} WHERE id = ? \
             RETURNING id, name, category, price, quantity, image_url",
            sets.join(", ")
        );

        let mut query = sqlx::query_as::<_, Sweet>(&sql);
        if let Some(name) = &patch.name {
            query = query.bind(name);
        }
        if let Some(category) = &patch.category {
            query = query.bind(category);
        }
        if let Some(price) = patch.price {
            query = query.bind(price);
        }
        if let Some(quantity) = patch.quantity {
            query = query.bind(quantity);
        }
        if let Some(image_url) = &patch.image_url {
            query = query.bind(image_url);
        }

        query
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to update sweet: {e}")))?
            .ok_or_else(|| AppError::NotFound("Sweet not found".to_string()))
    }

    /// Remove a sweet from the inventory.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM sweets WHERE id = ?")
            .bind(id)
            .execute(&self.db_pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete sweet: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Sweet not found".to_string()));
        }

        Ok(())
    }

    /// Increase stock by a positive amount.
    pub async fn restock(&self, id: i64, amount: i64) -> Result<Sweet, AppError> {
        if amount <= 0 {
            return Err(AppError::BadRequest(
                "Restock amount must be positive".to_string(),
            ));
        }

        sqlx::query_as::<_, Sweet>(
            "UPDATE sweets SET quantity = quantity + ? WHERE id = ? \
             RETURNING id, name, category, price, quantity, image_url",
        )
        .bind(amount)
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to restock sweet: {e}")))?
        .ok_or_else(|| AppError::NotFound("Sweet not found".to_string()))
    }

    /// Take one unit of stock. The guard and the decrement are a single
    /// statement, so two buyers can never both take the last unit.
    pub async fn purchase(&self, id: i64) -> Result<Sweet, AppError> {
        let updated = sqlx::query_as::<_, Sweet>(
            "UPDATE sweets SET quantity = quantity - 1 \
             WHERE id = ? AND quantity > 0 \
             RETURNING id, name, category, price, quantity, image_url",
        )
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to purchase sweet: {e}")))?;

        match updated {
            Some(sweet) => Ok(sweet),
            // Zero rows means either no such sweet or none in stock; look
            // again only to pick the right error.
            None => {
                self.get(id).await?;
                Err(AppError::BadRequest("Out of stock".to_string()))
            }
        }
    }

    /// Search the inventory. Absent filters collapse to TRUE through their
    /// NULL binds, so every combination runs the same prepared statement.
    pub async fn search(&self, query: SearchSweetsQuery) -> Result<Vec<Sweet>, AppError> {
        // An empty string is no filter at all.
        let q = query.q.filter(|s| !s.is_empty());
        let category = query.category.filter(|s| !s.is_empty());

        let sweets = sqlx::query_as::<_, Sweet>(
            "SELECT id, name, category, price, quantity, image_url FROM sweets \
             WHERE (?1 IS NULL OR instr(lower(name), lower(?1)) > 0) \
               AND (?2 IS NULL OR instr(lower(category), lower(?2)) > 0) \
               AND (?3 IS NULL OR price >= ?3) \
               AND (?4 IS NULL OR price <= ?4) \
             ORDER BY id",
        )
        .bind(&q)
        .bind(&category)
        .bind(query.price_min)
        .bind(query.price_max)
        .fetch_all(&self.db_pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to search sweets: {e}")))?;

        Ok(sweets)
    }

    /// List the inventory with offset pagination.
    pub async fn list(&self, skip: i64, limit: i64) -> Result<Vec<Sweet>, AppError> {
        let sweets = sqlx::query_as::<_, Sweet>(
            "SELECT id, name, category, price, quantity, image_url FROM sweets \
             ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.db_pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to list sweets: {e}")))?;

        Ok(sweets)
    }
}
