//! Items repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::item::{CreateItem, Item},
    repository::ItemsRepository,
};

const ITEM_COLUMNS: &str = "id, name, description, available, owner_id, request_id";

#[derive(Clone)]
pub struct PgItemsRepository {
    pool: Pool<Postgres>,
}

impl PgItemsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemsRepository for PgItemsRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(&format!(
            "SELECT {} FROM items WHERE id = $1",
            ITEM_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    async fn find_by_owner(&self, owner_id: i64) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT {} FROM items WHERE owner_id = $1 ORDER BY id",
            ITEM_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn search_available(&self, text: &str) -> AppResult<Vec<Item>> {
        let pattern = format!("%{}%", text);
        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT {} FROM items \
             WHERE available = TRUE AND (name ILIKE $1 OR description ILIKE $1) \
             ORDER BY id",
            ITEM_COLUMNS
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn find_by_request_ids(&self, request_ids: &[i64]) -> AppResult<Vec<Item>> {
        if request_ids.is_empty() {
            return Ok(Vec::new());
        }
        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT {} FROM items WHERE request_id = ANY($1) ORDER BY id",
            ITEM_COLUMNS
        ))
        .bind(request_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn create(&self, owner_id: i64, item: CreateItem) -> AppResult<Item> {
        let created = sqlx::query_as::<_, Item>(&format!(
            "INSERT INTO items (name, description, available, owner_id, request_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            ITEM_COLUMNS
        ))
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.available)
        .bind(owner_id)
        .bind(item.request_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, item: &Item) -> AppResult<Item> {
        let updated = sqlx::query_as::<_, Item>(&format!(
            "UPDATE items SET name = $2, description = $3, available = $4 \
             WHERE id = $1 RETURNING {}",
            ITEM_COLUMNS
        ))
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.available)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }
}
