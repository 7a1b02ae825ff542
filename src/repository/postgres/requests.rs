//! Item requests repository for database operations

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::AppResult,
    models::request::ItemRequest,
    repository::RequestsRepository,
};

#[derive(Clone)]
pub struct PgRequestsRepository {
    pool: Pool<Postgres>,
}

impl PgRequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn request_from_row(row: &PgRow) -> ItemRequest {
    ItemRequest {
        id: row.get("id"),
        description: row.get("description"),
        requestor_id: row.get("requestor_id"),
        created: row.get("created"),
    }
}

#[async_trait]
impl RequestsRepository for PgRequestsRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<ItemRequest>> {
        let row = sqlx::query(
            "SELECT id, description, requestor_id, created FROM item_requests WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(request_from_row))
    }

    async fn create(
        &self,
        requestor_id: i64,
        description: String,
        created: NaiveDateTime,
    ) -> AppResult<ItemRequest> {
        let row = sqlx::query(
            "INSERT INTO item_requests (description, requestor_id, created) \
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&description)
        .bind(requestor_id)
        .bind(created)
        .fetch_one(&self.pool)
        .await?;

        Ok(ItemRequest {
            id: row.get("id"),
            description,
            requestor_id,
            created,
        })
    }

    async fn find_by_requestor(&self, requestor_id: i64) -> AppResult<Vec<ItemRequest>> {
        let rows = sqlx::query(
            "SELECT id, description, requestor_id, created FROM item_requests \
             WHERE requestor_id = $1 ORDER BY created DESC",
        )
        .bind(requestor_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(request_from_row).collect())
    }

    async fn find_from_others(
        &self,
        requestor_id: i64,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<ItemRequest>> {
        let rows = sqlx::query(
            "SELECT id, description, requestor_id, created FROM item_requests \
             WHERE requestor_id != $1 ORDER BY created DESC OFFSET $2 LIMIT $3",
        )
        .bind(requestor_id)
        .bind(from)
        .bind(size)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(request_from_row).collect())
    }
}
