//! Comments repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::AppResult,
    models::comment::{Comment, CommentDetails, NewComment},
    repository::CommentsRepository,
};

#[derive(Clone)]
pub struct PgCommentsRepository {
    pool: Pool<Postgres>,
}

impl PgCommentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentsRepository for PgCommentsRepository {
    async fn create(&self, comment: NewComment) -> AppResult<Comment> {
        let row = sqlx::query(
            "INSERT INTO comments (text, item_id, author_id, created) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&comment.text)
        .bind(comment.item_id)
        .bind(comment.author_id)
        .bind(comment.created)
        .fetch_one(&self.pool)
        .await?;

        Ok(Comment {
            id: row.get("id"),
            text: comment.text,
            item_id: comment.item_id,
            author_id: comment.author_id,
            created: comment.created,
        })
    }

    async fn find_by_item(&self, item_id: i64) -> AppResult<Vec<CommentDetails>> {
        let rows = sqlx::query(
            "SELECT c.id, c.text, c.created, c.item_id, u.name AS author_name \
             FROM comments c \
             JOIN users u ON u.id = c.author_id \
             WHERE c.item_id = $1 \
             ORDER BY c.created",
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| CommentDetails {
                id: row.get("id"),
                text: row.get("text"),
                author_name: row.get("author_name"),
                created: row.get("created"),
                item_id: row.get("item_id"),
            })
            .collect())
    }
}
