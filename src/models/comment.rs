//! Comment model and related types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Comment as stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub item_id: i64,
    pub author_id: i64,
    pub created: NaiveDateTime,
}

/// Insert payload for the repository
#[derive(Debug, Clone)]
pub struct NewComment {
    pub text: String,
    pub item_id: i64,
    pub author_id: i64,
    pub created: NaiveDateTime,
}

/// Comment creation payload
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateComment {
    pub text: String,
}

/// Comment representation with the author's display name
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentDetails {
    pub id: i64,
    pub text: String,
    pub author_name: String,
    #[serde(with = "crate::models::datetime")]
    pub created: NaiveDateTime,
    pub item_id: i64,
}

impl CommentDetails {
    pub fn from_parts(comment: Comment, author_name: String) -> Self {
        CommentDetails {
            id: comment.id,
            text: comment.text,
            author_name,
            created: comment.created,
            item_id: comment.item_id,
        }
    }
}
