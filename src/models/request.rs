//! Item request ("wanted item") model and related types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::item::ItemShort;

/// Item request as stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRequest {
    pub id: i64,
    pub description: String,
    pub requestor_id: i64,
    pub created: NaiveDateTime,
}

/// Request creation payload
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateItemRequest {
    pub description: String,
}

/// Request representation joined with the items that answer it
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequestDetails {
    pub id: i64,
    pub description: String,
    pub user_id: i64,
    #[serde(with = "crate::models::datetime")]
    pub created: NaiveDateTime,
    pub items: Vec<ItemShort>,
}

impl ItemRequestDetails {
    pub fn from_parts(request: ItemRequest, items: Vec<ItemShort>) -> Self {
        ItemRequestDetails {
            id: request.id,
            description: request.description,
            user_id: request.requestor_id,
            created: request.created,
            items,
        }
    }
}
