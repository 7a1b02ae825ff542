//! Item (listing) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::booking::BookingRef;
use super::comment::CommentDetails;

/// Item as stored; the owner is immutable after creation
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
    pub request_id: Option<i64>,
}

/// Item representation without owner internals, used inside booking
/// responses, search results and request answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemShort {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
}

impl From<&Item> for ItemShort {
    fn from(item: &Item) -> Self {
        ItemShort {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            available: item.available,
            request_id: item.request_id,
        }
    }
}

/// Item detail view: comments for everyone, booking references only when
/// the caller owns the item
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetails {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
    pub last_booking: Option<BookingRef>,
    pub next_booking: Option<BookingRef>,
    pub comments: Vec<CommentDetails>,
}

impl ItemDetails {
    pub fn from_parts(
        item: &Item,
        last_booking: Option<BookingRef>,
        next_booking: Option<BookingRef>,
        comments: Vec<CommentDetails>,
    ) -> Self {
        ItemDetails {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            available: item.available,
            request_id: item.request_id,
            last_booking,
            next_booking,
            comments,
        }
    }
}

/// Listing creation payload
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
}

/// Partial update payload; absent or blank fields leave the stored value
/// unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

impl Item {
    /// Merge a partial update into an existing item. `None` or blank text
    /// means "leave unchanged"; `available` only changes when present.
    pub fn merged(mut self, patch: UpdateItem) -> Item {
        if let Some(name) = patch.name {
            if !name.trim().is_empty() {
                self.name = name;
            }
        }
        if let Some(description) = patch.description {
            if !description.trim().is_empty() {
                self.description = description;
            }
        }
        if let Some(available) = patch.available {
            self.available = available;
        }
        self
    }
}
