//! Item and comment endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::{
        comment::{CommentDetails, CreateComment},
        item::{CreateItem, ItemDetails, ItemShort, UpdateItem},
    },
};

use super::SharerId;

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    pub text: Option<String>,
}

/// Create a listing owned by the caller
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created", body = ItemShort),
        (status = 404, description = "User not found")
    )
)]
pub async fn create_item(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Json(request): Json<CreateItem>,
) -> AppResult<(StatusCode, Json<ItemShort>)> {
    let item = state.services.items.create_item(user_id, request).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Partially update a listing (owner only); blank fields are ignored
#[utoipa::path(
    patch,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated", body = ItemShort),
        (status = 400, description = "Caller is not the owner"),
        (status = 404, description = "User or item not found")
    )
)]
pub async fn update_item(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Path(item_id): Path<i64>,
    Json(request): Json<UpdateItem>,
) -> AppResult<Json<ItemShort>> {
    let item = state
        .services
        .items
        .update_item(user_id, item_id, request)
        .await?;
    Ok(Json(item))
}

/// Item detail view; booking references are visible to the owner only
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item details", body = ItemDetails),
        (status = 404, description = "Item not found")
    )
)]
pub async fn find_item_by_id(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Path(item_id): Path<i64>,
) -> AppResult<Json<ItemDetails>> {
    let item = state.services.items.find_item_by_id(user_id, item_id).await?;
    Ok(Json(item))
}

/// The caller's own listings with booking info
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    responses(
        (status = 200, description = "The caller's items", body = Vec<ItemDetails>),
        (status = 404, description = "User not found")
    )
)]
pub async fn find_user_items(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
) -> AppResult<Json<Vec<ItemDetails>>> {
    let items = state.services.items.find_user_items(user_id).await?;
    Ok(Json(items))
}

/// Search available listings by name or description
#[utoipa::path(
    get,
    path = "/items/search",
    tag = "items",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching available items", body = Vec<ItemShort>)
    )
)]
pub async fn search_items(
    State(state): State<crate::AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<ItemShort>>> {
    let items = state
        .services
        .items
        .search(query.text.as_deref().unwrap_or(""))
        .await?;
    Ok(Json(items))
}

/// Comment on an item after a completed rental
#[utoipa::path(
    post,
    path = "/items/{id}/comment",
    tag = "items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    request_body = CreateComment,
    responses(
        (status = 201, description = "Comment created", body = CommentDetails),
        (status = 400, description = "No completed rental by the caller"),
        (status = 404, description = "User or item not found")
    )
)]
pub async fn create_comment(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Path(item_id): Path<i64>,
    Json(request): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<CommentDetails>)> {
    let comment = state
        .services
        .items
        .create_comment(user_id, item_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
