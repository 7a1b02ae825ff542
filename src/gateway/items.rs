//! Gateway item and comment routes

use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};
use serde_json::Value;

use crate::{
    api::items::SearchQuery,
    api::SharerId,
    error::{AppError, AppResult},
};

use super::{check, client::Method, dto::{CommentCreateDto, ItemCreateDto}, GatewayState};

pub async fn create_item(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    Json(payload): Json<ItemCreateDto>,
) -> AppResult<Response> {
    tracing::info!("POST /items by user {}", user_id);
    check(&payload)?;

    let body = serde_json::to_value(&payload)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    state
        .client
        .forward(Method::POST, "/items", Some(user_id), &[], Some(&body))
        .await
}

pub async fn update_item(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    Path(item_id): Path<i64>,
    Json(payload): Json<Value>,
) -> AppResult<Response> {
    tracing::info!("PATCH /items/{} by user {}", item_id, user_id);
    state
        .client
        .forward(
            Method::PATCH,
            &format!("/items/{}", item_id),
            Some(user_id),
            &[],
            Some(&payload),
        )
        .await
}

pub async fn find_item_by_id(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    Path(item_id): Path<i64>,
) -> AppResult<Response> {
    tracing::info!("GET /items/{} by user {}", item_id, user_id);
    state
        .client
        .forward(
            Method::GET,
            &format!("/items/{}", item_id),
            Some(user_id),
            &[],
            None,
        )
        .await
}

pub async fn find_user_items(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
) -> AppResult<Response> {
    tracing::info!("GET /items by user {}", user_id);
    state
        .client
        .forward(Method::GET, "/items", Some(user_id), &[], None)
        .await
}

pub async fn search_items(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    Query(query): Query<SearchQuery>,
) -> AppResult<Response> {
    tracing::info!("GET /items/search by user {}", user_id);
    let params = query
        .text
        .as_ref()
        .map(|text| vec![("text", text.clone())])
        .unwrap_or_default();
    state
        .client
        .forward(Method::GET, "/items/search", Some(user_id), &params, None)
        .await
}

pub async fn create_comment(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    Path(item_id): Path<i64>,
    Json(payload): Json<CommentCreateDto>,
) -> AppResult<Response> {
    tracing::info!("POST /items/{}/comment by user {}", item_id, user_id);
    check(&payload)?;

    let body = serde_json::to_value(&payload)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    state
        .client
        .forward(
            Method::POST,
            &format!("/items/{}/comment", item_id),
            Some(user_id),
            &[],
            Some(&body),
        )
        .await
}
