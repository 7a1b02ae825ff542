//! Gateway item request routes

use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};

use crate::{
    api::requests::PageQuery,
    api::SharerId,
    error::{AppError, AppResult},
};

use super::{check, client::Method, dto::RequestCreateDto, GatewayState};

pub async fn create_request(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    Json(payload): Json<RequestCreateDto>,
) -> AppResult<Response> {
    tracing::info!("POST /requests by user {}", user_id);
    check(&payload)?;

    let body = serde_json::to_value(&payload)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    state
        .client
        .forward(Method::POST, "/requests", Some(user_id), &[], Some(&body))
        .await
}

pub async fn find_own_requests(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
) -> AppResult<Response> {
    tracing::info!("GET /requests by user {}", user_id);
    state
        .client
        .forward(Method::GET, "/requests", Some(user_id), &[], None)
        .await
}

pub async fn find_other_requests(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    Query(page): Query<PageQuery>,
) -> AppResult<Response> {
    tracing::info!("GET /requests/all by user {}", user_id);
    let mut params = Vec::new();
    if let Some(from) = page.from {
        params.push(("from", from.to_string()));
    }
    if let Some(size) = page.size {
        params.push(("size", size.to_string()));
    }
    state
        .client
        .forward(Method::GET, "/requests/all", Some(user_id), &params, None)
        .await
}

pub async fn find_request_by_id(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    Path(request_id): Path<i64>,
) -> AppResult<Response> {
    tracing::info!("GET /requests/{} by user {}", request_id, user_id);
    state
        .client
        .forward(
            Method::GET,
            &format!("/requests/{}", request_id),
            Some(user_id),
            &[],
            None,
        )
        .await
}
