//! Item request endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::request::{CreateItemRequest, ItemRequestDetails},
};

use super::SharerId;

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Row offset into the result set
    pub from: Option<i64>,
    /// Maximum number of rows to return
    pub size: Option<i64>,
}

/// Post a wanted-item request
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Request created", body = ItemRequestDetails),
        (status = 404, description = "User not found")
    )
)]
pub async fn create_request(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Json(request): Json<CreateItemRequest>,
) -> AppResult<(StatusCode, Json<ItemRequestDetails>)> {
    let created = state.services.requests.create(user_id, request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// The caller's requests, newest first, with their answers
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    responses(
        (status = 200, description = "The caller's requests", body = Vec<ItemRequestDetails>),
        (status = 404, description = "User not found")
    )
)]
pub async fn find_own_requests(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
) -> AppResult<Json<Vec<ItemRequestDetails>>> {
    let requests = state.services.requests.find_own(user_id).await?;
    Ok(Json(requests))
}

/// Everyone else's requests, newest first, paginated
#[utoipa::path(
    get,
    path = "/requests/all",
    tag = "requests",
    params(PageQuery),
    responses(
        (status = 200, description = "Other users' requests", body = Vec<ItemRequestDetails>),
        (status = 404, description = "User not found")
    )
)]
pub async fn find_other_requests(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Vec<ItemRequestDetails>>> {
    let requests = state
        .services
        .requests
        .find_from_others(user_id, page.from, page.size)
        .await?;
    Ok(Json(requests))
}

/// One request with its answers
#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "requests",
    params(
        ("id" = i64, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request details", body = ItemRequestDetails),
        (status = 404, description = "User or request not found")
    )
)]
pub async fn find_request_by_id(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Path(request_id): Path<i64>,
) -> AppResult<Json<ItemRequestDetails>> {
    let request = state
        .services
        .requests
        .find_by_id(user_id, request_id)
        .await?;
    Ok(Json(request))
}
