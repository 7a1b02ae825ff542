//! Gateway user routes (no identity header on this surface)

use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};
use serde_json::Value;

use crate::error::{AppError, AppResult};

use super::{check, client::Method, dto::UserCreateDto, GatewayState};

pub async fn list_users(State(state): State<GatewayState>) -> AppResult<Response> {
    tracing::info!("GET /users");
    state
        .client
        .forward(Method::GET, "/users", None, &[], None)
        .await
}

pub async fn get_user(
    State(state): State<GatewayState>,
    Path(user_id): Path<i64>,
) -> AppResult<Response> {
    tracing::info!("GET /users/{}", user_id);
    state
        .client
        .forward(Method::GET, &format!("/users/{}", user_id), None, &[], None)
        .await
}

pub async fn create_user(
    State(state): State<GatewayState>,
    Json(payload): Json<UserCreateDto>,
) -> AppResult<Response> {
    tracing::info!("POST /users");
    check(&payload)?;

    let body = serde_json::to_value(&payload)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    state
        .client
        .forward(Method::POST, "/users", None, &[], Some(&body))
        .await
}

pub async fn update_user(
    State(state): State<GatewayState>,
    Path(user_id): Path<i64>,
    Json(payload): Json<Value>,
) -> AppResult<Response> {
    tracing::info!("PATCH /users/{}", user_id);
    state
        .client
        .forward(
            Method::PATCH,
            &format!("/users/{}", user_id),
            None,
            &[],
            Some(&payload),
        )
        .await
}

pub async fn delete_user(
    State(state): State<GatewayState>,
    Path(user_id): Path<i64>,
) -> AppResult<Response> {
    tracing::info!("DELETE /users/{}", user_id);
    state
        .client
        .forward(
            Method::DELETE,
            &format!("/users/{}", user_id),
            None,
            &[],
            None,
        )
        .await
}
