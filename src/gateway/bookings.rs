//! Gateway booking routes

use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};

use crate::{
    api::bookings::{ApprovedQuery, StateQuery},
    api::SharerId,
    error::{AppError, AppResult},
};

use super::{check, client::Method, dto::BookingCreateDto, GatewayState};

pub async fn create_booking(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    Json(payload): Json<BookingCreateDto>,
) -> AppResult<Response> {
    tracing::info!("POST /bookings by user {}", user_id);
    check(&payload)?;

    let body = serde_json::to_value(&payload)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    state
        .client
        .forward(Method::POST, "/bookings", Some(user_id), &[], Some(&body))
        .await
}

pub async fn update_booking(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    Path(booking_id): Path<i64>,
    Query(query): Query<ApprovedQuery>,
) -> AppResult<Response> {
    tracing::info!("PATCH /bookings/{} by user {}", booking_id, user_id);
    state
        .client
        .forward(
            Method::PATCH,
            &format!("/bookings/{}", booking_id),
            Some(user_id),
            &[("approved", query.approved.to_string())],
            None,
        )
        .await
}

pub async fn find_booking_by_id(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    Path(booking_id): Path<i64>,
) -> AppResult<Response> {
    tracing::info!("GET /bookings/{} by user {}", booking_id, user_id);
    state
        .client
        .forward(
            Method::GET,
            &format!("/bookings/{}", booking_id),
            Some(user_id),
            &[],
            None,
        )
        .await
}

pub async fn find_user_bookings(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    Query(query): Query<StateQuery>,
) -> AppResult<Response> {
    tracing::info!("GET /bookings by user {}", user_id);
    let params = state_params(&query);
    state
        .client
        .forward(Method::GET, "/bookings", Some(user_id), &params, None)
        .await
}

pub async fn find_owner_reserved(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    Query(query): Query<StateQuery>,
) -> AppResult<Response> {
    tracing::info!("GET /bookings/owner by user {}", user_id);
    let params = state_params(&query);
    state
        .client
        .forward(Method::GET, "/bookings/owner", Some(user_id), &params, None)
        .await
}

fn state_params(query: &StateQuery) -> Vec<(&'static str, String)> {
    query
        .state
        .as_ref()
        .map(|state| vec![("state", state.clone())])
        .unwrap_or_default()
}
