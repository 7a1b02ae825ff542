//! Booking endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::booking::{BookingDetails, BookingState, CreateBooking},
};

use super::SharerId;

/// Booking list filter; unknown values fall back to ALL
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StateQuery {
    pub state: Option<String>,
}

impl StateQuery {
    fn parsed(&self) -> BookingState {
        self.state
            .as_deref()
            .map(BookingState::parse)
            .unwrap_or_default()
    }
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApprovedQuery {
    pub approved: bool,
}

/// Create a booking for the calling user
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created in WAITING state", body = BookingDetails),
        (status = 400, description = "Own item, unavailable item or invalid period"),
        (status = 404, description = "User or item not found")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Json(request): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<BookingDetails>)> {
    let booking = state.services.bookings.create_booking(user_id, request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Approve or reject a waiting booking (item owner only)
#[utoipa::path(
    patch,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = i64, Path, description = "Booking ID"),
        ApprovedQuery
    ),
    responses(
        (status = 200, description = "Booking decided", body = BookingDetails),
        (status = 400, description = "Not the owner or already decided"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn update_booking(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Path(booking_id): Path<i64>,
    Query(query): Query<ApprovedQuery>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state
        .services
        .bookings
        .update_status(user_id, booking_id, query.approved)
        .await?;
    Ok(Json(booking))
}

/// Fetch one booking (booker or item owner only)
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = i64, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking details", body = BookingDetails),
        (status = 400, description = "Caller is neither booker nor owner"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn find_booking_by_id(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Path(booking_id): Path<i64>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state
        .services
        .bookings
        .find_booking_by_id(user_id, booking_id)
        .await?;
    Ok(Json(booking))
}

/// List the caller's bookings, most recent start first
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    params(StateQuery),
    responses(
        (status = 200, description = "Bookings made by the caller", body = Vec<BookingDetails>),
        (status = 404, description = "User not found")
    )
)]
pub async fn find_user_bookings(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Query(query): Query<StateQuery>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let bookings = state
        .services
        .bookings
        .find_user_bookings(user_id, query.parsed())
        .await?;
    Ok(Json(bookings))
}

/// List bookings on items the caller owns, most recent start first
#[utoipa::path(
    get,
    path = "/bookings/owner",
    tag = "bookings",
    params(StateQuery),
    responses(
        (status = 200, description = "Bookings on the caller's items", body = Vec<BookingDetails>),
        (status = 404, description = "User not found")
    )
)]
pub async fn find_owner_reserved(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Query(query): Query<StateQuery>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let bookings = state
        .services
        .bookings
        .find_owner_reserved(user_id, query.parsed())
        .await?;
    Ok(Json(bookings))
}
