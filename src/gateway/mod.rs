//! Validating gateway: checks payload shape, forwards everything else.
//!
//! The gateway holds no business rules and no storage; a request that
//! passes shape validation is relayed verbatim to the server and the
//! upstream response is returned untouched.

pub mod bookings;
pub mod client;
pub mod dto;
pub mod items;
pub mod requests;
pub mod users;

use axum::Router;
use tower_http::trace::TraceLayer;
use validator::{Validate, ValidationErrors};

use crate::error::{AppError, AppResult};

pub use client::ForwardClient;

/// Gateway state shared across all handlers
#[derive(Clone)]
pub struct GatewayState {
    pub client: ForwardClient,
}

/// Validate a payload, turning violations into a 400 with the standard
/// error body
pub fn check<T: Validate>(payload: &T) -> AppResult<()> {
    payload
        .validate()
        .map_err(|errors| AppError::Validation(describe(&errors)))
}

fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => format!("{}: {}", field, message),
                None => format!("{}: invalid value", field),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

/// Create the gateway router mirroring the server's routes
pub fn create_router(client: ForwardClient) -> Router {
    use axum::routing::{delete, get, patch, post};

    let state = GatewayState { client };

    Router::new()
        // Bookings
        .route("/bookings", post(bookings::create_booking))
        .route("/bookings", get(bookings::find_user_bookings))
        .route("/bookings/owner", get(bookings::find_owner_reserved))
        .route("/bookings/:id", patch(bookings::update_booking))
        .route("/bookings/:id", get(bookings::find_booking_by_id))
        // Items
        .route("/items", post(items::create_item))
        .route("/items", get(items::find_user_items))
        .route("/items/search", get(items::search_items))
        .route("/items/:id", patch(items::update_item))
        .route("/items/:id", get(items::find_item_by_id))
        .route("/items/:id/comment", post(items::create_comment))
        // Item requests
        .route("/requests", post(requests::create_request))
        .route("/requests", get(requests::find_own_requests))
        .route("/requests/all", get(requests::find_other_requests))
        .route("/requests/:id", get(requests::find_request_by_id))
        // Users
        .route("/users", get(users::list_users))
        .route("/users", post(users::create_user))
        .route("/users/:id", get(users::get_user))
        .route("/users/:id", patch(users::update_user))
        .route("/users/:id", delete(users::delete_user))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
