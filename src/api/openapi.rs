//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{bookings, health, items, requests, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LendHub API",
        version = "1.0.0",
        description = "Peer-to-peer item sharing REST API",
        license(name = "MIT")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Bookings
        bookings::create_booking,
        bookings::update_booking,
        bookings::find_booking_by_id,
        bookings::find_user_bookings,
        bookings::find_owner_reserved,
        // Items
        items::create_item,
        items::update_item,
        items::find_item_by_id,
        items::find_user_items,
        items::search_items,
        items::create_comment,
        // Requests
        requests::create_request,
        requests::find_own_requests,
        requests::find_other_requests,
        requests::find_request_by_id,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
    ),
    components(
        schemas(
            // Bookings
            crate::models::booking::BookingDetails,
            crate::models::booking::BookingRef,
            crate::models::booking::BookingStatus,
            crate::models::booking::CreateBooking,
            // Items
            crate::models::item::ItemShort,
            crate::models::item::ItemDetails,
            crate::models::item::CreateItem,
            crate::models::item::UpdateItem,
            // Comments
            crate::models::comment::CommentDetails,
            crate::models::comment::CreateComment,
            // Requests
            crate::models::request::ItemRequestDetails,
            crate::models::request::CreateItemRequest,
            // Users
            crate::models::user::User,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "bookings", description = "Booking lifecycle and listings"),
        (name = "items", description = "Item catalog and comments"),
        (name = "requests", description = "Wanted-item requests"),
        (name = "users", description = "User directory")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
