//! API handlers for the LendHub REST endpoints

pub mod bookings;
pub mod health;
pub mod items;
pub mod openapi;
pub mod requests;
pub mod users;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

/// Header carrying the caller's numeric user id. There is no signature or
/// session; the trust boundary is the network perimeter.
pub const USER_ID_HEADER: &str = "X-Sharer-User-Id";

/// Extractor for the caller identity header
pub struct SharerId(pub i64);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for SharerId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::Validation(format!("missing {} header", USER_ID_HEADER))
            })?;

        let id = raw.trim().parse::<i64>().map_err(|_| {
            AppError::Validation(format!("invalid {} header: {}", USER_ID_HEADER, raw))
        })?;

        Ok(SharerId(id))
    }
}
