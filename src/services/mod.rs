//! Business logic services

pub mod bookings;
pub mod items;
pub mod requests;
pub mod users;

use chrono::{NaiveDateTime, Timelike};

use crate::{
    error::{AppError, AppResult},
    models::{item::Item, user::User},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub items: items::ItemsService,
    pub bookings: bookings::BookingsService,
    pub requests: requests::RequestsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            users: users::UsersService::new(repository.clone()),
            items: items::ItemsService::new(repository.clone()),
            bookings: bookings::BookingsService::new(repository.clone()),
            requests: requests::RequestsService::new(repository),
        }
    }
}

/// Current local date-time truncated to whole seconds, the precision every
/// timestamp has on the wire.
pub(crate) fn now() -> NaiveDateTime {
    let now = chrono::Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

pub(crate) async fn require_user(repository: &Repository, user_id: i64) -> AppResult<User> {
    repository
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", user_id)))
}

pub(crate) async fn require_item(repository: &Repository, item_id: i64) -> AppResult<Item> {
    repository
        .items
        .find_by_id(item_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Item with id {} not found", item_id)))
}
