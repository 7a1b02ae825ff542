//! Storage layer: trait contracts plus Postgres and in-memory backends.
//!
//! Services depend only on the traits; `Repository::postgres` wires the
//! sqlx implementations and `Repository::in_memory` the mutex-guarded
//! tables the unit tests run against. Temporal queries take `now` as a
//! parameter so both backends share exact boundary semantics.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{Pool, Postgres};

use crate::error::AppResult;
use crate::models::{
    booking::{Booking, BookingRecord, BookingState, BookingStatus, NewBooking},
    comment::{Comment, CommentDetails, NewComment},
    item::{CreateItem, Item},
    request::ItemRequest,
    user::{CreateUser, User},
};

#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;
    async fn find_all(&self) -> AppResult<Vec<User>>;
    /// True when another user (excluding `exclude_id`) already has `email`
    async fn email_taken(&self, email: &str, exclude_id: Option<i64>) -> AppResult<bool>;
    async fn create(&self, user: CreateUser) -> AppResult<User>;
    async fn update(&self, user: &User) -> AppResult<User>;
    /// Idempotent; deleting an unknown id is not an error
    async fn delete(&self, id: i64) -> AppResult<()>;
}

#[async_trait]
pub trait ItemsRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Item>>;
    async fn find_by_owner(&self, owner_id: i64) -> AppResult<Vec<Item>>;
    /// Case-insensitive substring search over name and description,
    /// restricted to available items
    async fn search_available(&self, text: &str) -> AppResult<Vec<Item>>;
    async fn find_by_request_ids(&self, request_ids: &[i64]) -> AppResult<Vec<Item>>;
    async fn create(&self, owner_id: i64, item: CreateItem) -> AppResult<Item>;
    async fn update(&self, item: &Item) -> AppResult<Item>;
}

#[async_trait]
pub trait BookingsRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<BookingRecord>>;
    /// Inserts with status WAITING
    async fn create(&self, booking: NewBooking) -> AppResult<Booking>;
    /// Conditional terminal transition: succeeds only while the booking is
    /// still WAITING, returns None otherwise (including a lost race)
    async fn update_status(&self, id: i64, status: BookingStatus)
        -> AppResult<Option<Booking>>;
    /// Bookings made by `booker_id`, filtered by `state`, start descending
    async fn find_by_booker(
        &self,
        booker_id: i64,
        state: BookingState,
        now: NaiveDateTime,
    ) -> AppResult<Vec<BookingRecord>>;
    /// Bookings on items owned by `owner_id`, filtered by `state`, start
    /// descending
    async fn find_by_owner(
        &self,
        owner_id: i64,
        state: BookingState,
        now: NaiveDateTime,
    ) -> AppResult<Vec<BookingRecord>>;
    /// Most recent booking on the item with end < now, latest end first
    async fn last_for_item(&self, item_id: i64, now: NaiveDateTime)
        -> AppResult<Option<Booking>>;
    /// Soonest booking on the item with start > now, earliest start first
    async fn next_for_item(&self, item_id: i64, now: NaiveDateTime)
        -> AppResult<Option<Booking>>;
    /// Most recently ended booking by `booker_id` on `item_id` with
    /// end < now; the comment-eligibility gate
    async fn latest_finished(
        &self,
        booker_id: i64,
        item_id: i64,
        now: NaiveDateTime,
    ) -> AppResult<Option<Booking>>;
}

#[async_trait]
pub trait CommentsRepository: Send + Sync {
    async fn create(&self, comment: NewComment) -> AppResult<Comment>;
    async fn find_by_item(&self, item_id: i64) -> AppResult<Vec<CommentDetails>>;
}

#[async_trait]
pub trait RequestsRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<ItemRequest>>;
    async fn create(
        &self,
        requestor_id: i64,
        description: String,
        created: NaiveDateTime,
    ) -> AppResult<ItemRequest>;
    /// Requests by `requestor_id`, newest first
    async fn find_by_requestor(&self, requestor_id: i64) -> AppResult<Vec<ItemRequest>>;
    /// Requests by everyone else, newest first, `from` offset / `size` limit
    async fn find_from_others(
        &self,
        requestor_id: i64,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<ItemRequest>>;
}

/// Container of storage handles injected into the service layer
#[derive(Clone)]
pub struct Repository {
    pub users: Arc<dyn UsersRepository>,
    pub items: Arc<dyn ItemsRepository>,
    pub bookings: Arc<dyn BookingsRepository>,
    pub comments: Arc<dyn CommentsRepository>,
    pub requests: Arc<dyn RequestsRepository>,
}

impl Repository {
    /// Storage backed by a PostgreSQL pool
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self {
            users: Arc::new(postgres::PgUsersRepository::new(pool.clone())),
            items: Arc::new(postgres::PgItemsRepository::new(pool.clone())),
            bookings: Arc::new(postgres::PgBookingsRepository::new(pool.clone())),
            comments: Arc::new(postgres::PgCommentsRepository::new(pool.clone())),
            requests: Arc::new(postgres::PgRequestsRepository::new(pool)),
        }
    }

    /// Storage backed by in-process tables; used by the unit tests
    pub fn in_memory() -> Self {
        let store = Arc::new(memory::MemoryRepository::default());
        Self {
            users: store.clone(),
            items: store.clone(),
            bookings: store.clone(),
            comments: store.clone(),
            requests: store,
        }
    }
}
