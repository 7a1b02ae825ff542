//! In-memory storage: mutex-guarded id-indexed tables.
//!
//! Shares the trait contracts with the Postgres backend; the unit tests
//! substitute it so business rules run without a database.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingRecord, BookingState, BookingStatus, NewBooking},
        comment::{Comment, CommentDetails, NewComment},
        item::{CreateItem, Item},
        request::ItemRequest,
        user::{CreateUser, User},
    },
    repository::{
        BookingsRepository, CommentsRepository, ItemsRepository, RequestsRepository,
        UsersRepository,
    },
};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    items: BTreeMap<i64, Item>,
    bookings: BTreeMap<i64, Booking>,
    comments: BTreeMap<i64, Comment>,
    requests: BTreeMap<i64, ItemRequest>,
    sequence: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.sequence += 1;
        self.sequence
    }

    fn record(&self, booking: &Booking) -> AppResult<BookingRecord> {
        let item = self
            .items
            .get(&booking.item_id)
            .cloned()
            .ok_or_else(|| AppError::Internal(format!("missing item {}", booking.item_id)))?;
        let booker = self
            .users
            .get(&booking.booker_id)
            .cloned()
            .ok_or_else(|| AppError::Internal(format!("missing user {}", booking.booker_id)))?;
        Ok(BookingRecord {
            booking: booking.clone(),
            item,
            booker,
        })
    }
}

#[derive(Default)]
pub struct MemoryRepository {
    tables: Mutex<Tables>,
}

impl MemoryRepository {
    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn state_matches(booking: &Booking, state: BookingState, now: NaiveDateTime) -> bool {
    match state {
        BookingState::All => true,
        BookingState::Current => booking.start_date <= now && now <= booking.end_date,
        BookingState::Past => booking.end_date < now,
        BookingState::Future => booking.start_date > now,
        BookingState::Waiting => booking.status == BookingStatus::Waiting,
        BookingState::Rejected => booking.status == BookingStatus::Rejected,
    }
}

#[async_trait]
impl UsersRepository for MemoryRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.tables().users.get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.tables().users.values().cloned().collect())
    }

    async fn email_taken(&self, email: &str, exclude_id: Option<i64>) -> AppResult<bool> {
        Ok(self.tables().users.values().any(|user| {
            user.email.eq_ignore_ascii_case(email) && Some(user.id) != exclude_id
        }))
    }

    async fn create(&self, user: CreateUser) -> AppResult<User> {
        let mut tables = self.tables();
        let id = tables.next_id();
        let created = User {
            id,
            name: user.name,
            email: user.email,
        };
        tables.users.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let mut tables = self.tables();
        tables.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.tables().users.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl ItemsRepository for MemoryRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Item>> {
        Ok(self.tables().items.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: i64) -> AppResult<Vec<Item>> {
        Ok(self
            .tables()
            .items
            .values()
            .filter(|item| item.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn search_available(&self, text: &str) -> AppResult<Vec<Item>> {
        let needle = text.to_lowercase();
        Ok(self
            .tables()
            .items
            .values()
            .filter(|item| {
                item.available
                    && (item.name.to_lowercase().contains(&needle)
                        || item.description.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }

    async fn find_by_request_ids(&self, request_ids: &[i64]) -> AppResult<Vec<Item>> {
        Ok(self
            .tables()
            .items
            .values()
            .filter(|item| {
                item.request_id
                    .map(|id| request_ids.contains(&id))
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    async fn create(&self, owner_id: i64, item: CreateItem) -> AppResult<Item> {
        let mut tables = self.tables();
        let id = tables.next_id();
        let created = Item {
            id,
            name: item.name,
            description: item.description,
            available: item.available,
            owner_id,
            request_id: item.request_id,
        };
        tables.items.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, item: &Item) -> AppResult<Item> {
        let mut tables = self.tables();
        tables.items.insert(item.id, item.clone());
        Ok(item.clone())
    }
}

#[async_trait]
impl BookingsRepository for MemoryRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<BookingRecord>> {
        let tables = self.tables();
        tables
            .bookings
            .get(&id)
            .map(|booking| tables.record(booking))
            .transpose()
    }

    async fn create(&self, booking: NewBooking) -> AppResult<Booking> {
        let mut tables = self.tables();
        let id = tables.next_id();
        let created = Booking {
            id,
            start_date: booking.start_date,
            end_date: booking.end_date,
            item_id: booking.item_id,
            booker_id: booking.booker_id,
            status: BookingStatus::Waiting,
        };
        tables.bookings.insert(id, created.clone());
        Ok(created)
    }

    async fn update_status(
        &self,
        id: i64,
        status: BookingStatus,
    ) -> AppResult<Option<Booking>> {
        let mut tables = self.tables();
        match tables.bookings.get_mut(&id) {
            Some(booking) if booking.status == BookingStatus::Waiting => {
                booking.status = status;
                Ok(Some(booking.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn find_by_booker(
        &self,
        booker_id: i64,
        state: BookingState,
        now: NaiveDateTime,
    ) -> AppResult<Vec<BookingRecord>> {
        let tables = self.tables();
        let mut bookings: Vec<&Booking> = tables
            .bookings
            .values()
            .filter(|b| b.booker_id == booker_id && state_matches(b, state, now))
            .collect();
        bookings.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        bookings.into_iter().map(|b| tables.record(b)).collect()
    }

    async fn find_by_owner(
        &self,
        owner_id: i64,
        state: BookingState,
        now: NaiveDateTime,
    ) -> AppResult<Vec<BookingRecord>> {
        let tables = self.tables();
        let mut bookings: Vec<&Booking> = tables
            .bookings
            .values()
            .filter(|b| {
                tables
                    .items
                    .get(&b.item_id)
                    .map(|item| item.owner_id == owner_id)
                    .unwrap_or(false)
                    && state_matches(b, state, now)
            })
            .collect();
        bookings.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        bookings.into_iter().map(|b| tables.record(b)).collect()
    }

    async fn last_for_item(
        &self,
        item_id: i64,
        now: NaiveDateTime,
    ) -> AppResult<Option<Booking>> {
        Ok(self
            .tables()
            .bookings
            .values()
            .filter(|b| b.item_id == item_id && b.end_date < now)
            .max_by_key(|b| b.end_date)
            .cloned())
    }

    async fn next_for_item(
        &self,
        item_id: i64,
        now: NaiveDateTime,
    ) -> AppResult<Option<Booking>> {
        Ok(self
            .tables()
            .bookings
            .values()
            .filter(|b| b.item_id == item_id && b.start_date > now)
            .min_by_key(|b| b.start_date)
            .cloned())
    }

    async fn latest_finished(
        &self,
        booker_id: i64,
        item_id: i64,
        now: NaiveDateTime,
    ) -> AppResult<Option<Booking>> {
        Ok(self
            .tables()
            .bookings
            .values()
            .filter(|b| {
                b.booker_id == booker_id && b.item_id == item_id && b.end_date < now
            })
            .max_by_key(|b| b.end_date)
            .cloned())
    }
}

#[async_trait]
impl CommentsRepository for MemoryRepository {
    async fn create(&self, comment: NewComment) -> AppResult<Comment> {
        let mut tables = self.tables();
        let id = tables.next_id();
        let created = Comment {
            id,
            text: comment.text,
            item_id: comment.item_id,
            author_id: comment.author_id,
            created: comment.created,
        };
        tables.comments.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_item(&self, item_id: i64) -> AppResult<Vec<CommentDetails>> {
        let tables = self.tables();
        let mut comments: Vec<&Comment> = tables
            .comments
            .values()
            .filter(|c| c.item_id == item_id)
            .collect();
        comments.sort_by_key(|c| c.created);
        comments
            .into_iter()
            .map(|c| {
                let author_name = tables
                    .users
                    .get(&c.author_id)
                    .map(|u| u.name.clone())
                    .ok_or_else(|| AppError::Internal(format!("missing user {}", c.author_id)))?;
                Ok(CommentDetails::from_parts(c.clone(), author_name))
            })
            .collect()
    }
}

#[async_trait]
impl RequestsRepository for MemoryRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<ItemRequest>> {
        Ok(self.tables().requests.get(&id).cloned())
    }

    async fn create(
        &self,
        requestor_id: i64,
        description: String,
        created: NaiveDateTime,
    ) -> AppResult<ItemRequest> {
        let mut tables = self.tables();
        let id = tables.next_id();
        let request = ItemRequest {
            id,
            description,
            requestor_id,
            created,
        };
        tables.requests.insert(id, request.clone());
        Ok(request)
    }

    async fn find_by_requestor(&self, requestor_id: i64) -> AppResult<Vec<ItemRequest>> {
        let mut requests: Vec<ItemRequest> = self
            .tables()
            .requests
            .values()
            .filter(|r| r.requestor_id == requestor_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(requests)
    }

    async fn find_from_others(
        &self,
        requestor_id: i64,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<ItemRequest>> {
        let mut requests: Vec<ItemRequest> = self
            .tables()
            .requests
            .values()
            .filter(|r| r.requestor_id != requestor_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(requests
            .into_iter()
            .skip(from.max(0) as usize)
            .take(size.max(0) as usize)
            .collect())
    }
}
