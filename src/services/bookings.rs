//! Booking lifecycle and availability queries.
//!
//! A booking is created WAITING against an available item by anyone but
//! the owner, decided exactly once by the owner (approve or reject), and
//! listed per booker or per owner with temporal/status filters.

use crate::{
    error::{AppError, AppResult},
    models::booking::{
        BookingDetails, BookingRecord, BookingState, BookingStatus, CreateBooking, NewBooking,
    },
    repository::Repository,
};

use super::{now, require_item, require_user};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
}

impl BookingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a booking in WAITING state
    pub async fn create_booking(
        &self,
        user_id: i64,
        request: CreateBooking,
    ) -> AppResult<BookingDetails> {
        let booker = require_user(&self.repository, user_id).await?;
        let item = require_item(&self.repository, request.item_id).await?;

        if item.owner_id == user_id {
            tracing::warn!("user {} tried to book own item {}", user_id, item.id);
            return Err(AppError::Validation(
                "the owner cannot book their own item".to_string(),
            ));
        }
        if !item.available {
            tracing::warn!("item {} is not available for booking", item.id);
            return Err(AppError::Validation(
                "the item is not available for booking".to_string(),
            ));
        }
        if request.start >= request.end {
            tracing::warn!(
                "invalid booking period {} .. {} for item {}",
                request.start,
                request.end,
                item.id
            );
            return Err(AppError::Validation(
                "the booking period must start before it ends".to_string(),
            ));
        }

        let booking = self
            .repository
            .bookings
            .create(NewBooking {
                start_date: request.start,
                end_date: request.end,
                item_id: item.id,
                booker_id: booker.id,
            })
            .await?;

        Ok(BookingDetails::from_parts(booking, &item, booker))
    }

    /// Approve or reject a WAITING booking; owner-only, terminal
    pub async fn update_status(
        &self,
        user_id: i64,
        booking_id: i64,
        approved: bool,
    ) -> AppResult<BookingDetails> {
        let record = self.require_booking(booking_id).await?;

        if record.item.owner_id != user_id {
            tracing::warn!(
                "user {} is not the owner of item {} on booking {}",
                user_id,
                record.item.id,
                booking_id
            );
            return Err(AppError::Validation(
                "only the item owner may update a booking".to_string(),
            ));
        }
        if record.booking.status != BookingStatus::Waiting {
            tracing::warn!("booking {} status already set", booking_id);
            return Err(AppError::Validation(
                "the booking has already been approved or rejected".to_string(),
            ));
        }

        let status = if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };

        // The write is conditional on WAITING; losing a concurrent race is
        // the same error as a sequential second decision.
        let updated = self
            .repository
            .bookings
            .update_status(booking_id, status)
            .await?
            .ok_or_else(|| {
                AppError::Validation(
                    "the booking has already been approved or rejected".to_string(),
                )
            })?;

        Ok(BookingDetails::from_parts(
            updated,
            &record.item,
            record.booker,
        ))
    }

    /// Fetch a booking; visible only to the booker and the item owner
    pub async fn find_booking_by_id(
        &self,
        user_id: i64,
        booking_id: i64,
    ) -> AppResult<BookingDetails> {
        require_user(&self.repository, user_id).await?;
        let record = self.require_booking(booking_id).await?;

        if record.item.owner_id != user_id && record.booking.booker_id != user_id {
            tracing::warn!("user {} may not view booking {}", user_id, booking_id);
            return Err(AppError::Validation(
                "the booking is only visible to the booker or the item owner".to_string(),
            ));
        }

        Ok(record.into())
    }

    /// Bookings made by the user, start descending
    pub async fn find_user_bookings(
        &self,
        user_id: i64,
        state: BookingState,
    ) -> AppResult<Vec<BookingDetails>> {
        require_user(&self.repository, user_id).await?;
        let records = self
            .repository
            .bookings
            .find_by_booker(user_id, state, now())
            .await?;
        Ok(records.into_iter().map(BookingDetails::from).collect())
    }

    /// Bookings on items the user owns, start descending
    pub async fn find_owner_reserved(
        &self,
        user_id: i64,
        state: BookingState,
    ) -> AppResult<Vec<BookingDetails>> {
        require_user(&self.repository, user_id).await?;
        let records = self
            .repository
            .bookings
            .find_by_owner(user_id, state, now())
            .await?;
        Ok(records.into_iter().map(BookingDetails::from).collect())
    }

    async fn require_booking(&self, booking_id: i64) -> AppResult<BookingRecord> {
        self.repository
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Booking with id {} not found", booking_id))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tokio_test::{assert_err, assert_ok};

    use crate::models::item::{CreateItem, Item};
    use crate::models::user::{CreateUser, User};
    use crate::services::Services;

    struct Fixture {
        services: Services,
        owner: User,
        booker: User,
        item: Item,
    }

    async fn fixture() -> Fixture {
        let repository = Repository::in_memory();
        let services = Services::new(repository.clone());

        let owner = services
            .users
            .create(CreateUser {
                name: "Owner".to_string(),
                email: "owner@example.com".to_string(),
            })
            .await
            .unwrap();
        let booker = services
            .users
            .create(CreateUser {
                name: "Booker".to_string(),
                email: "booker@example.com".to_string(),
            })
            .await
            .unwrap();
        let item_short = services
            .items
            .create_item(
                owner.id,
                CreateItem {
                    name: "Tent".to_string(),
                    description: "Four person tent".to_string(),
                    available: true,
                    request_id: None,
                },
            )
            .await
            .unwrap();
        let item = repository
            .items
            .find_by_id(item_short.id)
            .await
            .unwrap()
            .unwrap();

        Fixture {
            services,
            owner,
            booker,
            item,
        }
    }

    fn period(start_hours: i64, end_hours: i64) -> (chrono::NaiveDateTime, chrono::NaiveDateTime) {
        let now = super::now();
        (
            now + Duration::hours(start_hours),
            now + Duration::hours(end_hours),
        )
    }

    fn booking_request(item_id: i64, start_hours: i64, end_hours: i64) -> CreateBooking {
        let (start, end) = period(start_hours, end_hours);
        CreateBooking {
            item_id,
            start,
            end,
        }
    }

    fn validation_message(result: AppResult<BookingDetails>) -> String {
        match result {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other.map(|d| d.id)),
        }
    }

    #[tokio::test]
    async fn create_booking_starts_waiting() {
        let f = fixture().await;
        let details = assert_ok!(
            f.services
                .bookings
                .create_booking(f.booker.id, booking_request(f.item.id, 1, 24))
                .await
        );
        assert_eq!(details.status, BookingStatus::Waiting);
        assert_eq!(details.item.id, f.item.id);
        assert_eq!(details.booker.id, f.booker.id);
    }

    #[tokio::test]
    async fn owner_cannot_book_own_item() {
        let f = fixture().await;
        let result = f
            .services
            .bookings
            .create_booking(f.owner.id, booking_request(f.item.id, 1, 24))
            .await;
        let msg = validation_message(result);
        assert!(msg.contains("owner"), "unexpected message: {}", msg);
    }

    #[tokio::test]
    async fn unavailable_item_cannot_be_booked() {
        let f = fixture().await;
        f.services
            .items
            .update_item(
                f.owner.id,
                f.item.id,
                crate::models::item::UpdateItem {
                    available: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let result = f
            .services
            .bookings
            .create_booking(f.booker.id, booking_request(f.item.id, 1, 24))
            .await;
        let msg = validation_message(result);
        assert!(msg.contains("available"), "unexpected message: {}", msg);
    }

    #[tokio::test]
    async fn period_must_start_before_it_ends() {
        let f = fixture().await;

        // start == end
        let result = f
            .services
            .bookings
            .create_booking(f.booker.id, booking_request(f.item.id, 2, 2))
            .await;
        assert_err!(result);

        // start > end
        let result = f
            .services
            .bookings
            .create_booking(f.booker.id, booking_request(f.item.id, 24, 1))
            .await;
        let msg = validation_message(result);
        assert!(msg.contains("period"), "unexpected message: {}", msg);
    }

    #[tokio::test]
    async fn create_booking_requires_existing_parties() {
        let f = fixture().await;

        let result = f
            .services
            .bookings
            .create_booking(9999, booking_request(f.item.id, 1, 24))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        let result = f
            .services
            .bookings
            .create_booking(f.booker.id, booking_request(9999, 1, 24))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn approval_is_terminal() {
        let f = fixture().await;
        let created = f
            .services
            .bookings
            .create_booking(f.booker.id, booking_request(f.item.id, 1, 24))
            .await
            .unwrap();

        let approved = assert_ok!(
            f.services
                .bookings
                .update_status(f.owner.id, created.id, true)
                .await
        );
        assert_eq!(approved.id, created.id);
        assert_eq!(approved.status, BookingStatus::Approved);

        // Second decision fails whatever the flag says
        for flag in [true, false] {
            let result = f
                .services
                .bookings
                .update_status(f.owner.id, created.id, flag)
                .await;
            let msg = validation_message(result);
            assert!(msg.contains("already"), "unexpected message: {}", msg);
        }
    }

    #[tokio::test]
    async fn rejection_is_terminal_too() {
        let f = fixture().await;
        let created = f
            .services
            .bookings
            .create_booking(f.booker.id, booking_request(f.item.id, 1, 24))
            .await
            .unwrap();

        let rejected = f
            .services
            .bookings
            .update_status(f.owner.id, created.id, false)
            .await
            .unwrap();
        assert_eq!(rejected.status, BookingStatus::Rejected);

        assert_err!(
            f.services
                .bookings
                .update_status(f.owner.id, created.id, true)
                .await
        );
    }

    #[tokio::test]
    async fn only_the_owner_decides() {
        let f = fixture().await;
        let created = f
            .services
            .bookings
            .create_booking(f.booker.id, booking_request(f.item.id, 1, 24))
            .await
            .unwrap();

        let result = f
            .services
            .bookings
            .update_status(f.booker.id, created.id, true)
            .await;
        let msg = validation_message(result);
        assert!(msg.contains("owner"), "unexpected message: {}", msg);

        let missing = f.services.bookings.update_status(f.owner.id, 9999, true).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn booking_visible_to_booker_and_owner_only() {
        let f = fixture().await;
        let stranger = f
            .services
            .users
            .create(CreateUser {
                name: "Stranger".to_string(),
                email: "stranger@example.com".to_string(),
            })
            .await
            .unwrap();
        let created = f
            .services
            .bookings
            .create_booking(f.booker.id, booking_request(f.item.id, 1, 24))
            .await
            .unwrap();

        assert_ok!(
            f.services
                .bookings
                .find_booking_by_id(f.booker.id, created.id)
                .await
        );
        assert_ok!(
            f.services
                .bookings
                .find_booking_by_id(f.owner.id, created.id)
                .await
        );

        let result = f
            .services
            .bookings
            .find_booking_by_id(stranger.id, created.id)
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let missing = f
            .services
            .bookings
            .find_booking_by_id(f.booker.id, 9999)
            .await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn listings_require_an_existing_user() {
        let f = fixture().await;
        let result = f
            .services
            .bookings
            .find_user_bookings(9999, BookingState::All)
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        let result = f
            .services
            .bookings
            .find_owner_reserved(9999, BookingState::All)
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn listings_sort_by_start_descending_and_filter_status() {
        let f = fixture().await;
        let early = f
            .services
            .bookings
            .create_booking(f.booker.id, booking_request(f.item.id, 1, 2))
            .await
            .unwrap();
        let late = f
            .services
            .bookings
            .create_booking(f.booker.id, booking_request(f.item.id, 48, 72))
            .await
            .unwrap();

        f.services
            .bookings
            .update_status(f.owner.id, early.id, false)
            .await
            .unwrap();

        let all = f
            .services
            .bookings
            .find_user_bookings(f.booker.id, BookingState::All)
            .await
            .unwrap();
        assert_eq!(
            all.iter().map(|b| b.id).collect::<Vec<_>>(),
            vec![late.id, early.id]
        );

        let waiting = f
            .services
            .bookings
            .find_user_bookings(f.booker.id, BookingState::Waiting)
            .await
            .unwrap();
        assert_eq!(waiting.len(), 1);
        assert_eq!(waiting[0].id, late.id);

        let rejected = f
            .services
            .bookings
            .find_user_bookings(f.booker.id, BookingState::Rejected)
            .await
            .unwrap();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].id, early.id);

        // Owner sees the same bookings through the reserved-items view
        let reserved = f
            .services
            .bookings
            .find_owner_reserved(f.owner.id, BookingState::All)
            .await
            .unwrap();
        assert_eq!(reserved.len(), 2);

        // The booker owns no items, so the owner view is empty, not an error
        let none = f
            .services
            .bookings
            .find_owner_reserved(f.booker.id, BookingState::All)
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn future_filter_excludes_started_bookings() {
        let f = fixture().await;
        // Started an hour ago, still running: CURRENT but not FUTURE
        let running = f
            .services
            .bookings
            .create_booking(f.booker.id, booking_request(f.item.id, -1, 24))
            .await
            .unwrap();
        let upcoming = f
            .services
            .bookings
            .create_booking(f.booker.id, booking_request(f.item.id, 48, 72))
            .await
            .unwrap();

        let future = f
            .services
            .bookings
            .find_user_bookings(f.booker.id, BookingState::Future)
            .await
            .unwrap();
        assert_eq!(future.iter().map(|b| b.id).collect::<Vec<_>>(), vec![upcoming.id]);

        let current = f
            .services
            .bookings
            .find_user_bookings(f.booker.id, BookingState::Current)
            .await
            .unwrap();
        assert_eq!(current.iter().map(|b| b.id).collect::<Vec<_>>(), vec![running.id]);

        let past = f
            .services
            .bookings
            .find_user_bookings(f.booker.id, BookingState::Past)
            .await
            .unwrap();
        assert!(past.is_empty());
    }
}
