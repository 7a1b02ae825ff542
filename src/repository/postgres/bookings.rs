//! Bookings repository: lifecycle writes and temporal queries

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingRecord, BookingState, BookingStatus, NewBooking},
        item::Item,
        user::User,
    },
    repository::BookingsRepository,
};

const BOOKING_COLUMNS: &str = "id, start_date, end_date, item_id, booker_id, status";

/// Booking joined with its item and booker, aliased to avoid column clashes
const RECORD_QUERY: &str = r#"
    SELECT b.id, b.start_date, b.end_date, b.status,
           i.id AS item_id, i.name AS item_name, i.description AS item_description,
           i.available AS item_available, i.owner_id AS item_owner_id,
           i.request_id AS item_request_id,
           u.id AS booker_id, u.name AS booker_name, u.email AS booker_email
    FROM bookings b
    JOIN items i ON i.id = b.item_id
    JOIN users u ON u.id = b.booker_id
"#;

#[derive(Clone)]
pub struct PgBookingsRepository {
    pool: Pool<Postgres>,
}

impl PgBookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn find_records(
        &self,
        where_clause: &str,
        scope_id: i64,
        state: BookingState,
        now: NaiveDateTime,
    ) -> AppResult<Vec<BookingRecord>> {
        let (filter, needs_now) = state_filter(state);
        let sql = format!(
            "{} WHERE {}{} ORDER BY b.start_date DESC",
            RECORD_QUERY, where_clause, filter
        );

        let mut query = sqlx::query(&sql).bind(scope_id);
        if needs_now {
            query = query.bind(now);
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(record_from_row).collect()
    }
}

/// SQL fragment for a state filter; `$2` is `now` where the bucket is temporal
fn state_filter(state: BookingState) -> (&'static str, bool) {
    match state {
        BookingState::All => ("", false),
        BookingState::Current => (" AND b.start_date <= $2 AND b.end_date >= $2", true),
        BookingState::Past => (" AND b.end_date < $2", true),
        BookingState::Future => (" AND b.start_date > $2", true),
        BookingState::Waiting => (" AND b.status = 'WAITING'", false),
        BookingState::Rejected => (" AND b.status = 'REJECTED'", false),
    }
}

fn status_from_row(row: &PgRow, column: &str) -> AppResult<BookingStatus> {
    let raw: String = row.get(column);
    raw.parse().map_err(AppError::Internal)
}

fn booking_from_row(row: &PgRow) -> AppResult<Booking> {
    Ok(Booking {
        id: row.get("id"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        item_id: row.get("item_id"),
        booker_id: row.get("booker_id"),
        status: status_from_row(row, "status")?,
    })
}

fn record_from_row(row: &PgRow) -> AppResult<BookingRecord> {
    Ok(BookingRecord {
        booking: Booking {
            id: row.get("id"),
            start_date: row.get("start_date"),
            end_date: row.get("end_date"),
            item_id: row.get("item_id"),
            booker_id: row.get("booker_id"),
            status: status_from_row(row, "status")?,
        },
        item: Item {
            id: row.get("item_id"),
            name: row.get("item_name"),
            description: row.get("item_description"),
            available: row.get("item_available"),
            owner_id: row.get("item_owner_id"),
            request_id: row.get("item_request_id"),
        },
        booker: User {
            id: row.get("booker_id"),
            name: row.get("booker_name"),
            email: row.get("booker_email"),
        },
    })
}

#[async_trait]
impl BookingsRepository for PgBookingsRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<BookingRecord>> {
        let row = sqlx::query(&format!("{} WHERE b.id = $1", RECORD_QUERY))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(record_from_row).transpose()
    }

    async fn create(&self, booking: NewBooking) -> AppResult<Booking> {
        let row = sqlx::query(&format!(
            "INSERT INTO bookings (start_date, end_date, item_id, booker_id, status) \
             VALUES ($1, $2, $3, $4, 'WAITING') RETURNING {}",
            BOOKING_COLUMNS
        ))
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.item_id)
        .bind(booking.booker_id)
        .fetch_one(&self.pool)
        .await?;
        booking_from_row(&row)
    }

    async fn update_status(
        &self,
        id: i64,
        status: BookingStatus,
    ) -> AppResult<Option<Booking>> {
        // Conditional single-row write: a concurrent second decision finds
        // no WAITING row and loses deterministically.
        let row = sqlx::query(&format!(
            "UPDATE bookings SET status = $2 WHERE id = $1 AND status = 'WAITING' \
             RETURNING {}",
            BOOKING_COLUMNS
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(booking_from_row).transpose()
    }

    async fn find_by_booker(
        &self,
        booker_id: i64,
        state: BookingState,
        now: NaiveDateTime,
    ) -> AppResult<Vec<BookingRecord>> {
        self.find_records("b.booker_id = $1", booker_id, state, now)
            .await
    }

    async fn find_by_owner(
        &self,
        owner_id: i64,
        state: BookingState,
        now: NaiveDateTime,
    ) -> AppResult<Vec<BookingRecord>> {
        self.find_records("i.owner_id = $1", owner_id, state, now)
            .await
    }

    async fn last_for_item(
        &self,
        item_id: i64,
        now: NaiveDateTime,
    ) -> AppResult<Option<Booking>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM bookings WHERE item_id = $1 AND end_date < $2 \
             ORDER BY end_date DESC LIMIT 1",
            BOOKING_COLUMNS
        ))
        .bind(item_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(booking_from_row).transpose()
    }

    async fn next_for_item(
        &self,
        item_id: i64,
        now: NaiveDateTime,
    ) -> AppResult<Option<Booking>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM bookings WHERE item_id = $1 AND start_date > $2 \
             ORDER BY start_date ASC LIMIT 1",
            BOOKING_COLUMNS
        ))
        .bind(item_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(booking_from_row).transpose()
    }

    async fn latest_finished(
        &self,
        booker_id: i64,
        item_id: i64,
        now: NaiveDateTime,
    ) -> AppResult<Option<Booking>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM bookings \
             WHERE booker_id = $1 AND item_id = $2 AND end_date < $3 \
             ORDER BY end_date DESC LIMIT 1",
            BOOKING_COLUMNS
        ))
        .bind(booker_id)
        .bind(item_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(booking_from_row).transpose()
    }
}
