//! Booking model, lifecycle states, state filters and wire types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::item::{Item, ItemShort};
use super::user::User;

/// Booking lifecycle status. A booking is created WAITING and transitions
/// exactly once to APPROVED or REJECTED; both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(BookingStatus::Waiting),
            "APPROVED" => Ok(BookingStatus::Approved),
            "REJECTED" => Ok(BookingStatus::Rejected),
            other => Err(format!("unknown booking status: {}", other)),
        }
    }
}

/// Listing filter for booking queries. Unknown values fall back to `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingState {
    #[default]
    All,
    /// now is within [start, end], boundaries included
    Current,
    /// end is strictly before now
    Past,
    /// start is strictly after now
    Future,
    Waiting,
    Rejected,
}

impl BookingState {
    pub fn parse(s: &str) -> BookingState {
        match s {
            "CURRENT" => BookingState::Current,
            "PAST" => BookingState::Past,
            "FUTURE" => BookingState::Future,
            "WAITING" => BookingState::Waiting,
            "REJECTED" => BookingState::Rejected,
            _ => BookingState::All,
        }
    }
}

/// Booking as stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: i64,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub item_id: i64,
    pub booker_id: i64,
    pub status: BookingStatus,
}

/// Insert payload for the repository; status is always WAITING on insert
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub item_id: i64,
    pub booker_id: i64,
}

/// Booking joined with its item and booker snapshots
#[derive(Debug, Clone)]
pub struct BookingRecord {
    pub booking: Booking,
    pub item: Item,
    pub booker: User,
}

/// Booking creation payload (server side; the gateway validates shape)
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub item_id: i64,
    #[serde(with = "crate::models::datetime")]
    pub start: NaiveDateTime,
    #[serde(with = "crate::models::datetime")]
    pub end: NaiveDateTime,
}

/// Full booking representation with denormalized item and booker
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingDetails {
    pub id: i64,
    #[serde(with = "crate::models::datetime")]
    pub start: NaiveDateTime,
    #[serde(with = "crate::models::datetime")]
    pub end: NaiveDateTime,
    pub item: ItemShort,
    pub booker: User,
    pub status: BookingStatus,
}

impl From<BookingRecord> for BookingDetails {
    fn from(record: BookingRecord) -> Self {
        BookingDetails {
            id: record.booking.id,
            start: record.booking.start_date,
            end: record.booking.end_date,
            item: ItemShort::from(&record.item),
            booker: record.booker,
            status: record.booking.status,
        }
    }
}

impl BookingDetails {
    pub fn from_parts(booking: Booking, item: &Item, booker: User) -> Self {
        BookingDetails {
            id: booking.id,
            start: booking.start_date,
            end: booking.end_date,
            item: ItemShort::from(item),
            booker,
            status: booking.status,
        }
    }
}

/// Minimal booking reference for the item detail view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingRef {
    pub id: i64,
    pub booker_id: i64,
}

impl From<&Booking> for BookingRef {
    fn from(booking: &Booking) -> Self {
        BookingRef {
            id: booking.id,
            booker_id: booking.booker_id,
        }
    }
}
