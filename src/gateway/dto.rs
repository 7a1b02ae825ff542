//! Gateway request payloads and their shape validation.
//!
//! Only shape is checked here (presence, blankness, e-mail form, future
//! timestamps, length caps); every business rule stays on the server.

use std::borrow::Cow;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(violation("not_blank", "must not be blank"));
    }
    Ok(())
}

fn in_future(value: &NaiveDateTime) -> Result<(), ValidationError> {
    if *value <= chrono::Local::now().naive_local() {
        return Err(violation("future", "must be in the future"));
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreateDto {
    #[validate(required(message = "is required"))]
    pub item_id: Option<i64>,
    #[validate(
        required(message = "is required"),
        custom(function = "in_future", message = "must be in the future")
    )]
    #[serde(default, with = "crate::models::datetime::option")]
    pub start: Option<NaiveDateTime>,
    #[validate(
        required(message = "is required"),
        custom(function = "in_future", message = "must be in the future")
    )]
    #[serde(default, with = "crate::models::datetime::option")]
    pub end: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ItemCreateDto {
    #[validate(
        required(message = "is required"),
        custom(function = "not_blank", message = "must not be blank")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "is required"),
        custom(function = "not_blank", message = "must not be blank")
    )]
    pub description: Option<String>,
    #[validate(required(message = "is required"))]
    pub available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UserCreateDto {
    #[validate(
        required(message = "is required"),
        custom(function = "not_blank", message = "must not be blank")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "is required"),
        email(message = "must be a well-formed email address")
    )]
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CommentCreateDto {
    #[validate(
        required(message = "is required"),
        custom(function = "not_blank", message = "must not be blank"),
        length(max = 2000, message = "must not exceed 2000 characters")
    )]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RequestCreateDto {
    #[validate(
        required(message = "is required"),
        custom(function = "not_blank", message = "must not be blank")
    )]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn in_hours(hours: i64) -> NaiveDateTime {
        chrono::Local::now().naive_local() + Duration::hours(hours)
    }

    fn has_violation<T: Validate>(payload: &T, field: &str) -> bool {
        match payload.validate() {
            Ok(()) => false,
            Err(errors) => errors.field_errors().contains_key(field),
        }
    }

    #[test]
    fn booking_must_name_an_item() {
        let dto = BookingCreateDto {
            item_id: None,
            start: Some(in_hours(2)),
            end: Some(in_hours(24)),
        };
        assert!(has_violation(&dto, "item_id"));
    }

    #[test]
    fn booking_dates_must_be_future() {
        let dto = BookingCreateDto {
            item_id: Some(1),
            start: Some(in_hours(-24)),
            end: Some(in_hours(24)),
        };
        assert!(has_violation(&dto, "start"));

        let dto = BookingCreateDto {
            item_id: Some(1),
            start: Some(in_hours(1)),
            end: Some(in_hours(-1)),
        };
        assert!(has_violation(&dto, "end"));
    }

    #[test]
    fn booking_dates_are_required() {
        let dto = BookingCreateDto {
            item_id: Some(1),
            start: None,
            end: None,
        };
        assert!(has_violation(&dto, "start"));
        assert!(has_violation(&dto, "end"));
    }

    #[test]
    fn valid_booking_passes() {
        let dto = BookingCreateDto {
            item_id: Some(1),
            start: Some(in_hours(2)),
            end: Some(in_hours(24)),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn item_fields_must_be_present_and_non_blank() {
        let dto = ItemCreateDto {
            name: Some("  ".to_string()),
            description: None,
            available: None,
            request_id: None,
        };
        assert!(has_violation(&dto, "name"));
        assert!(has_violation(&dto, "description"));
        assert!(has_violation(&dto, "available"));

        let dto = ItemCreateDto {
            name: Some("Drill".to_string()),
            description: Some("Cordless drill".to_string()),
            available: Some(true),
            request_id: None,
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn user_email_must_be_well_formed() {
        let dto = UserCreateDto {
            name: Some("Ann".to_string()),
            email: Some("not-an-email".to_string()),
        };
        assert!(has_violation(&dto, "email"));

        let dto = UserCreateDto {
            name: Some("Ann".to_string()),
            email: Some("ann@example.com".to_string()),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn comment_text_is_bounded() {
        let dto = CommentCreateDto { text: None };
        assert!(has_violation(&dto, "text"));

        let dto = CommentCreateDto {
            text: Some("x".repeat(2001)),
        };
        assert!(has_violation(&dto, "text"));

        let dto = CommentCreateDto {
            text: Some("Great item".to_string()),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn request_description_must_not_be_blank() {
        let dto = RequestCreateDto {
            description: Some("\t".to_string()),
        };
        assert!(has_violation(&dto, "description"));

        let dto = RequestCreateDto {
            description: Some("Need a ladder".to_string()),
        };
        assert!(dto.validate().is_ok());
    }
}
