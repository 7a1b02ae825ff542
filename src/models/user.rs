//! User model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// User account, also the wire representation (no sensitive fields exist)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Signup payload
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
}

/// Partial update payload; absent or blank fields leave the stored value
/// unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl User {
    /// Merge a partial update into an existing user. The per-field rule:
    /// `None` or blank means "leave unchanged".
    pub fn merged(mut self, patch: UpdateUser) -> User {
        if let Some(name) = patch.name {
            if !name.trim().is_empty() {
                self.name = name;
            }
        }
        if let Some(email) = patch.email {
            if !email.trim().is_empty() {
                self.email = email;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 1,
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
        }
    }

    #[test]
    fn merged_replaces_present_fields() {
        let updated = user().merged(UpdateUser {
            name: Some("Anna".to_string()),
            email: None,
        });
        assert_eq!(updated.name, "Anna");
        assert_eq!(updated.email, "ann@example.com");
    }

    #[test]
    fn merged_ignores_blank_fields() {
        let updated = user().merged(UpdateUser {
            name: Some("   ".to_string()),
            email: Some(String::new()),
        });
        assert_eq!(updated.name, "Ann");
        assert_eq!(updated.email, "ann@example.com");
    }
}
