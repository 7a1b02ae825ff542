//! User directory service

use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, UpdateUser, User},
    repository::Repository,
};

use super::require_user;

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn find_all(&self) -> AppResult<Vec<User>> {
        self.repository.users.find_all().await
    }

    pub async fn find_by_id(&self, user_id: i64) -> AppResult<User> {
        require_user(&self.repository, user_id).await
    }

    /// Signup; the email must be unique
    pub async fn create(&self, user: CreateUser) -> AppResult<User> {
        if self.repository.users.email_taken(&user.email, None).await? {
            tracing::warn!("email {} already registered", user.email);
            return Err(AppError::Conflict(
                "the email address is already in use".to_string(),
            ));
        }
        self.repository.users.create(user).await
    }

    /// Partial update; absent or blank fields are kept as-is
    pub async fn update(&self, user_id: i64, patch: UpdateUser) -> AppResult<User> {
        if let Some(email) = patch.email.as_deref() {
            if !email.trim().is_empty()
                && self.repository.users.email_taken(email, Some(user_id)).await?
            {
                tracing::warn!("email {} already registered to another user", email);
                return Err(AppError::Conflict(
                    "the email address is already in use".to_string(),
                ));
            }
        }

        let existing = require_user(&self.repository, user_id).await?;
        self.repository.users.update(&existing.merged(patch)).await
    }

    /// Unconditional and idempotent
    pub async fn delete(&self, user_id: i64) -> AppResult<()> {
        self.repository.users.delete(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    fn service() -> UsersService {
        UsersService::new(Repository::in_memory())
    }

    fn signup(name: &str, email: &str) -> CreateUser {
        CreateUser {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let users = service();
        assert_ok!(users.create(signup("Ann", "ann@example.com")).await);

        let result = users.create(signup("Other Ann", "ann@example.com")).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        // Case differences do not make an email unique
        let result = users.create(signup("Shouty Ann", "ANN@example.com")).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn update_merges_and_checks_other_users_emails() {
        let users = service();
        let ann = users.create(signup("Ann", "ann@example.com")).await.unwrap();
        let bob = users.create(signup("Bob", "bob@example.com")).await.unwrap();

        // Keeping your own email is not a conflict
        let kept = users
            .update(
                ann.id,
                UpdateUser {
                    name: Some("Anna".to_string()),
                    email: Some("ann@example.com".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(kept.name, "Anna");

        // Taking someone else's is
        let result = users
            .update(
                bob.id,
                UpdateUser {
                    name: None,
                    email: Some("ann@example.com".to_string()),
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        // Blank fields leave the stored values unchanged
        let unchanged = users
            .update(
                bob.id,
                UpdateUser {
                    name: Some(String::new()),
                    email: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(unchanged.name, "Bob");
        assert_eq!(unchanged.email, "bob@example.com");
    }

    #[tokio::test]
    async fn update_unknown_user_is_not_found() {
        let users = service();
        let result = users
            .update(
                42,
                UpdateUser {
                    name: Some("Nobody".to_string()),
                    email: None,
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let users = service();
        let ann = users.create(signup("Ann", "ann@example.com")).await.unwrap();

        assert_ok!(users.delete(ann.id).await);
        // Deleting again (or a user that never existed) is fine
        assert_ok!(users.delete(ann.id).await);
        assert_ok!(users.delete(9999).await);

        let result = users.find_by_id(ann.id).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn find_all_lists_everyone() {
        let users = service();
        users.create(signup("Ann", "ann@example.com")).await.unwrap();
        users.create(signup("Bob", "bob@example.com")).await.unwrap();

        let all = users.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
