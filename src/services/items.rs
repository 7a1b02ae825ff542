//! Item catalog service: listings, detail views, search and comments

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::BookingRef,
        comment::{CommentDetails, CreateComment, NewComment},
        item::{CreateItem, Item, ItemDetails, ItemShort, UpdateItem},
    },
    repository::Repository,
};

use super::{now, require_item, require_user};

#[derive(Clone)]
pub struct ItemsService {
    repository: Repository,
}

impl ItemsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a listing owned by the caller
    pub async fn create_item(&self, user_id: i64, item: CreateItem) -> AppResult<ItemShort> {
        let owner = require_user(&self.repository, user_id).await?;
        let created = self.repository.items.create(owner.id, item).await?;
        Ok(ItemShort::from(&created))
    }

    /// Partial update; only the owner may change a listing
    pub async fn update_item(
        &self,
        user_id: i64,
        item_id: i64,
        patch: UpdateItem,
    ) -> AppResult<ItemShort> {
        require_user(&self.repository, user_id).await?;
        let item = require_item(&self.repository, item_id).await?;

        if item.owner_id != user_id {
            tracing::warn!("user {} may not update item {}", user_id, item_id);
            return Err(AppError::Validation(
                "only the owner may update an item".to_string(),
            ));
        }

        let updated = self.repository.items.update(&item.merged(patch)).await?;
        Ok(ItemShort::from(&updated))
    }

    /// Detail view: comments for everyone, last/next booking references for
    /// the owner only
    pub async fn find_item_by_id(&self, user_id: i64, item_id: i64) -> AppResult<ItemDetails> {
        let item = require_item(&self.repository, item_id).await?;
        self.details_for(&item, user_id).await
    }

    /// The caller's own listings, each with its booking info
    pub async fn find_user_items(&self, user_id: i64) -> AppResult<Vec<ItemDetails>> {
        require_user(&self.repository, user_id).await?;
        let items = self.repository.items.find_by_owner(user_id).await?;

        let mut details = Vec::with_capacity(items.len());
        for item in &items {
            details.push(self.details_for(item, user_id).await?);
        }
        Ok(details)
    }

    /// Text search over available listings; a blank query matches nothing
    pub async fn search(&self, text: &str) -> AppResult<Vec<ItemShort>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let items = self.repository.items.search_available(text).await?;
        Ok(items.iter().map(ItemShort::from).collect())
    }

    /// Leave a comment on an item; only allowed after a completed rental
    pub async fn create_comment(
        &self,
        user_id: i64,
        item_id: i64,
        comment: CreateComment,
    ) -> AppResult<CommentDetails> {
        let author = require_user(&self.repository, user_id).await?;
        let item = require_item(&self.repository, item_id).await?;

        let created = now();
        let finished = self
            .repository
            .bookings
            .latest_finished(author.id, item.id, created)
            .await?;
        if finished.is_none() {
            tracing::warn!(
                "user {} has no completed booking on item {}",
                user_id,
                item_id
            );
            return Err(AppError::Validation(
                "comments are allowed only after a completed rental".to_string(),
            ));
        }

        let stored = self
            .repository
            .comments
            .create(NewComment {
                text: comment.text,
                item_id: item.id,
                author_id: author.id,
                created,
            })
            .await?;

        Ok(CommentDetails::from_parts(stored, author.name))
    }

    async fn details_for(&self, item: &Item, user_id: i64) -> AppResult<ItemDetails> {
        let comments = self.repository.comments.find_by_item(item.id).await?;

        if item.owner_id != user_id {
            return Ok(ItemDetails::from_parts(item, None, None, comments));
        }

        let at = now();
        let last = self.repository.bookings.last_for_item(item.id, at).await?;
        let next = self.repository.bookings.next_for_item(item.id, at).await?;

        Ok(ItemDetails::from_parts(
            item,
            last.as_ref().map(BookingRef::from),
            next.as_ref().map(BookingRef::from),
            comments,
        ))
    }
}
