//! Item request service: wanted-item postings joined with their answers

use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{
        item::ItemShort,
        request::{CreateItemRequest, ItemRequest, ItemRequestDetails},
    },
    repository::Repository,
};

use super::{now, require_user};

pub const DEFAULT_PAGE_SIZE: i64 = 10;

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
}

impl RequestsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn create(
        &self,
        user_id: i64,
        request: CreateItemRequest,
    ) -> AppResult<ItemRequestDetails> {
        let requestor = require_user(&self.repository, user_id).await?;
        let created = self
            .repository
            .requests
            .create(requestor.id, request.description, now())
            .await?;
        Ok(ItemRequestDetails::from_parts(created, Vec::new()))
    }

    /// The caller's own requests, newest first, each with its answers
    pub async fn find_own(&self, user_id: i64) -> AppResult<Vec<ItemRequestDetails>> {
        require_user(&self.repository, user_id).await?;
        let requests = self.repository.requests.find_by_requestor(user_id).await?;
        self.with_answers(requests).await
    }

    /// Everyone else's requests, newest first, offset/limit paginated
    pub async fn find_from_others(
        &self,
        user_id: i64,
        from: Option<i64>,
        size: Option<i64>,
    ) -> AppResult<Vec<ItemRequestDetails>> {
        require_user(&self.repository, user_id).await?;
        let requests = self
            .repository
            .requests
            .find_from_others(
                user_id,
                from.unwrap_or(0),
                size.unwrap_or(DEFAULT_PAGE_SIZE),
            )
            .await?;
        self.with_answers(requests).await
    }

    pub async fn find_by_id(
        &self,
        user_id: i64,
        request_id: i64,
    ) -> AppResult<ItemRequestDetails> {
        require_user(&self.repository, user_id).await?;
        let request = self
            .repository
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Item request with id {} not found", request_id))
            })?;

        let mut details = self.with_answers(vec![request]).await?;
        details
            .pop()
            .ok_or_else(|| AppError::Internal("request vanished while joining answers".to_string()))
    }

    /// Join requests with the items answering them in one batch query
    async fn with_answers(
        &self,
        requests: Vec<ItemRequest>,
    ) -> AppResult<Vec<ItemRequestDetails>> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = requests.iter().map(|r| r.id).collect();
        let items = self.repository.items.find_by_request_ids(&ids).await?;

        let mut by_request: HashMap<i64, Vec<ItemShort>> = HashMap::new();
        for item in &items {
            if let Some(request_id) = item.request_id {
                by_request
                    .entry(request_id)
                    .or_default()
                    .push(ItemShort::from(item));
            }
        }

        Ok(requests
            .into_iter()
            .map(|request| {
                let answers = by_request.remove(&request.id).unwrap_or_default();
                ItemRequestDetails::from_parts(request, answers)
            })
            .collect())
    }
}
