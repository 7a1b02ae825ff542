//! LendHub — peer-to-peer item sharing backend.
//!
//! Users list items, other users book them for time ranges, and requesters
//! post requests for items they wish existed. The crate builds two
//! binaries: the application server and a thin validating gateway that
//! forwards to it.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
