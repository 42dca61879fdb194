//! BookTalk - Book Club Social Server
//!
//! A Rust REST API server for book clubs: registration, club membership and
//! roles, shared reading progress, meetings, discussion notes, and book
//! imports from the Open Library catalog.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
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
