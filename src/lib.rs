//! Bookshelf
//!
//! A book lookup service demonstrating:
//! - A slow book backend wrapped in a read-through cache with single-flight loading
//! - A numbered greeting endpoint backed by a process-wide counter

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::book::{CachedBookRepository, SimpleBookRepository};

/// Build the slow backend wrapped in its cache, as configured
pub fn create_book_repository(config: &AppConfig) -> CachedBookRepository<SimpleBookRepository> {
    let backend = SimpleBookRepository::new(config.lookup.delay(), config.lookup.title.clone());

    tracing::info!(
        delay_ms = config.lookup.delay_ms,
        max_capacity = ?config.cache.max_capacity,
        time_to_live_secs = ?config.cache.time_to_live_secs,
        "Creating cached book repository"
    );

    CachedBookRepository::with_config(backend, &config.cache.to_cache_config())
}

/// Create the shared application state
pub fn create_app_state(config: &AppConfig) -> AppState {
    AppState::new(Arc::new(create_book_repository(config)))
}
