//! Book lookup and book cache administration handlers

use std::time::Instant;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::{Book, Isbn};
use crate::infrastructure::cache::CacheStats;

#[derive(Debug, Serialize)]
pub struct EvictionResponse {
    pub isbn: Isbn,
    pub evicted: bool,
}

fn parse_isbn(raw: String) -> Result<Isbn, ApiError> {
    Isbn::new(raw).map_err(|e| ApiError::from(e).with_param("isbn"))
}

/// GET /books/{isbn}
pub async fn get_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<Book>, ApiError> {
    let isbn = parse_isbn(isbn)?;
    let start = Instant::now();

    let book = state.book_service.get(&isbn).await?;

    debug!(
        isbn = %isbn,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Book lookup completed"
    );

    Ok(Json(book))
}

/// GET /cache/books/stats
pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.book_service.stats().await)
}

/// DELETE /cache/books/{isbn}
pub async fn evict_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<EvictionResponse>, ApiError> {
    let isbn = parse_isbn(isbn)?;
    let evicted = state.book_service.evict(&isbn).await;

    info!(isbn = %isbn, evicted, "Book cache entry evicted");

    Ok(Json(EvictionResponse { isbn, evicted }))
}

/// DELETE /cache/books
pub async fn evict_all_books(State(state): State<AppState>) -> StatusCode {
    state.book_service.evict_all().await;
    info!("Book cache cleared");

    StatusCode::NO_CONTENT
}
