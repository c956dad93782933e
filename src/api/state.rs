//! Application state for shared services

use std::sync::Arc;

use crate::domain::{Book, BookRepository, DomainError, GreetingCounter, Isbn};
use crate::infrastructure::book::CachedBookRepository;
use crate::infrastructure::cache::CacheStats;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub book_service: Arc<dyn BookServiceTrait>,
    pub greeting_counter: Arc<GreetingCounter>,
}

impl AppState {
    pub fn new(book_service: Arc<dyn BookServiceTrait>) -> Self {
        Self {
            book_service,
            greeting_counter: Arc::new(GreetingCounter::new()),
        }
    }
}

/// Trait for cached book lookups and cache administration
#[async_trait::async_trait]
pub trait BookServiceTrait: Send + Sync {
    async fn get(&self, isbn: &Isbn) -> Result<Book, DomainError>;
    async fn evict(&self, isbn: &Isbn) -> bool;
    async fn evict_all(&self);
    async fn stats(&self) -> CacheStats;
}

#[async_trait::async_trait]
impl<R: BookRepository + 'static> BookServiceTrait for CachedBookRepository<R> {
    async fn get(&self, isbn: &Isbn) -> Result<Book, DomainError> {
        self.get_by_isbn(isbn).await
    }

    async fn evict(&self, isbn: &Isbn) -> bool {
        self.invalidate(isbn).await
    }

    async fn evict_all(&self) {
        self.invalidate_all().await
    }

    async fn stats(&self) -> CacheStats {
        CachedBookRepository::stats(self).await
    }
}
