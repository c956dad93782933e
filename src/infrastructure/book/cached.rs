use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Book, BookRepository, DomainError, Isbn};
use crate::infrastructure::cache::{CacheStats, ReadThroughCache, ReadThroughCacheConfig};

/// Cache name used in logs, metrics and stats
pub const BOOK_CACHE_NAME: &str = "books";

/// Book repository wrapper that answers repeated lookups from a read-through cache
#[derive(Debug)]
pub struct CachedBookRepository<R: BookRepository> {
    inner: R,
    cache: ReadThroughCache<Isbn, Arc<Book>>,
}

impl<R: BookRepository> CachedBookRepository<R> {
    /// Wraps `inner` with an unbounded, non-expiring cache
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, &ReadThroughCacheConfig::default())
    }

    pub fn with_config(inner: R, config: &ReadThroughCacheConfig) -> Self {
        Self {
            inner,
            cache: ReadThroughCache::with_config(BOOK_CACHE_NAME, config),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Evict a specific book from cache
    pub async fn invalidate(&self, isbn: &Isbn) -> bool {
        self.cache.invalidate(isbn).await
    }

    /// Evict all cached books
    pub async fn invalidate_all(&self) {
        self.cache.invalidate_all().await;
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}

#[async_trait]
impl<R: BookRepository> BookRepository for CachedBookRepository<R> {
    async fn get_by_isbn(&self, isbn: &Isbn) -> Result<Book, DomainError> {
        let loader = async {
            tracing::debug!(
                repository = self.inner.repository_name(),
                isbn = %isbn,
                "Cache miss, fetching book"
            );

            self.inner.get_by_isbn(isbn).await.map(Arc::new)
        };

        let book = self
            .cache
            .get_or_load(isbn.clone(), loader)
            .await
            .map_err(Arc::unwrap_or_clone)?;

        Ok(Book::clone(&book))
    }

    fn repository_name(&self) -> &'static str {
        self.inner.repository_name()
    }
}
