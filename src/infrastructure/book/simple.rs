//! Slow book repository simulating a high-latency backend

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{Book, BookRepository, DomainError, Isbn};

/// Title given to every book produced by [`SimpleBookRepository`]
pub const DEFAULT_TITLE: &str = "Some book";

/// Delay applied to every lookup unless configured otherwise
pub const DEFAULT_DELAY: Duration = Duration::from_secs(3);

/// Repository that waits a fixed delay before answering
///
/// Stateless: every call pays the full delay and yields an equal book for
/// an equal ISBN.
#[derive(Debug, Clone)]
pub struct SimpleBookRepository {
    delay: Duration,
    title: String,
}

impl SimpleBookRepository {
    pub fn new(delay: Duration, title: impl Into<String>) -> Self {
        Self {
            delay,
            title: title.into(),
        }
    }
}

impl Default for SimpleBookRepository {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY, DEFAULT_TITLE)
    }
}

#[async_trait]
impl BookRepository for SimpleBookRepository {
    async fn get_by_isbn(&self, isbn: &Isbn) -> Result<Book, DomainError> {
        tracing::debug!(
            isbn = %isbn,
            delay_ms = self.delay.as_millis() as u64,
            "Simulating slow book lookup"
        );

        tokio::time::sleep(self.delay).await;

        Ok(Book::new(isbn.clone(), self.title.clone()))
    }

    fn repository_name(&self) -> &'static str {
        "simple"
    }
}
