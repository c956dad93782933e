use async_trait::async_trait;
use std::fmt::Debug;

use super::{Book, Isbn};
use crate::domain::DomainError;

/// Source of book records (slow backends, caching decorators, etc.)
#[async_trait]
pub trait BookRepository: Send + Sync + Debug {
    /// Look up a book by its ISBN
    async fn get_by_isbn(&self, isbn: &Isbn) -> Result<Book, DomainError>;

    /// Get repository name for logging/debugging
    fn repository_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Instrumented repository that counts how often it is called
    #[derive(Debug)]
    pub struct CountingBookRepository {
        title: String,
        delay: Duration,
        failures_remaining: AtomicUsize,
        call_count: AtomicUsize,
    }

    impl CountingBookRepository {
        pub fn new(title: impl Into<String>) -> Self {
            Self {
                title: title.into(),
                delay: Duration::ZERO,
                failures_remaining: AtomicUsize::new(0),
                call_count: AtomicUsize::new(0),
            }
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        /// Fail the next `count` calls before succeeding
        pub fn failing_times(self, count: usize) -> Self {
            self.failures_remaining.store(count, Ordering::SeqCst);
            self
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl BookRepository for CountingBookRepository {
        async fn get_by_isbn(&self, isbn: &Isbn) -> Result<Book, DomainError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let failed = self
                .failures_remaining
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();

            if failed {
                return Err(DomainError::lookup(
                    "counting",
                    format!("backend unavailable for {}", isbn),
                ));
            }

            Ok(Book::new(isbn.clone(), self.title.clone()))
        }

        fn repository_name(&self) -> &'static str {
            "counting"
        }
    }
}
