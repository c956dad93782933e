//! Book repository implementations

mod cached;
mod simple;

pub use cached::{CachedBookRepository, BOOK_CACHE_NAME};
pub use simple::{SimpleBookRepository, DEFAULT_DELAY, DEFAULT_TITLE};
