//! Cache infrastructure - Read-through cache implementation

mod read_through;

pub use read_through::{CacheStats, ReadThroughCache, ReadThroughCacheConfig};
