//! Read-through cache with single-flight loading, backed by moka

use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use moka::future::Cache as MokaCache;
use serde::Serialize;

use crate::infrastructure::observability::{record_cache_lookup, CacheOutcome};

/// Configuration for a read-through cache
///
/// Both bounds are unset by default: entries never expire and the cache
/// grows without limit for the lifetime of the instance.
#[derive(Debug, Clone, Default)]
pub struct ReadThroughCacheConfig {
    /// Maximum number of entries, evicted by moka's TinyLFU policy when reached
    pub max_capacity: Option<u64>,
    /// Time-to-live applied to every entry
    pub time_to_live: Option<Duration>,
}

impl ReadThroughCacheConfig {
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = Some(capacity);
        self
    }

    pub fn with_time_to_live(mut self, ttl: Duration) -> Self {
        self.time_to_live = Some(ttl);
        self
    }
}

/// Point-in-time view of a cache's counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub name: String,
    /// Lookups answered from a stored or in-flight value
    pub hits: u64,
    /// Loader invocations
    pub loads: u64,
    /// Loader invocations that returned an error
    pub load_failures: u64,
    /// Entries currently stored
    pub entries: u64,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    loads: AtomicU64,
    load_failures: AtomicU64,
}

/// Cache that invokes a loader on miss and stores the result
///
/// Concurrent misses for the same key are coalesced: one caller runs the
/// loader, the others wait for and share its outcome. Errors are handed to
/// every waiter but never stored, so the next lookup retries.
pub struct ReadThroughCache<K, V> {
    name: &'static str,
    entries: MokaCache<K, V>,
    counters: Counters,
}

impl<K, V> ReadThroughCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Creates an unbounded cache with no expiry
    pub fn new(name: &'static str) -> Self {
        Self::with_config(name, &ReadThroughCacheConfig::default())
    }

    pub fn with_config(name: &'static str, config: &ReadThroughCacheConfig) -> Self {
        let mut builder = MokaCache::builder().name(name);

        if let Some(capacity) = config.max_capacity {
            builder = builder.max_capacity(capacity);
        }

        if let Some(ttl) = config.time_to_live {
            builder = builder.time_to_live(ttl);
        }

        Self {
            name,
            entries: builder.build(),
            counters: Counters::default(),
        }
    }

    /// Returns the stored value for `key`, running `loader` only when absent
    ///
    /// `loader` is dropped without being polled on a hit.
    pub async fn get_or_load<F, E>(&self, key: K, loader: F) -> Result<V, Arc<E>>
    where
        F: Future<Output = Result<V, E>>,
        E: fmt::Display + Send + Sync + 'static,
    {
        let name = self.name;
        let counters = &self.counters;

        let tracked = async move {
            counters.loads.fetch_add(1, Ordering::Relaxed);
            let start = Instant::now();
            let result = loader.await;
            let elapsed = start.elapsed();

            match &result {
                Ok(_) => {
                    record_cache_lookup(name, CacheOutcome::Load, Some(elapsed));
                    tracing::debug!(
                        cache = name,
                        duration_ms = elapsed.as_millis() as u64,
                        "Cache miss, value loaded"
                    );
                }
                Err(e) => {
                    counters.load_failures.fetch_add(1, Ordering::Relaxed);
                    record_cache_lookup(name, CacheOutcome::LoadError, Some(elapsed));
                    tracing::warn!(
                        cache = name,
                        error = %e,
                        "Cache load failed, nothing stored"
                    );
                }
            }

            result
        };

        let entry = self.entries.entry(key).or_try_insert_with(tracked).await?;

        if !entry.is_fresh() {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            record_cache_lookup(name, CacheOutcome::Hit, None);
            tracing::debug!(cache = name, "Cache hit");
        }

        Ok(entry.into_value())
    }

    /// Returns the stored value without loading
    pub async fn peek(&self, key: &K) -> Option<V> {
        self.entries.get(key).await
    }

    /// Removes one entry, returning whether it was present
    pub async fn invalidate(&self, key: &K) -> bool {
        self.entries.remove(key).await.is_some()
    }

    /// Removes every entry
    pub async fn invalidate_all(&self) {
        self.entries.invalidate_all();
        self.entries.run_pending_tasks().await;
    }

    pub async fn stats(&self) -> CacheStats {
        self.entries.run_pending_tasks().await;

        CacheStats {
            name: self.name.to_string(),
            hits: self.counters.hits.load(Ordering::Relaxed),
            loads: self.counters.loads.load(Ordering::Relaxed),
            load_failures: self.counters.load_failures.load(Ordering::Relaxed),
            entries: self.entries.entry_count(),
        }
    }
}

impl<K, V> fmt::Debug for ReadThroughCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadThroughCache")
            .field("name", &self.name)
            .field("hits", &self.counters.hits.load(Ordering::Relaxed))
            .field("loads", &self.counters.loads.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
