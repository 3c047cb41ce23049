//! Per-query caching and retry options.

use std::time::Duration;

/// Garbage-collection window for entries whose query sets none
pub const DEFAULT_GC_TIME: Duration = Duration::from_secs(5 * 60);
/// Maximum number of cache entries kept after LRU eviction
pub const DEFAULT_MAX_CACHE_SIZE: usize = 1000;
/// Category and product lists stay fresh this long
pub const LIST_STALE_TIME: Duration = Duration::from_secs(5 * 60);
/// Category and product lists are dropped after this long unused
pub const LIST_GC_TIME: Duration = Duration::from_secs(10 * 60);

/// How a query's result is cached and retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// How long a result is served without refetching. Zero means every read refetches.
    pub stale_time: Duration,
    /// How long an entry survives without being read before maintenance drops it
    pub gc_time: Duration,
    /// Extra attempts after the first failure
    pub retry: u32,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_time: Duration::ZERO,
            gc_time: DEFAULT_GC_TIME,
            retry: 0,
        }
    }
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The window used by category and product list pages
    pub fn cached_list() -> Self {
        Self::new()
            .with_stale_time(LIST_STALE_TIME)
            .with_gc_time(LIST_GC_TIME)
    }

    pub fn with_stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = stale_time;
        self
    }

    pub fn with_gc_time(mut self, gc_time: Duration) -> Self {
        self.gc_time = gc_time;
        self
    }

    pub fn with_retry(mut self, retry: u32) -> Self {
        self.retry = retry;
        self
    }
}

/// Settings for a [`super::QueryClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryClientConfig {
    pub max_entries: usize,
}

impl Default for QueryClientConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_CACHE_SIZE,
        }
    }
}

impl QueryClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }
}
