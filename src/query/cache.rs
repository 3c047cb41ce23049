//! # Query cache
//!
//! A type-erased store for query results, supporting:
//! - **Staleness**: each entry remembers its query's stale window; invalidation
//!   forces an entry stale without dropping the data.
//! - **Garbage collection**: entries unread for longer than their GC window are removed.
//! - **LRU eviction**: least-recently-read entries are evicted above a size limit.
//! - **Prefix invalidation**: one call marks a whole resource family stale.
//!
//! ## Example
//! ```rust,no_run
//! use bakery_admin::query::{QueryCache, QueryKey, QueryOptions};
//! let cache = QueryCache::new();
//! let key = QueryKey::new("categories");
//! cache.set(key.clone(), vec![1, 2, 3], QueryOptions::cached_list());
//! let hit = cache.get::<Vec<i32>>(&key);
//! ```

use std::{
    any::Any,
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicU32, Ordering},
    },
    time::Duration,
};

use super::{QueryKey, QueryOptions};

// Platform-specific time imports
#[cfg(not(target_family = "wasm"))]
use std::time::Instant;
#[cfg(target_family = "wasm")]
use web_time::Instant;

/// Result of a cache read
#[derive(Debug, Clone)]
pub struct CacheGetResult<T> {
    /// The cached data
    pub data: T,
    /// Whether the data is past its stale window or was invalidated
    pub is_stale: bool,
}

/// A type-erased cache entry with timestamp and access tracking
#[derive(Clone)]
pub struct CacheEntry {
    data: Arc<dyn Any + Send + Sync>,
    options: QueryOptions,
    cached_at: Arc<Mutex<Instant>>,
    last_accessed: Arc<Mutex<Instant>>,
    access_count: Arc<AtomicU32>,
    invalidated: Arc<AtomicBool>,
}

impl CacheEntry {
    /// Wrap `data` with the windows of the query that produced it
    pub fn new<T: Clone + Send + Sync + 'static>(data: T, options: QueryOptions) -> Self {
        let now = Instant::now();
        Self {
            data: Arc::new(data),
            options,
            cached_at: Arc::new(Mutex::new(now)),
            last_accessed: Arc::new(Mutex::new(now)),
            access_count: Arc::new(AtomicU32::new(0)),
            invalidated: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Retrieves the cached data of type `T`.
    ///
    /// # Returns
    ///
    /// `None` if the entry holds a different type.
    ///
    /// # Side Effects
    ///
    /// Updates the `last_accessed` timestamp and increments the `access_count`.
    pub fn get<T: Clone + Send + Sync + 'static>(&self) -> Option<T> {
        if let Ok(mut last_accessed) = self.last_accessed.lock() {
            *last_accessed = Instant::now();
        }
        self.access_count.fetch_add(1, Ordering::SeqCst);
        self.data.downcast_ref::<T>().cloned()
    }

    /// Refreshes the cached_at timestamp and clears any invalidation mark.
    pub fn refresh_timestamp(&self) {
        if let Ok(mut cached_at) = self.cached_at.lock() {
            *cached_at = Instant::now();
        }
        self.invalidated.store(false, Ordering::SeqCst);
    }

    /// Marks the entry stale regardless of its age.
    pub fn invalidate(&self) {
        self.invalidated.store(true, Ordering::SeqCst);
    }

    pub fn is_invalidated(&self) -> bool {
        self.invalidated.load(Ordering::SeqCst)
    }

    /// Checks if the entry is stale: invalidated, or older than its stale window.
    pub fn is_stale(&self) -> bool {
        self.is_invalidated() || self.age() >= self.options.stale_time
    }

    pub fn access_count(&self) -> u32 {
        self.access_count.load(Ordering::SeqCst)
    }

    /// Not read for at least `duration`
    pub fn is_unused_for(&self, duration: Duration) -> bool {
        self.time_since_last_access() > duration
    }

    /// Whether the entry has outlived its own GC window
    pub fn is_collectable(&self) -> bool {
        self.is_unused_for(self.options.gc_time)
    }

    pub fn time_since_last_access(&self) -> Duration {
        if let Ok(last_accessed) = self.last_accessed.lock() {
            last_accessed.elapsed()
        } else {
            Duration::from_secs(0)
        }
    }

    /// Gets the age of this cache entry.
    pub fn age(&self) -> Duration {
        if let Ok(cached_at) = self.cached_at.lock() {
            cached_at.elapsed()
        } else {
            Duration::from_secs(0)
        }
    }

    pub fn options(&self) -> QueryOptions {
        self.options
    }
}

/// Shared store of query results keyed by [`QueryKey`]
#[derive(Clone, Default)]
pub struct QueryCache {
    entries: Arc<Mutex<HashMap<QueryKey, CacheEntry>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached result with its staleness. `None` when nothing of type `T` is
    /// cached under `key`.
    pub fn get<T: Clone + Send + Sync + 'static>(&self, key: &QueryKey) -> Option<CacheGetResult<T>> {
        let entries = self.entries.lock().ok()?;
        let entry = entries.get(key)?;
        let data = entry.get::<T>()?;
        Some(CacheGetResult {
            data,
            is_stale: entry.is_stale(),
        })
    }

    /// Stores a value.
    ///
    /// # Returns
    ///
    /// `true` if the stored value changed, `false` if an equal value was already
    /// cached (its timestamp is refreshed and its invalidation mark cleared).
    pub fn set<T: Clone + Send + Sync + PartialEq + 'static>(
        &self,
        key: QueryKey,
        value: T,
        options: QueryOptions,
    ) -> bool {
        let Ok(mut entries) = self.entries.lock() else {
            return false;
        };
        if let Some(existing_entry) = entries.get(&key)
            && existing_entry.options() == options
            && let Some(existing_value) = existing_entry.get::<T>()
            && existing_value == value
        {
            existing_entry.refresh_timestamp();
            crate::debug_log!(
                "⏸️ [CACHE-STORE] Value unchanged for key: {}, refreshing timestamp",
                key
            );
            return false;
        }
        crate::log_cache_store!("Stored data for key: {}", key);
        entries.insert(key, CacheEntry::new(value, options));
        true
    }

    /// Whether anything is cached under `key`
    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries
            .lock()
            .map(|entries| entries.contains_key(key))
            .unwrap_or(false)
    }

    /// Removes a cached result by key.
    pub fn remove(&self, key: &QueryKey) -> bool {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key).is_some()
        } else {
            false
        }
    }

    /// Marks every entry under `prefix` stale.
    ///
    /// # Returns
    ///
    /// The number of entries invalidated.
    pub fn invalidate_prefix(&self, prefix: &QueryKey) -> usize {
        let Ok(entries) = self.entries.lock() else {
            return 0;
        };
        let mut count = 0;
        for (key, entry) in entries.iter() {
            if key.starts_with(prefix) {
                entry.invalidate();
                count += 1;
            }
        }
        crate::log_cache_invalidate!("Invalidated {} entries under {}", count, prefix);
        count
    }

    /// Keys currently cached under `prefix`
    pub fn keys_with_prefix(&self, prefix: &QueryKey) -> Vec<QueryKey> {
        self.entries
            .lock()
            .map(|entries| {
                entries
                    .keys()
                    .filter(|key| key.starts_with(prefix))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Clears all cached results.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            #[cfg(feature = "tracing")]
            let count = entries.len();
            entries.clear();
            #[cfg(feature = "tracing")]
            crate::debug_log!("🗑️ [CACHE-CLEAR] Cleared {} cache entries", count);
        }
    }

    pub fn size(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Removes entries that have not been read within their own GC window.
    ///
    /// # Returns
    ///
    /// The number of entries removed.
    pub fn cleanup_unused_entries(&self) -> usize {
        if let Ok(mut entries) = self.entries.lock() {
            let initial_size = entries.len();
            entries.retain(|_key, entry| {
                let should_keep = !entry.is_collectable();
                #[cfg(feature = "tracing")]
                if !should_keep {
                    crate::debug_log!("🧹 [CACHE-CLEANUP] Removing unused entry: {}", _key);
                }
                should_keep
            });
            let removed = initial_size - entries.len();
            if removed > 0 {
                crate::debug_log!("🧹 [CACHE-CLEANUP] Removed {} unused entries", removed);
            }
            removed
        } else {
            0
        }
    }

    /// Evict least recently read entries until at most `max_size` remain.
    /// Returns how many were evicted.
    pub fn evict_lru_entries(&self, max_size: usize) -> usize {
        if let Ok(mut entries) = self.entries.lock() {
            if entries.len() <= max_size {
                return 0;
            }

            let mut all: Vec<_> = entries.drain().collect();

            // most recently used first
            all.sort_by_key(|(_, entry)| entry.time_since_last_access());
            let evicted = all.split_off(max_size.min(all.len())).len();
            entries.extend(all);

            if evicted > 0 {
                crate::debug_log!(
                    "🗑️ [LRU-EVICT] Evicted {} entries due to cache size limit",
                    evicted
                );
            }
            evicted
        } else {
            0
        }
    }

    /// Runs GC then LRU eviction.
    pub fn maintain(&self, max_size: usize) -> CacheMaintenanceStats {
        CacheMaintenanceStats {
            unused_removed: self.cleanup_unused_entries(),
            lru_evicted: self.evict_lru_entries(max_size),
            final_size: self.size(),
        }
    }

    /// Gets cache statistics.
    pub fn stats(&self) -> CacheStats {
        if let Ok(entries) = self.entries.lock() {
            let mut total_age = Duration::ZERO;
            let mut total_accesses = 0;
            let mut stale_entries = 0;

            for entry in entries.values() {
                total_age += entry.age();
                total_accesses += entry.access_count();
                if entry.is_stale() {
                    stale_entries += 1;
                }
            }

            let entry_count = entries.len();
            let avg_age = if entry_count > 0 {
                total_age / entry_count as u32
            } else {
                Duration::ZERO
            };

            CacheStats {
                entry_count,
                stale_entries,
                total_accesses,
                avg_age,
            }
        } else {
            CacheStats::default()
        }
    }
}

/// Statistics for cache maintenance operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheMaintenanceStats {
    pub unused_removed: usize,
    pub lru_evicted: usize,
    pub final_size: usize,
}

/// General cache statistics
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub entry_count: usize,
    pub stale_entries: usize,
    pub total_accesses: u32,
    pub avg_age: Duration,
}

impl CacheStats {
    pub fn avg_accesses_per_entry(&self) -> f64 {
        if self.entry_count > 0 {
            self.total_accesses as f64 / self.entry_count as f64
        } else {
            0.0
        }
    }
}
