//! The injectable query client: cache, in-flight reads, invalidation events and toasts.

use std::{
    any::Any,
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use futures::{
    FutureExt,
    future::{BoxFuture, Shared},
};
use tokio::sync::broadcast;

use super::{
    CacheMaintenanceStats, CacheStats, LogNotifier, Mutation, Notifier, Query, QueryCache,
    QueryClientConfig, QueryKey, QueryOptions, Toast,
};
use crate::{errors::ApiResult, types::QueryData};

type SharedFetch<T> = Shared<BoxFuture<'static, ApiResult<T>>>;

/// Capacity of the invalidation channel; slow subscribers see `Lagged` and refetch
const EVENT_CAPACITY: usize = 64;

/// Delay before the first retry; doubled for each further attempt
#[cfg(not(target_family = "wasm"))]
const RETRY_BASE_DELAY: Duration = Duration::from_millis(250);

#[cfg(not(target_family = "wasm"))]
const MAX_BACKOFF_DOUBLINGS: u32 = 5;

struct InFlight {
    id: u64,
    /// A `SharedFetch<T>` for the query's output type
    fetch: Box<dyn Any + Send + Sync>,
}

struct Inner {
    cache: QueryCache,
    in_flight: Mutex<HashMap<QueryKey, InFlight>>,
    next_fetch_id: AtomicU64,
    notifier: Arc<dyn Notifier>,
    events: broadcast::Sender<QueryKey>,
    config: QueryClientConfig,
}

/// Shared, cheaply clonable handle to the query cache.
///
/// One client is created at startup and handed to whatever needs it (the dioxus
/// context, controllers, tests); there is no global instance.
#[derive(Clone)]
pub struct QueryClient {
    inner: Arc<Inner>,
}

impl PartialEq for QueryClient {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new(Arc::new(LogNotifier))
    }
}

impl std::fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryClient")
            .field("entries", &self.inner.cache.size())
            .field("config", &self.inner.config)
            .finish()
    }
}

impl QueryClient {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self::with_config(notifier, QueryClientConfig::default())
    }

    pub fn with_config(notifier: Arc<dyn Notifier>, config: QueryClientConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                cache: QueryCache::new(),
                in_flight: Mutex::new(HashMap::new()),
                next_fetch_id: AtomicU64::new(0),
                notifier,
                events,
                config,
            }),
        }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.inner.cache
    }

    pub fn config(&self) -> &QueryClientConfig {
        &self.inner.config
    }

    /// Read through the cache.
    ///
    /// Returns the cached value when it is fresh. Otherwise joins the fetch already
    /// in flight for the same key, or starts one. Failures are toasted once per
    /// fetch, not once per caller, and returned to every caller.
    pub async fn fetch_query<Q: Query>(&self, query: &Q) -> ApiResult<Q::Output> {
        let key = query.key();
        if let Some(hit) = self.inner.cache.get::<Q::Output>(&key)
            && !hit.is_stale
        {
            crate::log_cache_hit!("Serving fresh data for key: {}", key);
            return Ok(hit.data);
        }

        let fetch = self.join_or_start(query, key);
        fetch.await
    }

    /// Whether a fetch for `key` is currently in flight
    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.inner
            .in_flight
            .lock()
            .map(|in_flight| in_flight.contains_key(key))
            .unwrap_or(false)
    }

    fn join_or_start<Q: Query>(&self, query: &Q, key: QueryKey) -> SharedFetch<Q::Output> {
        let Ok(mut in_flight) = self.inner.in_flight.lock() else {
            return self.start_fetch(query.clone(), key, 0);
        };

        if let Some(existing) = in_flight
            .get(&key)
            .and_then(|entry| entry.fetch.downcast_ref::<SharedFetch<Q::Output>>())
        {
            crate::debug_log!("🔄 [REQUEST-DEDUP] Joining in-flight request for key: {}", key);
            return existing.clone();
        }

        crate::debug_log!("🆕 [REQUEST-DEDUP] Starting new request for key: {}", key);
        let id = self.inner.next_fetch_id.fetch_add(1, Ordering::SeqCst) + 1;
        let fetch = self.start_fetch(query.clone(), key.clone(), id);
        in_flight.insert(
            key,
            InFlight {
                id,
                fetch: Box::new(fetch.clone()),
            },
        );
        fetch
    }

    fn start_fetch<Q: Query>(&self, query: Q, key: QueryKey, id: u64) -> SharedFetch<Q::Output> {
        let client = self.clone();
        async move {
            let options = query.options();
            let result = fetch_with_retry(&query, options).await;

            match &result {
                Ok(data) => {
                    client.inner.cache.set(key.clone(), data.clone(), options);
                    if !client.is_registered(&key, id) {
                        // invalidated while running
                        client.inner.cache.invalidate_prefix(&key);
                    }
                }
                Err(error) => {
                    crate::warn_log!("[QUERY] {} failed: {}", key, error);
                    client.notify(Toast::from_error(error, query.error_message()));
                }
            }

            client.finish_fetch(&key, id);
            result
        }
        .boxed()
        .shared()
    }

    /// Whether fetch `id` still owns the in-flight slot for `key`.
    /// Id 0 is an unregistered fetch started when the map was unavailable.
    fn is_registered(&self, key: &QueryKey, id: u64) -> bool {
        id == 0
            || self
                .inner
                .in_flight
                .lock()
                .map(|in_flight| in_flight.get(key).is_some_and(|entry| entry.id == id))
                .unwrap_or(true)
    }

    fn finish_fetch(&self, key: &QueryKey, id: u64) {
        if let Ok(mut in_flight) = self.inner.in_flight.lock()
            && in_flight.get(key).is_some_and(|entry| entry.id == id)
        {
            in_flight.remove(key);
        }
    }

    /// Run a write.
    ///
    /// On success every prefix from [`Mutation::invalidates`] is invalidated and the
    /// fixed success toast is shown. On failure the error is toasted and the cache
    /// is left untouched.
    pub async fn mutate<M: Mutation>(&self, mutation: &M, input: M::Input) -> ApiResult<M::Output> {
        let keys = mutation.invalidates(&input);
        let name = std::any::type_name::<M>();
        crate::log_mutation_start!("Starting {}", name);

        match mutation.mutate(input).await {
            Ok(output) => {
                for key in &keys {
                    self.invalidate(key);
                }
                crate::log_mutation_success!("{} invalidated {} prefixes", name, keys.len());
                self.notify(Toast::success(mutation.success_message()));
                Ok(output)
            }
            Err(error) => {
                crate::log_mutation_error!("{} failed: {}", name, error);
                self.notify(Toast::from_error(&error, mutation.error_message()));
                Err(error)
            }
        }
    }

    /// Mark every entry under `prefix` stale and tell subscribers to refetch.
    ///
    /// Data stays cached until it is replaced, so views keep rendering it while
    /// the refetch runs. Fetches already in flight under `prefix` are detached so
    /// the next read starts a new request.
    pub fn invalidate(&self, prefix: &QueryKey) {
        self.inner.cache.invalidate_prefix(prefix);
        if let Ok(mut in_flight) = self.inner.in_flight.lock() {
            in_flight.retain(|key, _| !key.starts_with(prefix));
        }
        // no receivers is fine
        let _ = self.inner.events.send(prefix.clone());
    }

    /// Invalidation events, one per invalidated prefix
    pub fn subscribe(&self) -> broadcast::Receiver<QueryKey> {
        self.inner.events.subscribe()
    }

    /// Cached data for `key`, fresh or stale
    pub fn get_query_data<T: QueryData>(&self, key: &QueryKey) -> Option<T> {
        self.inner.cache.get::<T>(key).map(|hit| hit.data)
    }

    /// Seed or overwrite a cache entry
    pub fn set_query_data<T: QueryData>(&self, key: QueryKey, data: T, options: QueryOptions) {
        self.inner.cache.set(key, data, options);
    }

    /// Drop every entry under `prefix`
    pub fn remove_queries(&self, prefix: &QueryKey) -> usize {
        let keys = self.inner.cache.keys_with_prefix(prefix);
        keys.iter().filter(|key| self.inner.cache.remove(key)).count()
    }

    /// Drop every cached entry
    pub fn clear(&self) {
        self.inner.cache.clear();
    }

    /// Remove entries unused beyond their GC window, then evict LRU entries over the size cap
    pub fn collect_garbage(&self) -> CacheMaintenanceStats {
        let stats = self.inner.cache.maintain(self.inner.config.max_entries);
        crate::debug_log!(
            "🧹 [CACHE-MAINTAIN] removed {}, evicted {}, {} left",
            stats.unused_removed,
            stats.lru_evicted,
            stats.final_size
        );
        stats
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.cache.stats()
    }

    /// Run [`QueryClient::collect_garbage`] every `interval` on the current tokio runtime
    #[cfg(not(target_family = "wasm"))]
    pub fn spawn_maintenance(&self, interval: Duration) -> tokio::task::JoinHandle<()> {
        let client = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // the first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                client.collect_garbage();
            }
        })
    }
}

/// Forwards to the notifier the client was built with
impl Notifier for QueryClient {
    fn notify(&self, toast: Toast) {
        self.inner.notifier.notify(toast);
    }
}

/// Backoff before retry `attempt` (1-based), doubling from the base delay up to a cap
#[cfg(not(target_family = "wasm"))]
fn retry_delay(attempt: u32) -> Duration {
    let factor = 2u32.saturating_pow(attempt.saturating_sub(1).min(MAX_BACKOFF_DOUBLINGS));
    RETRY_BASE_DELAY.saturating_mul(factor)
}

async fn fetch_with_retry<Q: Query>(query: &Q, options: QueryOptions) -> ApiResult<Q::Output> {
    let mut attempt = 0;
    loop {
        match query.fetch().await {
            Ok(data) => return Ok(data),
            Err(error) if attempt < options.retry && !error.is_local() => {
                attempt += 1;
                crate::debug_log!(
                    "🔁 [RETRY] {} attempt {} after: {}",
                    query.key(),
                    attempt,
                    error
                );
                #[cfg(not(target_family = "wasm"))]
                tokio::time::sleep(retry_delay(attempt)).await;
            }
            Err(error) => return Err(error),
        }
    }
}
