//! # Query and mutation layer
//!
//! Reads go through [`QueryClient::fetch_query`], which serves fresh cache hits,
//! coalesces concurrent identical reads into one request and toasts failures.
//! Writes go through [`QueryClient::mutate`], which invalidates the declared key
//! prefixes only when the write succeeds.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bakery_admin::prelude::*;
//!
//! # async fn run(api: AdminApi) -> ApiResult<()> {
//! let page = api
//!     .client()
//!     .fetch_query(&api.product_list(ProductListParams::default()))
//!     .await?;
//! api.client().mutate(&api.delete_product(), page.data[0].id).await?;
//! # Ok(())
//! # }
//! ```

mod cache;
mod client;
mod key;
mod notify;
mod options;
mod state;

pub use cache::{CacheEntry, CacheGetResult, CacheMaintenanceStats, CacheStats, QueryCache};
pub use client::QueryClient;
pub use key::QueryKey;
pub use notify::{LogNotifier, Notifier, Toast, ToastKind, ToastQueue};
pub use options::{
    DEFAULT_GC_TIME, DEFAULT_MAX_CACHE_SIZE, LIST_GC_TIME, LIST_STALE_TIME, QueryClientConfig,
    QueryOptions,
};
pub use state::{AsyncState, MutationState, QueryState};

use std::future::Future;

use crate::{
    errors::ApiResult,
    types::{MutationInput, QueryData},
};

/// A cacheable read.
///
/// A query value carries everything needed to perform the read (service handle
/// and parameters), so its [`Query::key`] must capture every parameter that
/// changes the result.
pub trait Query: Clone + Send + Sync + 'static {
    /// The type of data returned on success
    type Output: QueryData;

    /// Cache key; the first segment names the resource family
    fn key(&self) -> QueryKey;

    /// Perform the read
    fn fetch(&self) -> impl Future<Output = ApiResult<Self::Output>> + Send + 'static;

    /// Staleness, GC window and retry policy
    fn options(&self) -> QueryOptions {
        QueryOptions::default()
    }

    /// Toast text used when the error carries no message of its own
    fn error_message(&self) -> &'static str {
        "Failed to load data"
    }
}

/// A write that invalidates cached reads when it succeeds.
pub trait Mutation: Clone + Send + Sync + 'static {
    type Input: MutationInput;
    type Output: Clone + Send + 'static;

    /// Perform the write
    fn mutate(&self, input: Self::Input) -> impl Future<Output = ApiResult<Self::Output>> + Send;

    /// Key prefixes made stale by a successful write with `input`
    fn invalidates(&self, input: &Self::Input) -> Vec<QueryKey>;

    /// Fixed toast shown on success
    fn success_message(&self) -> &'static str;

    /// Toast text used when the error carries no message of its own
    fn error_message(&self) -> &'static str;
}
