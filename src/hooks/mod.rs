//! # Dioxus hooks
//!
//! Bindings between components and the [`QueryClient`](crate::query::QueryClient).
//! The client lives in the dioxus context, so provide it once near the root.
//!
//! ## Example
//!
//! ```rust,no_run
//! use dioxus::prelude::*;
//! use bakery_admin::prelude::*;
//!
//! #[component]
//! fn Products() -> Element {
//!     let api = use_admin_api();
//!     let products = use_query(api.product_list(ProductListParams::default()));
//!     let delete = use_mutation(api.delete_product());
//!
//!     let status = match &*products.read() {
//!         QueryState::Success(page) => format!("{} products", page.len()),
//!         QueryState::Error(error) => error.to_string(),
//!         _ => "Loading...".to_string(),
//!     };
//!
//!     // A page would call this from a click handler
//!     let remove = delete.clone();
//!     use_hook(move || remove.mutate(42));
//!     let pending = if delete.is_pending() { " (deleting)" } else { "" };
//!
//!     rsx! { "{status}{pending}" }
//! }
//! ```

mod context;
mod mutation;
mod query;

pub use context::{
    use_admin_api, use_provide_admin_api, use_provide_query_client, use_query_client,
};
pub use mutation::{UseMutation, use_mutation};
pub use query::{use_invalidate_query, use_query};
