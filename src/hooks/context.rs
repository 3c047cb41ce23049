use dioxus::prelude::*;

use crate::{queries::AdminApi, query::QueryClient};

/// Provide a query client to every descendant component
pub fn use_provide_query_client(init: impl FnOnce() -> QueryClient) -> QueryClient {
    use_context_provider(init)
}

/// Provide the resource API along with the query client it caches through
pub fn use_provide_admin_api(init: impl FnOnce() -> AdminApi) -> AdminApi {
    let api = use_context_provider(init);
    use_context_provider(|| api.client().clone());
    api
}

/// The query client provided by an ancestor.
///
/// Panics if no ancestor called [`use_provide_query_client`] or [`use_provide_admin_api`].
pub fn use_query_client() -> QueryClient {
    use_context::<QueryClient>()
}

/// The resource API provided by an ancestor
pub fn use_admin_api() -> AdminApi {
    use_context::<AdminApi>()
}
