use std::{cell::RefCell, rc::Rc};

use dioxus::prelude::*;
use tokio::sync::broadcast::error::RecvError;

use super::use_query_client;
use crate::query::{Query, QueryKey, QueryState};

/// Subscribe a component to a read.
///
/// Cached data is shown straight away, even when stale, while a fetch runs in
/// the background. A new key (a different page, search or filter) starts a new
/// read, and an invalidation under the current key refetches it.
pub fn use_query<Q: Query>(query: Q) -> Signal<QueryState<Q::Output>> {
    let client = use_query_client();
    let key = query.key();

    let state = use_signal(|| QueryState::<Q::Output>::Idle);
    let mut current_key = use_signal(|| key.clone());
    let mut invalidations = use_signal(|| 0u64);

    // Queries are not comparable; the key decides when to refetch and the
    // latest definition is used for the fetch itself.
    let latest = use_hook(|| Rc::new(RefCell::new(query.clone())));
    *latest.borrow_mut() = query;

    let events_client = client.clone();
    use_hook(move || {
        let mut events = events_client.subscribe();
        spawn(async move {
            loop {
                match events.recv().await {
                    Ok(prefix) => {
                        if current_key.peek().starts_with(&prefix) {
                            *invalidations.write() += 1;
                        }
                    }
                    Err(RecvError::Lagged(_)) => *invalidations.write() += 1,
                    Err(RecvError::Closed) => break,
                }
            }
        })
    });

    use_effect(use_reactive!(|(key, client)| {
        // rerun after each matching invalidation
        let _ = invalidations.read();

        if *current_key.peek() != key {
            current_key.set(key.clone());
        }
        match client.get_query_data::<Q::Output>(&key) {
            Some(cached) => set_if_changed(state, QueryState::Success(cached)),
            None => set_if_changed(state, QueryState::Loading),
        }

        let query = latest.borrow().clone();
        spawn(async move {
            let result = client.fetch_query(&query).await;
            // a newer key owns the state now
            if *current_key.peek() == key {
                set_if_changed(state, result.into());
            }
        });
    }));

    state
}

/// A callback that marks everything under `prefix` stale and refetches mounted reads
pub fn use_invalidate_query(prefix: QueryKey) -> impl Fn() + Clone {
    let client = use_query_client();
    move || client.invalidate(&prefix)
}

fn set_if_changed<T: PartialEq + 'static>(mut signal: Signal<T>, value: T) {
    if *signal.peek() != value {
        signal.set(value);
    }
}
