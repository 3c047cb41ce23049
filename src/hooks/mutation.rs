use dioxus::prelude::*;

use super::use_query_client;
use crate::{
    errors::ApiResult,
    query::{Mutation, MutationState, QueryClient},
};

/// Handle returned by [`use_mutation`]
pub struct UseMutation<M: Mutation> {
    mutation: M,
    client: QueryClient,
    state: Signal<MutationState<M::Output>>,
}

impl<M: Mutation> Clone for UseMutation<M> {
    fn clone(&self) -> Self {
        Self {
            mutation: self.mutation.clone(),
            client: self.client.clone(),
            state: self.state,
        }
    }
}

impl<M: Mutation> UseMutation<M> {
    pub fn state(&self) -> Signal<MutationState<M::Output>> {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state.read().is_pending()
    }

    /// Fire and forget. Progress shows up in [`state`](Self::state); toasts
    /// and invalidation are handled by the client.
    pub fn mutate(&self, input: M::Input) {
        let handle = self.clone();
        spawn(async move {
            let _ = handle.mutate_async(input).await;
        });
    }

    /// Run the write and wait for it, e.g. to close a dialog on success
    pub async fn mutate_async(&self, input: M::Input) -> ApiResult<M::Output> {
        let mut state = self.state;
        state.set(MutationState::Pending);
        let result = self.client.mutate(&self.mutation, input).await;
        state.set(result.clone().into());
        result
    }

    pub fn reset(&self) {
        let mut state = self.state;
        state.set(MutationState::Idle);
    }
}

/// Bind a write to the component
pub fn use_mutation<M: Mutation>(mutation: M) -> UseMutation<M> {
    let client = use_query_client();
    let state = use_signal(|| MutationState::Idle);
    UseMutation {
        mutation,
        client,
        state,
    }
}
