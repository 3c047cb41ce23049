//! State: async state enums for queries and mutations
//!
//! This module provides `QueryState`, `MutationState` and the `AsyncState` trait
//! shared by both, so views can treat reads and writes uniformly.

use crate::errors::ApiError;

/// Common trait for async state types that represent loading, success, and error states
pub trait AsyncState {
    /// The type of successful data
    type Data;
    /// The type of error
    type Error;

    /// Returns true if the state is currently loading
    fn is_loading(&self) -> bool;

    /// Returns true if the state contains successful data
    fn is_success(&self) -> bool;

    /// Returns true if the state contains an error
    fn is_error(&self) -> bool;

    /// Returns the data if successful, None otherwise
    fn data(&self) -> Option<&Self::Data>;

    /// Returns the error if failed, None otherwise
    fn error(&self) -> Option<&Self::Error>;
}

/// Represents the state of a read
#[derive(Clone, PartialEq, Debug, Default)]
pub enum QueryState<T, E = ApiError> {
    /// Nothing has been requested yet
    #[default]
    Idle,
    /// A fetch is in flight and nothing is cached
    Loading,
    /// The query resolved with data
    Success(T),
    /// The query failed
    Error(E),
}

impl<T, E> AsyncState for QueryState<T, E> {
    type Data = T;
    type Error = E;

    fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    fn is_success(&self) -> bool {
        matches!(self, QueryState::Success(_))
    }

    fn is_error(&self) -> bool {
        matches!(self, QueryState::Error(_))
    }

    fn data(&self) -> Option<&T> {
        match self {
            QueryState::Success(data) => Some(data),
            _ => None,
        }
    }

    fn error(&self) -> Option<&E> {
        match self {
            QueryState::Error(error) => Some(error),
            _ => None,
        }
    }
}

impl<T, E> QueryState<T, E> {
    /// Returns true if the state is currently loading
    pub fn is_loading(&self) -> bool {
        <Self as AsyncState>::is_loading(self)
    }

    /// Returns true if the state contains successful data
    pub fn is_success(&self) -> bool {
        <Self as AsyncState>::is_success(self)
    }

    /// Returns true if the state contains an error
    pub fn is_error(&self) -> bool {
        <Self as AsyncState>::is_error(self)
    }

    /// Returns the data if successful, None otherwise
    pub fn data(&self) -> Option<&T> {
        <Self as AsyncState>::data(self)
    }

    /// Returns the error if failed, None otherwise
    pub fn error(&self) -> Option<&E> {
        <Self as AsyncState>::error(self)
    }

    /// Maps a QueryState<T, E> to QueryState<U, E> by applying a function to the contained data if successful.
    pub fn map<U, F>(self, op: F) -> QueryState<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            QueryState::Success(data) => QueryState::Success(op(data)),
            QueryState::Error(e) => QueryState::Error(e),
            QueryState::Loading => QueryState::Loading,
            QueryState::Idle => QueryState::Idle,
        }
    }

    /// Maps a QueryState<T, E> to QueryState<T, F> by applying a function to the contained error if failed.
    pub fn map_err<F, O>(self, op: O) -> QueryState<T, F>
    where
        O: FnOnce(E) -> F,
    {
        match self {
            QueryState::Success(data) => QueryState::Success(data),
            QueryState::Error(e) => QueryState::Error(op(e)),
            QueryState::Loading => QueryState::Loading,
            QueryState::Idle => QueryState::Idle,
        }
    }
}

impl<T, E> From<Result<T, E>> for QueryState<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => QueryState::Success(data),
            Err(error) => QueryState::Error(error),
        }
    }
}

/// Represents the state of a write
#[derive(Clone, PartialEq, Debug, Default)]
pub enum MutationState<T, E = ApiError> {
    #[default]
    Idle,
    /// The mutation has been sent and not yet answered
    Pending,
    Success(T),
    Error(E),
}

impl<T, E> AsyncState for MutationState<T, E> {
    type Data = T;
    type Error = E;

    fn is_loading(&self) -> bool {
        matches!(self, MutationState::Pending)
    }

    fn is_success(&self) -> bool {
        matches!(self, MutationState::Success(_))
    }

    fn is_error(&self) -> bool {
        matches!(self, MutationState::Error(_))
    }

    fn data(&self) -> Option<&T> {
        match self {
            MutationState::Success(data) => Some(data),
            _ => None,
        }
    }

    fn error(&self) -> Option<&E> {
        match self {
            MutationState::Error(error) => Some(error),
            _ => None,
        }
    }
}

impl<T, E> MutationState<T, E> {
    pub fn is_pending(&self) -> bool {
        <Self as AsyncState>::is_loading(self)
    }

    pub fn is_success(&self) -> bool {
        <Self as AsyncState>::is_success(self)
    }

    pub fn is_error(&self) -> bool {
        <Self as AsyncState>::is_error(self)
    }
}

impl<T, E> From<Result<T, E>> for MutationState<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => MutationState::Success(data),
            Err(error) => MutationState::Error(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_state_accessors() {
        let state: QueryState<u32> = Ok(3).into();
        assert!(state.is_success());
        assert_eq!(state.data(), Some(&3));
        assert_eq!(state.clone().map(|n| n * 2).data(), Some(&6));

        let state: QueryState<u32> = Err(ApiError::http(500, None)).into();
        assert!(state.is_error());
        assert_eq!(state.error().map(ToString::to_string), Some("HTTP 500".into()));
    }

    #[test]
    fn pending_mutation_counts_as_loading() {
        let state: MutationState<()> = MutationState::Pending;
        assert!(state.is_pending());
        assert!(AsyncState::is_loading(&state));
    }
}
