//! Common trait bounds used throughout bakery-admin

/// Bounds for anything a query produces and the cache stores
pub trait QueryData: Clone + PartialEq + Send + Sync + 'static {}
impl<T> QueryData for T where T: Clone + PartialEq + Send + Sync + 'static {}

/// Bounds for a mutation's input
pub trait MutationInput: Send + 'static {}
impl<T> MutationInput for T where T: Send + 'static {}
