//! Errors delivered to loader callers

use thiserror::Error;

/// Outcome of a failed `load`
///
/// Every caller waiting on the same batch receives a clone of the same error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError<E> {
    /// The bulk fetch for the batch failed
    #[error("{0}")]
    Fetch(E),

    /// The owning request was cancelled before the batch resolved
    #[error("batch load cancelled")]
    Cancelled,

    /// The dispatch task died before settling the batch (the fetcher panicked)
    #[error("batch load aborted")]
    Aborted,
}

impl<E> LoadError<E> {
    /// Check whether this error comes from cancellation rather than a failure
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
