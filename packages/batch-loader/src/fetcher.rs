//! Bulk fetch contract between the batch loader and storage

use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::hash::Hash;

/// Per-key value shape of an access path
///
/// Single-valued paths use `Option<T>` and collection paths use `Vec<T>`.
/// A key missing from the fetch result is a valid outcome, not an error:
/// its callers receive [`Cardinality::absent`].
pub trait Cardinality: Clone + Send + Sync + 'static {
    /// Value delivered for a key the fetcher returned nothing for
    fn absent() -> Self;
}

impl<T: Clone + Send + Sync + 'static> Cardinality for Option<T> {
    fn absent() -> Self {
        None
    }
}

impl<T: Clone + Send + Sync + 'static> Cardinality for Vec<T> {
    fn absent() -> Self {
        Vec::new()
    }
}

/// One bulk query for one (entity, access path) pair
///
/// `fetch` receives the deduplicated keys of a single batch and returns the
/// values it found, keyed by the same type. Keys may be left out of the map.
/// The whole batch fails or succeeds together: an `Err` is cloned to every
/// caller waiting on the batch.
pub trait BulkFetcher<K>: Send + Sync + 'static
where
    K: Send + Sync + Hash + Eq + Clone + 'static,
{
    /// Value delivered per key
    type Value: Cardinality;

    /// Error shared by every caller of a failed batch
    type Error: Clone + Display + Send + Sync + 'static;

    /// Load the values for `keys`
    ///
    /// The batch loader only calls this with a non-empty slice of distinct
    /// keys, but implementations should still return an empty map for an
    /// empty slice rather than issuing a malformed query.
    fn fetch(
        &self,
        keys: &[K],
    ) -> impl Future<Output = Result<HashMap<K, Self::Value>, Self::Error>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_absent_is_none() {
        assert_eq!(<Option<u32> as Cardinality>::absent(), None);
    }

    #[test]
    fn test_vec_absent_is_empty() {
        assert!(<Vec<u32> as Cardinality>::absent().is_empty());
    }
}
