//! Errors produced by the bulk fetch adapters

use std::sync::Arc;

use thiserror::Error;

/// Why a bulk fetch failed
///
/// Cloned to every caller waiting on the batch, so the sqlx error is shared
/// behind an `Arc` the same way async-graphql loaders report it.
#[derive(Error, Debug, Clone)]
pub enum FetchError {
    /// The query could not be built or its parameters could not be encoded
    #[error("query construction failed: {0}")]
    Construction(String),

    /// The query ran and the database or driver reported a failure
    #[error("query execution failed: {0}")]
    Execution(Arc<sqlx::Error>),
}

impl From<sqlx::Error> for FetchError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Encode(_)
            | sqlx::Error::TypeNotFound { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. } => Self::Construction(err.to_string()),
            other => Self::Execution(Arc::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_pool_timeout_is_execution() {
        let err = FetchError::from(sqlx::Error::PoolTimedOut);
        assert_matches!(err, FetchError::Execution(_));
        assert!(err.to_string().starts_with("query execution failed"));
    }

    #[test]
    fn test_missing_column_is_construction() {
        let err = FetchError::from(sqlx::Error::ColumnNotFound("fare_class".to_string()));
        assert!(err.to_string().contains("fare_class"));
        assert_matches!(err, FetchError::Construction(_));
    }

    #[test]
    fn test_unknown_type_is_construction() {
        let err = FetchError::from(sqlx::Error::TypeNotFound {
            type_name: "fare_class_enum".to_string(),
        });
        assert_matches!(err, FetchError::Construction(_));
    }
}
