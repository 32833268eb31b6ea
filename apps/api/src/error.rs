//! Error handling for the Red Airlines API
//!
//! This module provides a unified error type using thiserror, with an HTTP
//! status class per error and GraphQL error codes via async-graphql's
//! ErrorExtensions.

use async_graphql::ErrorExtensions;
use axum::http::StatusCode;
use red_airlines_batch_loader::LoadError;
use thiserror::Error;

use crate::graphql::loaders::FetchError;

/// Main API error type
#[derive(Error, Debug)]
pub enum ApiError {
    // ========== Resource Errors ==========
    /// Requested resource not found
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Request conflicts with the current state (e.g., sold-out fare)
    #[error("conflict: {0}")]
    Conflict(String),

    // ========== Validation Errors ==========
    /// Request validation failed
    #[error("validation error: {0}")]
    ValidationError(String),

    // ========== Database Errors ==========
    /// Database query failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Batched lookup failed or was cancelled
    #[error("{0}")]
    Load(#[from] LoadError<FetchError>),

    /// Request exceeded its deadline
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    // ========== Internal Errors ==========
    /// Internal server error (catch-all for unexpected errors)
    #[error("internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::Timeout(_) | Self::Load(LoadError::Cancelled) => StatusCode::REQUEST_TIMEOUT,
            Self::Database(_)
            | Self::Load(LoadError::Fetch(_) | LoadError::Aborted)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for client-side handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Load(LoadError::Cancelled) => "CANCELLED",
            Self::Load(LoadError::Fetch(FetchError::Construction(_))) => {
                "QUERY_CONSTRUCTION_ERROR"
            }
            Self::Load(LoadError::Fetch(FetchError::Execution(_))) => "DATABASE_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Load(LoadError::Aborted) | Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Create a not found error for a specific resource
    pub fn not_found(resource_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Message safe to show to clients
    ///
    /// Server errors are reported by code only; details stay in the logs.
    pub fn public_message(&self) -> String {
        if self.status_code().is_server_error() {
            "An unexpected error occurred".to_string()
        } else {
            self.to_string()
        }
    }

    /// Log the error with appropriate severity based on status code
    pub fn log(&self) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Server error occurred"
            );
        } else {
            tracing::debug!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Client error"
            );
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        self.log();
        let code = self.error_code();
        async_graphql::Error::new(self.public_message()).extend_with(|_, e| e.set("code", code))
    }
}

/// Convert anything that maps onto [`ApiError`] into a GraphQL field error
pub fn to_graphql_error(error: impl Into<ApiError>) -> async_graphql::Error {
    error.into().extend()
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
