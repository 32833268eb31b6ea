//! Red Airlines API library
//!
//! This module exposes the core API components for use in integration tests
//! and by the server binary.

pub mod app;
pub mod config;
pub mod error;
pub mod graphql;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use app::build_router;
pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use graphql::{Loaders, LoadersExt, RedAirlinesSchema};
