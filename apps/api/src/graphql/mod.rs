//! GraphQL schema and resolvers for Red Airlines
//!
//! This module contains the async-graphql schema including:
//! - Query resolvers for flight search and booking lookup
//! - The createBooking mutation
//! - Type definitions whose relationship fields use request-scoped loaders

pub mod loaders;
pub mod mutation;
pub mod pagination;
pub mod query;
pub mod schema;
pub mod types;

pub use loaders::{Loaders, LoadersExt};
pub use schema::{build_schema, RedAirlinesSchema, SchemaBuilder};

use async_graphql::ID;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// Parse a GraphQL ID argument as a UUID
pub(crate) fn parse_id(id: &ID, resource_type: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| {
        ApiError::ValidationError(format!("invalid {} id: {}", resource_type, id.as_str()))
    })
}
