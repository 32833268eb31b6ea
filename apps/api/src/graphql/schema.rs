//! GraphQL schema builder for Red Airlines
//!
//! The schema holds process-wide data (repositories). Batch loaders are
//! request-scoped and attached per request by the HTTP handler instead.

use async_graphql::{EmptySubscription, Schema};
use sqlx::PgPool;

use crate::repositories::{BookingRepository, FlightRepository};

use super::mutation::Mutation;
use super::query::Query;

/// The Red Airlines GraphQL schema type
pub type RedAirlinesSchema = Schema<Query, Mutation, EmptySubscription>;

/// Builder for constructing the GraphQL schema with required services
#[derive(Default)]
pub struct SchemaBuilder {
    pool: Option<PgPool>,
}

impl SchemaBuilder {
    /// Create a new schema builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the database pool
    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Build the schema
    ///
    /// Without a pool the schema still builds (useful for SDL export), but
    /// resolvers that need a repository return an error.
    pub fn build(self) -> RedAirlinesSchema {
        let mut builder = Schema::build(Query::default(), Mutation::default(), EmptySubscription);

        if let Some(pool) = self.pool {
            builder = builder
                .data(FlightRepository::new(pool.clone()))
                .data(BookingRepository::new(pool));
        }

        builder.finish()
    }
}

/// Create a new GraphQL schema backed by `pool`
pub fn build_schema(pool: PgPool) -> RedAirlinesSchema {
    SchemaBuilder::new().pool(pool).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_builder_default() {
        let builder = SchemaBuilder::default();
        assert!(builder.pool.is_none());
    }

    #[test]
    fn test_sdl_exposes_relationships() {
        let sdl = SchemaBuilder::new().build().sdl();
        assert!(sdl.contains("fares: [Fare!]!"));
        assert!(sdl.contains("flight: Flight!"));
        assert!(sdl.contains("createBooking(input: CreateBookingInput!): Booking!"));
        assert!(sdl.contains("airports: [String!]!"));
    }
}
