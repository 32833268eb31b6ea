//! Flight GraphQL type
//!
//! This module defines the GraphQL type for flights with relationship resolvers.

use async_graphql::{Context, Object, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::to_graphql_error;
use crate::graphql::loaders::LoadersExt;
use crate::graphql::pagination::{clamp_limit, MAX_NESTED_LIMIT};
use crate::models::Flight as DbFlight;

use super::booking::Booking;
use super::fare::Fare;

/// Scheduled flight exposed via GraphQL
pub struct Flight {
    inner: DbFlight,
}

impl Flight {
    /// Create a new GraphQL Flight from a database Flight
    pub fn new(flight: DbFlight) -> Self {
        Self { inner: flight }
    }
}

impl From<DbFlight> for Flight {
    fn from(flight: DbFlight) -> Self {
        Self::new(flight)
    }
}

#[Object]
impl Flight {
    /// Unique flight identifier
    async fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Carrier flight number (e.g., "RA1234")
    async fn flight_number(&self) -> &str {
        &self.inner.flight_number
    }

    /// Origin airport code
    async fn origin(&self) -> &str {
        &self.inner.origin
    }

    /// Destination airport code
    async fn destination(&self) -> &str {
        &self.inner.destination
    }

    async fn departure_time(&self) -> DateTime<Utc> {
        self.inner.departure_time
    }

    async fn arrival_time(&self) -> DateTime<Utc> {
        self.inner.arrival_time
    }

    /// Scheduled block time in minutes
    async fn duration_minutes(&self) -> i64 {
        self.inner.duration_minutes()
    }

    async fn aircraft_type(&self) -> &str {
        &self.inner.aircraft_type
    }

    async fn total_seats(&self) -> i32 {
        self.inner.total_seats
    }

    /// Seats still available across all fares
    async fn available_seats(&self) -> i32 {
        self.inner.available_seats
    }

    async fn status(&self) -> &str {
        &self.inner.status
    }

    // Relationship resolvers

    /// Fares offered on this flight, cheapest first (batched per request)
    async fn fares(&self, ctx: &Context<'_>) -> Result<Vec<Fare>> {
        let fares = ctx
            .loaders()
            .fares_by_flight()
            .load(self.inner.id)
            .await
            .map_err(to_graphql_error)?;
        Ok(fares.into_iter().map(Fare::from).collect())
    }

    /// Bookings on this flight, newest first (batched per request)
    ///
    /// The limit is applied after the batched fetch.
    async fn bookings(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 50)] limit: i32,
    ) -> Result<Vec<Booking>> {
        let bookings = ctx
            .loaders()
            .bookings_by_flight()
            .load(self.inner.id)
            .await
            .map_err(to_graphql_error)?;

        let limit = clamp_limit(limit, MAX_NESTED_LIMIT) as usize;
        Ok(bookings
            .into_iter()
            .take(limit)
            .map(Booking::from)
            .collect())
    }
}
