//! Fare GraphQL type

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::error::to_graphql_error;
use crate::graphql::loaders::LoadersExt;
use crate::graphql::pagination::{clamp_limit, MAX_NESTED_LIMIT};
use crate::models::Fare as DbFare;

use super::booking::Booking;
use super::flight::Flight;
use super::required;

/// Fare class offered on a flight
pub struct Fare {
    inner: DbFare,
}

impl Fare {
    /// Create a new GraphQL Fare from a database Fare
    pub fn new(fare: DbFare) -> Self {
        Self { inner: fare }
    }
}

impl From<DbFare> for Fare {
    fn from(fare: DbFare) -> Self {
        Self::new(fare)
    }
}

#[Object]
impl Fare {
    async fn id(&self) -> Uuid {
        self.inner.id
    }

    async fn flight_id(&self) -> Uuid {
        self.inner.flight_id
    }

    /// Fare class name (Promo, Basic, Pro)
    async fn fare_class(&self) -> &str {
        &self.inner.fare_class
    }

    async fn price(&self) -> f64 {
        self.inner.price
    }

    /// Checked baggage allowance in kilograms
    async fn baggage_allowance(&self) -> i32 {
        self.inner.baggage_allowance
    }

    async fn is_refundable(&self) -> bool {
        self.inner.is_refundable
    }

    async fn is_changeable(&self) -> bool {
        self.inner.is_changeable
    }

    async fn available_seats(&self) -> i32 {
        self.inner.available_seats
    }

    /// Whether this fare can still be booked
    async fn is_available(&self) -> bool {
        self.inner.is_available()
    }

    // Relationship resolvers

    /// Flight this fare belongs to (batched per request)
    async fn flight(&self, ctx: &Context<'_>) -> Result<Flight> {
        let flight_id = self.inner.flight_id;
        let flight = ctx
            .loaders()
            .flight()
            .load(flight_id)
            .await
            .map_err(to_graphql_error)?;
        required(flight, "flight", flight_id)
    }

    /// Bookings made on this fare, newest first (batched per request)
    async fn bookings(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 50)] limit: i32,
    ) -> Result<Vec<Booking>> {
        let bookings = ctx
            .loaders()
            .bookings_by_fare()
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
