//! Booking GraphQL type

use async_graphql::{Context, Object, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::to_graphql_error;
use crate::graphql::loaders::LoadersExt;
use crate::models::Booking as DbBooking;

use super::fare::Fare;
use super::flight::Flight;
use super::required;

/// Passenger booking exposed via GraphQL
pub struct Booking {
    inner: DbBooking,
}

impl Booking {
    /// Create a new GraphQL Booking from a database Booking
    pub fn new(booking: DbBooking) -> Self {
        Self { inner: booking }
    }
}

impl From<DbBooking> for Booking {
    fn from(booking: DbBooking) -> Self {
        Self::new(booking)
    }
}

#[Object]
impl Booking {
    async fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Ten-character reference given to the passenger
    async fn booking_reference(&self) -> &str {
        &self.inner.booking_reference
    }

    async fn flight_id(&self) -> Uuid {
        self.inner.flight_id
    }

    async fn fare_id(&self) -> Uuid {
        self.inner.fare_id
    }

    async fn passenger_name(&self) -> &str {
        &self.inner.passenger_name
    }

    async fn passenger_email(&self) -> &str {
        &self.inner.passenger_email
    }

    async fn passenger_phone(&self) -> Option<&str> {
        self.inner.passenger_phone.as_deref()
    }

    async fn seat_number(&self) -> Option<&str> {
        self.inner.seat_number.as_deref()
    }

    /// Booking status (confirmed, checked_in, cancelled)
    async fn booking_status(&self) -> &str {
        &self.inner.booking_status
    }

    async fn total_price(&self) -> f64 {
        self.inner.total_price
    }

    async fn booked_at(&self) -> DateTime<Utc> {
        self.inner.booked_at
    }

    // Relationship resolvers

    /// Booked flight (batched per request)
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

    /// Booked fare (batched per request)
    async fn fare(&self, ctx: &Context<'_>) -> Result<Fare> {
        let fare_id = self.inner.fare_id;
        let fare = ctx
            .loaders()
            .fare()
            .load(fare_id)
            .await
            .map_err(to_graphql_error)?;
        required(fare, "fare", fare_id)
    }
}
