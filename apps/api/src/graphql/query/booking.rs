//! Booking lookup queries

use async_graphql::{Context, Object, Result};

use crate::error::to_graphql_error;
use crate::graphql::pagination::{clamp_limit, MAX_LIMIT};
use crate::graphql::types::Booking;
use crate::repositories::BookingRepository;

/// Booking queries
#[derive(Default)]
pub struct BookingQuery;

#[Object]
impl BookingQuery {
    /// Get a booking by its reference (case-insensitive)
    async fn booking(
        &self,
        ctx: &Context<'_>,
        booking_reference: String,
    ) -> Result<Option<Booking>> {
        let repo = ctx.data::<BookingRepository>()?;
        let reference = booking_reference.trim().to_ascii_uppercase();
        let booking = repo
            .find_by_reference(&reference)
            .await
            .map_err(to_graphql_error)?;
        Ok(booking.map(Booking::from))
    }

    /// List bookings, newest first, optionally for one passenger
    async fn bookings(
        &self,
        ctx: &Context<'_>,
        passenger_email: Option<String>,
        #[graphql(default = 50)] limit: i32,
    ) -> Result<Vec<Booking>> {
        let repo = ctx.data::<BookingRepository>()?;
        let email = passenger_email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        let bookings = repo
            .find_all(email.as_deref(), clamp_limit(limit, MAX_LIMIT))
            .await
            .map_err(to_graphql_error)?;
        Ok(bookings.into_iter().map(Booking::from).collect())
    }
}
