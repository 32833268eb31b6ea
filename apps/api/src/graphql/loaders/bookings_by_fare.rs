//! Bookings-by-fare bulk fetch

use red_airlines_batch_loader::BulkFetcher;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use super::FetchError;
use crate::models::Booking;
use crate::repositories::utils::BOOKING_COLUMNS;

/// Bulk fetcher for the bookings made on each fare, newest first
#[derive(Clone)]
pub struct BookingsByFareLoader {
    pool: PgPool,
}

impl BookingsByFareLoader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl BulkFetcher<Uuid> for BookingsByFareLoader {
    type Value = Vec<Booking>;
    type Error = FetchError;

    async fn fetch(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!(
            "SELECT {} FROM bookings WHERE fare_id = ANY($1) ORDER BY booked_at DESC",
            BOOKING_COLUMNS
        );
        let bookings: Vec<Booking> = sqlx::query_as(&sql)
            .bind(keys)
            .fetch_all(&self.pool)
            .await?;

        let mut result: HashMap<Uuid, Vec<Booking>> = HashMap::new();
        for booking in bookings {
            result.entry(booking.fare_id).or_default().push(booking);
        }

        Ok(result)
    }
}
