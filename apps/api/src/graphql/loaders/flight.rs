//! Flights-by-id bulk fetch
//!
//! Resolves `Booking.flight` and `Fare.flight` for every parent in a
//! selection set with one query.

use red_airlines_batch_loader::BulkFetcher;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use super::FetchError;
use crate::models::Flight;
use crate::repositories::utils::FLIGHT_COLUMNS;

/// Bulk fetcher for flights keyed by flight id
#[derive(Clone)]
pub struct FlightLoader {
    pool: PgPool,
}

impl FlightLoader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl BulkFetcher<Uuid> for FlightLoader {
    type Value = Option<Flight>;
    type Error = FetchError;

    async fn fetch(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        // Guard against empty keys to avoid unnecessary database query
        if keys.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!("SELECT {} FROM flights WHERE id = ANY($1)", FLIGHT_COLUMNS);
        let flights: Vec<Flight> = sqlx::query_as(&sql)
            .bind(keys)
            .fetch_all(&self.pool)
            .await?;

        Ok(flights.into_iter().map(|f| (f.id, Some(f))).collect())
    }
}
