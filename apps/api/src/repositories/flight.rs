//! Flight repository for centralized database operations

use sqlx::PgPool;
use uuid::Uuid;

use super::utils::FLIGHT_COLUMNS;
use crate::models::Flight;

/// Repository for flight database operations
#[derive(Clone)]
pub struct FlightRepository {
    pool: PgPool,
}

impl FlightRepository {
    /// Create a new FlightRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a flight by its unique ID
    pub async fn find_by_id(&self, flight_id: Uuid) -> Result<Option<Flight>, sqlx::Error> {
        let sql = format!("SELECT {} FROM flights WHERE id = $1", FLIGHT_COLUMNS);
        sqlx::query_as::<_, Flight>(&sql)
            .bind(flight_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Search flights by route, earliest departure first
    ///
    /// `origin` and `destination` are optional filters on normalized airport
    /// codes.
    pub async fn search(
        &self,
        origin: Option<&str>,
        destination: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Flight>, sqlx::Error> {
        let sql = format!(
            r#"SELECT {} FROM flights
            WHERE ($1::text IS NULL OR origin = $1)
              AND ($2::text IS NULL OR destination = $2)
            ORDER BY departure_time ASC, flight_number ASC
            LIMIT $3"#,
            FLIGHT_COLUMNS
        );
        sqlx::query_as::<_, Flight>(&sql)
            .bind(origin)
            .bind(destination)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
    }

    /// List every airport served as an origin or destination
    pub async fn airports(&self) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT origin AS code FROM flights UNION SELECT destination FROM flights ORDER BY code",
        )
        .fetch_all(&self.pool)
        .await
    }
}
