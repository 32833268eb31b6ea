//! Booking repository for centralized database operations
//!
//! Booking creation runs in one transaction: the flight and fare rows are
//! locked with FOR UPDATE, seat counts are decremented on both, and the
//! booking row is inserted. Concurrent bookings for the same fare therefore
//! serialize on the fare row and can never oversell it.

use sqlx::PgPool;
use uuid::Uuid;

use super::utils::{BOOKING_COLUMNS, FARE_COLUMNS, FLIGHT_COLUMNS};
use crate::error::{ApiError, ApiResult};
use crate::models::booking::{generate_booking_reference, BOOKING_STATUS_CONFIRMED};
use crate::models::{Booking, Fare, Flight, NewBooking};

/// Attempts at finding an unused booking reference before giving up
const MAX_REFERENCE_ATTEMPTS: usize = 5;

/// Repository for booking database operations
#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new BookingRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a booking by its human-facing reference
    pub async fn find_by_reference(
        &self,
        booking_reference: &str,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM bookings WHERE booking_reference = $1",
            BOOKING_COLUMNS
        );
        sqlx::query_as::<_, Booking>(&sql)
            .bind(booking_reference)
            .fetch_optional(&self.pool)
            .await
    }

    /// List bookings, newest first, optionally for one passenger email
    ///
    /// Email comparison is case-insensitive.
    pub async fn find_all(
        &self,
        passenger_email: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let sql = format!(
            r#"SELECT {} FROM bookings
            WHERE ($1::text IS NULL OR lower(passenger_email) = lower($1))
            ORDER BY booked_at DESC
            LIMIT $2"#,
            BOOKING_COLUMNS
        );
        sqlx::query_as::<_, Booking>(&sql)
            .bind(passenger_email)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
    }

    /// Create a confirmed booking and take one seat from the fare and flight
    ///
    /// # Errors
    ///
    /// - `NotFound` if the flight or fare does not exist
    /// - `ValidationError` if the fare belongs to another flight
    /// - `Conflict` if the fare or flight has no seats left
    pub async fn create(&self, booking: &NewBooking) -> ApiResult<Booking> {
        let mut tx = self.pool.begin().await?;

        let flight_sql = format!(
            "SELECT {} FROM flights WHERE id = $1 FOR UPDATE",
            FLIGHT_COLUMNS
        );
        let flight = sqlx::query_as::<_, Flight>(&flight_sql)
            .bind(booking.flight_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| ApiError::not_found("flight", booking.flight_id))?;

        let fare_sql = format!("SELECT {} FROM fares WHERE id = $1 FOR UPDATE", FARE_COLUMNS);
        let fare = sqlx::query_as::<_, Fare>(&fare_sql)
            .bind(booking.fare_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| ApiError::not_found("fare", booking.fare_id))?;

        if fare.flight_id != flight.id {
            return Err(ApiError::ValidationError(format!(
                "fare {} does not belong to flight {}",
                fare.id, flight.flight_number
            )));
        }

        if !fare.is_available() || flight.available_seats <= 0 {
            return Err(ApiError::Conflict(format!(
                "{} fare on flight {} is sold out",
                fare.fare_class, flight.flight_number
            )));
        }

        sqlx::query(
            "UPDATE fares SET available_seats = available_seats - 1, updated_at = NOW() WHERE id = $1",
        )
        .bind(fare.id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE flights SET available_seats = available_seats - 1, updated_at = NOW() WHERE id = $1",
        )
        .bind(flight.id)
        .execute(&mut *tx)
        .await?;

        let insert_sql = format!(
            r#"INSERT INTO bookings (
                id, booking_reference, flight_id, fare_id,
                passenger_name, passenger_email, passenger_phone, seat_number,
                booking_status, total_price
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (booking_reference) DO NOTHING
            RETURNING {}"#,
            BOOKING_COLUMNS
        );

        for _ in 0..MAX_REFERENCE_ATTEMPTS {
            let created = sqlx::query_as::<_, Booking>(&insert_sql)
                .bind(Uuid::new_v4())
                .bind(generate_booking_reference())
                .bind(flight.id)
                .bind(fare.id)
                .bind(&booking.passenger_name)
                .bind(&booking.passenger_email)
                .bind(booking.passenger_phone.as_deref())
                .bind(booking.seat_number.as_deref())
                .bind(BOOKING_STATUS_CONFIRMED)
                .bind(fare.price)
                .fetch_optional(&mut *tx)
                .await?;

            if let Some(created) = created {
                tx.commit().await?;
                tracing::info!(
                    booking_reference = %created.booking_reference,
                    flight_number = %flight.flight_number,
                    fare_class = %fare.fare_class,
                    "Booking created"
                );
                return Ok(created);
            }
        }

        Err(ApiError::Internal(
            "could not allocate a unique booking reference".to_string(),
        ))
    }
}
