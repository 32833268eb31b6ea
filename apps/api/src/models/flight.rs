//! Flight model for Red Airlines
//!
//! This module contains the database model for scheduled flights.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Flight record from the flights table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Flight {
    /// Unique flight identifier
    pub id: Uuid,

    /// Public flight number (e.g., "RA1001")
    pub flight_number: String,

    /// Origin airport code
    pub origin: String,

    /// Destination airport code
    pub destination: String,

    /// Scheduled departure
    pub departure_time: DateTime<Utc>,

    /// Scheduled arrival
    pub arrival_time: DateTime<Utc>,

    /// Aircraft model operating the flight
    pub aircraft_type: String,

    /// Seat capacity of the aircraft
    pub total_seats: i32,

    /// Seats still available across all fares
    pub available_seats: i32,

    /// Operational status (scheduled, delayed, cancelled, ...)
    pub status: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Flight {
    /// Flight duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.arrival_time - self.departure_time).num_minutes()
    }
}
