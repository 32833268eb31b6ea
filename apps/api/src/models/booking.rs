//! Booking model for Red Airlines
//!
//! This module contains the database model for passenger bookings and the
//! validated input used to create one.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Status given to bookings created through the API
pub const BOOKING_STATUS_CONFIRMED: &str = "confirmed";

/// Length of a generated booking reference
pub const BOOKING_REFERENCE_LENGTH: usize = 10;

const BOOKING_REFERENCE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Booking record from the bookings table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    /// Unique booking identifier
    pub id: Uuid,

    /// Human-facing reference (10 characters, A-Z and 0-9)
    pub booking_reference: String,

    /// Booked flight
    pub flight_id: Uuid,

    /// Booked fare
    pub fare_id: Uuid,

    /// Passenger full name
    pub passenger_name: String,

    /// Passenger contact email
    pub passenger_email: String,

    /// Passenger contact phone
    pub passenger_phone: Option<String>,

    /// Assigned or requested seat
    pub seat_number: Option<String>,

    /// Booking status (confirmed, checked_in, cancelled)
    pub booking_status: String,

    /// Amount charged
    pub total_price: f64,

    /// When the booking was made
    pub booked_at: DateTime<Utc>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Validated booking request
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub flight_id: Uuid,
    pub fare_id: Uuid,
    pub passenger_name: String,
    pub passenger_email: String,
    pub passenger_phone: Option<String>,
    pub seat_number: Option<String>,
}

/// Generate a booking reference from a random UUID
///
/// Only the 122 random bits of the v4 UUID are used; the version and variant
/// bits are fixed and would skew the characters they land on.
pub fn generate_booking_reference() -> String {
    encode_booking_reference(random_bits(Uuid::new_v4()))
}

/// Pack the random bits of a v4 UUID into the low 122 bits of a `u128`
fn random_bits(uuid: Uuid) -> u128 {
    let n = uuid.as_u128();
    let time_low_mid = n >> 80;
    let time_hi = (n >> 64) & 0x0FFF;
    let clock_seq_node = n & ((1 << 62) - 1);
    (time_low_mid << 74) | (time_hi << 62) | clock_seq_node
}

/// Base-36 digits of `random`, least significant first
fn encode_booking_reference(mut random: u128) -> String {
    let radix = BOOKING_REFERENCE_ALPHABET.len() as u128;
    (0..BOOKING_REFERENCE_LENGTH)
        .map(|_| {
            let digit = (random % radix) as usize;
            random /= radix;
            BOOKING_REFERENCE_ALPHABET[digit] as char
        })
        .collect()
}
