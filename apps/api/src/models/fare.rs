//! Fare model for Red Airlines

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Fare record from the fares table
///
/// Each flight is sold in several fare classes (Promo, Basic, Pro), each with
/// its own price, conditions and seat allotment.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Fare {
    /// Unique fare identifier
    pub id: Uuid,

    /// Flight this fare is sold on
    pub flight_id: Uuid,

    /// Fare class name
    pub fare_class: String,

    /// Ticket price
    pub price: f64,

    /// Number of checked bags included
    pub baggage_allowance: i32,

    /// Whether the ticket can be refunded
    pub is_refundable: bool,

    /// Whether the ticket can be changed
    pub is_changeable: bool,

    /// Seats left in this fare's allotment
    pub available_seats: i32,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Fare {
    /// Check whether any seat is left at this fare
    pub fn is_available(&self) -> bool {
        self.available_seats > 0
    }
}
