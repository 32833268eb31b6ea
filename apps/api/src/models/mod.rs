//! Database models for Red Airlines
//!
//! This module contains the SQLx row types for:
//! - Flights and their seat inventory
//! - Fares offered on each flight
//! - Passenger bookings

pub mod booking;
pub mod fare;
pub mod flight;

pub use booking::{Booking, NewBooking};
pub use fare::Fare;
pub use flight::Flight;
