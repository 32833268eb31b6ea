//! Database repository layer for Red Airlines
//!
//! Root queries and the booking mutation go through these repositories.
//! Relationship fields are resolved through the batch loaders in
//! `graphql::loaders` instead, which share the column lists in [`utils`].

pub mod booking;
pub mod flight;
pub mod utils;

pub use booking::BookingRepository;
pub use flight::FlightRepository;
