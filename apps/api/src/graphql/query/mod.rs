//! GraphQL queries for Red Airlines
//!
//! This module contains all query resolvers, organized by domain.

mod booking;
mod flight;

pub use booking::BookingQuery;
pub use flight::FlightQuery;

use async_graphql::MergedObject;

/// Root query type combining all query domains
#[derive(MergedObject, Default)]
pub struct Query(FlightQuery, BookingQuery);
