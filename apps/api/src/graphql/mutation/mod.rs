//! GraphQL mutations for Red Airlines

mod booking;

pub use booking::{BookingMutation, CreateBookingInput};

use async_graphql::MergedObject;

/// Root mutation type combining all mutation domains
#[derive(MergedObject, Default)]
pub struct Mutation(BookingMutation);
