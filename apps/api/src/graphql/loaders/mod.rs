//! Batch loaders for GraphQL relationship resolvers
//!
//! Each access path (flights by id, fares by flight, ...) gets its own
//! [`BatchLoader`] backed by a bulk fetch adapter. Resolvers that run
//! concurrently while a selection set is being executed ask their loader for
//! one key each, and the loader turns those calls into a single `= ANY($1)`
//! query.
//!
//! There are two types of loaders:
//! - Single-entity loaders: Return `Option<T>` for a single entity by ID
//! - Collection loaders: Return `Vec<T>` for related entities by parent ID
//!
//! A fresh [`Loaders`] registry is built for every GraphQL operation and
//! attached to the request, so batches never mix keys from two requests.

mod bookings_by_fare;
mod bookings_by_flight;
mod error;
mod fare;
mod fares_by_flight;
mod flight;

pub use bookings_by_fare::BookingsByFareLoader;
pub use bookings_by_flight::BookingsByFlightLoader;
pub use error::FetchError;
pub use fare::FareLoader;
pub use fares_by_flight::FaresByFlightLoader;
pub use flight::FlightLoader;

use async_graphql::Context;
use red_airlines_batch_loader::{BatchConfig, BatchLoader};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// (entity, access path) pairs served by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessPath {
    FlightsById,
    FaresById,
    FaresByFlight,
    BookingsByFlight,
    BookingsByFare,
}

impl AccessPath {
    /// Name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FlightsById => "flights_by_id",
            Self::FaresById => "fares_by_id",
            Self::FaresByFlight => "fares_by_flight",
            Self::BookingsByFlight => "bookings_by_flight",
            Self::BookingsByFare => "bookings_by_fare",
        }
    }
}

impl std::fmt::Display for AccessPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request-scoped loader registry
///
/// Cloning is cheap and clones share pending batches.
#[derive(Clone)]
pub struct Loaders {
    flight: BatchLoader<Uuid, FlightLoader>,
    fare: BatchLoader<Uuid, FareLoader>,
    fares_by_flight: BatchLoader<Uuid, FaresByFlightLoader>,
    bookings_by_flight: BatchLoader<Uuid, BookingsByFlightLoader>,
    bookings_by_fare: BatchLoader<Uuid, BookingsByFareLoader>,
}

impl Loaders {
    /// Create one loader per access path
    ///
    /// All loaders share `cancel`; cancelling it fails every pending load of
    /// the request. The caller keeps the token.
    pub fn new(pool: PgPool, config: &BatchConfig, cancel: CancellationToken) -> Self {
        let config = *config;
        Self {
            flight: BatchLoader::new(
                AccessPath::FlightsById.as_str(),
                FlightLoader::new(pool.clone()),
                config,
                cancel.clone(),
            ),
            fare: BatchLoader::new(
                AccessPath::FaresById.as_str(),
                FareLoader::new(pool.clone()),
                config,
                cancel.clone(),
            ),
            fares_by_flight: BatchLoader::new(
                AccessPath::FaresByFlight.as_str(),
                FaresByFlightLoader::new(pool.clone()),
                config,
                cancel.clone(),
            ),
            bookings_by_flight: BatchLoader::new(
                AccessPath::BookingsByFlight.as_str(),
                BookingsByFlightLoader::new(pool.clone()),
                config,
                cancel.clone(),
            ),
            bookings_by_fare: BatchLoader::new(
                AccessPath::BookingsByFare.as_str(),
                BookingsByFareLoader::new(pool),
                config,
                cancel,
            ),
        }
    }

    pub fn flight(&self) -> &BatchLoader<Uuid, FlightLoader> {
        &self.flight
    }

    pub fn fare(&self) -> &BatchLoader<Uuid, FareLoader> {
        &self.fare
    }

    pub fn fares_by_flight(&self) -> &BatchLoader<Uuid, FaresByFlightLoader> {
        &self.fares_by_flight
    }

    pub fn bookings_by_flight(&self) -> &BatchLoader<Uuid, BookingsByFlightLoader> {
        &self.bookings_by_flight
    }

    pub fn bookings_by_fare(&self) -> &BatchLoader<Uuid, BookingsByFareLoader> {
        &self.bookings_by_fare
    }
}

/// Access to the request's [`Loaders`] from a resolver
pub trait LoadersExt {
    /// Get the loader registry attached to this request
    ///
    /// # Panics
    ///
    /// Panics if the request was executed without a registry. Every request
    /// built by the GraphQL handler carries one, so a panic here means a
    /// code path executes the schema directly without attaching it.
    fn loaders(&self) -> &Loaders;
}

impl LoadersExt for Context<'_> {
    fn loaders(&self) -> &Loaders {
        match self.data_opt::<Loaders>() {
            Some(loaders) => loaders,
            None => panic!(
                "no Loaders attached to the GraphQL request; build requests with Loaders::new and Request::data"
            ),
        }
    }
}
