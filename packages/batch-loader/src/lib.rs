//! Request-scoped key batching for Red Airlines resolvers
//!
//! GraphQL resolves fields object by object, so a list of flights whose fares
//! are requested turns into one fare lookup per flight. This crate coalesces
//! those single-key lookups into one bulk fetch per collection window:
//!
//! - [`BulkFetcher`]: the storage-side contract, one bulk query for a set of distinct keys
//! - [`BatchLoader`]: accumulates concurrent `load(key)` calls, deduplicates keys,
//!   invokes the fetcher once per window and fans results back out
//! - [`Cardinality`]: what a caller receives when its key is absent from the fetch result
//!
//! A loader is meant to live for exactly one inbound request. It never caches
//! values between windows, so sharing it across requests would only add latency,
//! but it would also let one request's cancellation fail another's lookups.
//!
//! # Example
//!
//! ```rust,ignore
//! use red_airlines_batch_loader::{BatchConfig, BatchLoader};
//! use tokio_util::sync::CancellationToken;
//!
//! let loader = BatchLoader::new("flights_by_id", FlightFetcher, BatchConfig::default(), CancellationToken::new());
//! let (a, b) = tokio::join!(loader.load(id_a), loader.load(id_b)); // one bulk query
//! ```

mod config;
mod error;
mod fetcher;
mod loader;

pub use config::BatchConfig;
pub use error::LoadError;
pub use fetcher::{BulkFetcher, Cardinality};
pub use loader::BatchLoader;
