//! Common test utilities for API integration tests
//!
//! None of these tests need a running database: pools are created lazily and
//! pointed at a closed port, so anything that reaches the database fails the
//! way a real outage would.

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod helpers;

pub use helpers::*;
