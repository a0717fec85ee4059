//! Adapters - implementations of the ports plus the HTTP surface.
//!
//! - `clock` - system and fixed clocks
//! - `memory` - in-memory record store
//! - `postgres` - PostgreSQL record store
//! - `http` - axum REST API

pub mod clock;
pub mod http;
pub mod memory;
pub mod postgres;

pub use clock::{FixedClock, SystemClock};
