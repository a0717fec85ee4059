//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Write-side handlers load an aggregate, apply one state transition,
//! persist it with a version check and dispatch the resulting
//! notifications.

mod dispatcher;
pub mod handlers;

pub use dispatcher::NotificationDispatcher;
pub use handlers::*;
