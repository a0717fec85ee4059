//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, statuses, roles, errors)
//! - `user` - Accounts that act on the system and receive notifications
//! - `mission` - Client missions grouping interventions
//! - `intervention` - Scheduled work items, their state machine and lock
//! - `delay` - Delay episodes and their resolution
//! - `report` - Validation-gated intervention reports
//! - `notification` - Per-user event records and message templates
//! - `attachment` - Files attached to interventions

pub mod attachment;
pub mod delay;
pub mod foundation;
pub mod intervention;
pub mod mission;
pub mod notification;
pub mod report;
pub mod user;
