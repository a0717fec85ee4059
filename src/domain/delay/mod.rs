//! Delay module - delay ("retard") episodes of an intervention.
//!
//! A delay is open until it is resolved; resolution is terminal and fixes
//! its duration. An intervention may accumulate several episodes over time,
//! and several may be open at once.

mod aggregate;
mod kind;

pub use aggregate::{automatic_reason, Delay, DelayDetails};
pub use kind::DelayKind;
