//! Intervention module - scheduled work items and their state machine.
//!
//! An intervention belongs to a mission, is carried out by one intervenant
//! and moves linearly through `en_attente -> en_cours -> terminee`. It also
//! carries the delay flags maintained by the detection engine and the field
//! report filled in by the intervenant.

mod aggregate;
mod lock;
mod values;

pub use aggregate::{Intervention, InterventionChanges, NewIntervention, MAX_TITLE_LENGTH};
pub use lock::{ensure_unlocked, is_locked};
pub use values::{format_work_duration, DelayFlags, FieldReport, Priority};
