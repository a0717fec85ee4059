//! Mission module - client missions grouping interventions.

mod aggregate;

pub use aggregate::{Mission, NewMission, MAX_TITLE_LENGTH};
