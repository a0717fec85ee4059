//! Delay command and query handlers.
//!
//! A delay episode is open until resolved by its responsible user or an
//! administrator. Automatic episodes come from the detection engine; the
//! handlers here cover manual reporting and everything after.

mod create_delay;
mod dashboard;
mod queries;
mod resolve_delay;
mod update_delay;

pub use create_delay::{CreateDelayCommand, CreateDelayHandler};
pub use dashboard::{DelayDashboard, DelayDashboardHandler, DelayDashboardQuery, RECENT_DELAYS};
pub use queries::{DelayView, GetDelayHandler, GetDelayQuery, ListDelaysHandler, ListDelaysQuery};
pub use resolve_delay::{ResolveDelayCommand, ResolveDelayHandler};
pub use update_delay::{UpdateDelayCommand, UpdateDelayHandler};
