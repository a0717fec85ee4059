//! HTTP adapter for delay endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateDelayRequest, DelayDashboardResponse, DelayDetailsRequest, DelayResponse};
pub use routes::delay_routes;
