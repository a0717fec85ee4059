//! HTTP adapter for mission endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{AssignMissionRequest, CreateMissionRequest, MissionResponse};
pub use routes::mission_routes;
