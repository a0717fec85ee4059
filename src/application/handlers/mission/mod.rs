//! Mission command handlers. All of them are administrator actions.

mod assign_mission;
mod complete_mission;
mod create_mission;

pub use assign_mission::{AssignMissionCommand, AssignMissionHandler};
pub use complete_mission::{CompleteMissionCommand, CompleteMissionHandler};
pub use create_mission::{CreateMissionCommand, CreateMissionHandler};
