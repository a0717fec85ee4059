//! Intervention command and query handlers.

mod attachments;
mod create_intervention;
mod delete_intervention;
mod finish_intervention;
mod get_intervention;
mod manage_delay;
mod start_intervention;
mod submit_field_report;
mod update_intervention;

pub use attachments::{
    AddAttachmentCommand, AddAttachmentHandler, RemoveAttachmentCommand, RemoveAttachmentHandler,
};
pub use create_intervention::{CreateInterventionCommand, CreateInterventionHandler};
pub use delete_intervention::{DeleteInterventionCommand, DeleteInterventionHandler};
pub use finish_intervention::{FinishInterventionCommand, FinishInterventionHandler};
pub use get_intervention::{GetInterventionHandler, GetInterventionQuery, InterventionView};
pub use manage_delay::{ManageInterventionDelayCommand, ManageInterventionDelayHandler};
pub use start_intervention::{StartInterventionCommand, StartInterventionHandler};
pub use submit_field_report::{SubmitFieldReportCommand, SubmitFieldReportHandler};
pub use update_intervention::{UpdateInterventionCommand, UpdateInterventionHandler};
