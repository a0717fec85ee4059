//! HTTP adapter for intervention endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AddAttachmentRequest, AttachmentResponse, CreateInterventionRequest, FieldReportRequest,
    InterventionDetailResponse, InterventionResponse, ManageDelayRequest,
    UpdateInterventionRequest,
};
pub use routes::intervention_routes;
