//! HTTP adapter for report endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    RejectReportRequest, ReportContentRequest, ReportResponse, ValidateReportRequest,
    WriteReportRequest,
};
pub use routes::report_routes;
