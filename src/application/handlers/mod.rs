//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Each one
//! receives its ports as `Arc<dyn Port>` and returns `WorkflowError`.

pub mod delay;
pub mod detection;
pub mod intervention;
pub mod mission;
pub mod notification;
pub mod report;

#[cfg(test)]
pub(crate) mod testing;

pub use delay::{
    CreateDelayCommand, CreateDelayHandler, DelayDashboard, DelayDashboardHandler,
    DelayDashboardQuery, DelayView, GetDelayHandler, GetDelayQuery, ListDelaysHandler,
    ListDelaysQuery, ResolveDelayCommand, ResolveDelayHandler, UpdateDelayCommand,
    UpdateDelayHandler,
};
pub use detection::{
    CheckInterventionDelayHandler, DelayDefaults, DelayFlagger, DetectOverdueInterventionsHandler,
    DetectionRunResult, PreviewDelayDetectionCommand, RunDelayDetectionCommand,
};
pub use intervention::{
    AddAttachmentCommand, AddAttachmentHandler, CreateInterventionCommand,
    CreateInterventionHandler, DeleteInterventionCommand, DeleteInterventionHandler,
    FinishInterventionCommand, FinishInterventionHandler, GetInterventionHandler,
    GetInterventionQuery, InterventionView, ManageInterventionDelayCommand,
    ManageInterventionDelayHandler, RemoveAttachmentCommand, RemoveAttachmentHandler,
    StartInterventionCommand, StartInterventionHandler, SubmitFieldReportCommand,
    SubmitFieldReportHandler, UpdateInterventionCommand, UpdateInterventionHandler,
};
pub use mission::{
    AssignMissionCommand, AssignMissionHandler, CompleteMissionCommand, CompleteMissionHandler,
    CreateMissionCommand, CreateMissionHandler,
};
pub use notification::{
    DeleteNotificationCommand, DeleteNotificationHandler, ListNotificationsHandler,
    ListNotificationsQuery, MarkAllNotificationsReadCommand, MarkAllNotificationsReadHandler,
    MarkNotificationReadCommand, MarkNotificationReadHandler, UnreadCountHandler,
    UnreadCountQuery,
};
pub use report::{
    CreateReportCommand, CreateReportHandler, GetReportHandler, GetReportQuery,
    RejectReportCommand, RejectReportHandler, SubmitReportCommand, SubmitReportHandler,
    UpdateReportCommand, UpdateReportHandler, ValidateReportCommand, ValidateReportHandler,
};
