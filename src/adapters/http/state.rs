//! Shared application state.
//!
//! Holds the ports and builds command/query handlers on demand. Cloned per
//! request; every field is an `Arc`.

use std::sync::Arc;

use sqlx::PgPool;

use crate::adapters::memory::{
    InMemoryAttachmentRepository, InMemoryDelayRepository, InMemoryInterventionRepository,
    InMemoryMissionRepository, InMemoryNotificationRepository, InMemoryReportRepository,
    InMemoryUserRepository,
};
use crate::adapters::postgres::{
    PostgresAttachmentRepository, PostgresDelayRepository, PostgresInterventionRepository,
    PostgresMissionRepository, PostgresNotificationRepository, PostgresReportRepository,
    PostgresUserRepository,
};
use crate::application::handlers::{
    AddAttachmentHandler, AssignMissionHandler, CheckInterventionDelayHandler,
    CompleteMissionHandler, CreateDelayHandler, CreateInterventionHandler, CreateMissionHandler,
    CreateReportHandler, DelayDashboardHandler, DelayDefaults, DelayFlagger,
    DeleteInterventionHandler, DeleteNotificationHandler, DetectOverdueInterventionsHandler,
    FinishInterventionHandler, GetDelayHandler, GetInterventionHandler, GetReportHandler,
    ListDelaysHandler, ListNotificationsHandler, ManageInterventionDelayHandler,
    MarkAllNotificationsReadHandler, MarkNotificationReadHandler, RejectReportHandler,
    RemoveAttachmentHandler, ResolveDelayHandler, StartInterventionHandler,
    SubmitFieldReportHandler, SubmitReportHandler, UnreadCountHandler, UpdateDelayHandler,
    UpdateInterventionHandler, UpdateReportHandler, ValidateReportHandler,
};
use crate::application::NotificationDispatcher;
use crate::config::{AppConfig, RecordStore};
use crate::domain::foundation::DomainError;
use crate::ports::{
    AttachmentRepository, Clock, DelayRepository, InterventionRepository, MissionRepository,
    NotificationRepository, ReportRepository, UserRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub missions: Arc<dyn MissionRepository>,
    pub interventions: Arc<dyn InterventionRepository>,
    pub delays: Arc<dyn DelayRepository>,
    pub reports: Arc<dyn ReportRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub attachments: Arc<dyn AttachmentRepository>,
    pub clock: Arc<dyn Clock>,
    pub delay_defaults: DelayDefaults,
}

impl AppState {
    /// State backed by the in-memory record store.
    pub fn in_memory(clock: Arc<dyn Clock>, delay_defaults: DelayDefaults) -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            missions: Arc::new(InMemoryMissionRepository::new()),
            interventions: Arc::new(InMemoryInterventionRepository::new()),
            delays: Arc::new(InMemoryDelayRepository::new()),
            reports: Arc::new(InMemoryReportRepository::new()),
            notifications: Arc::new(InMemoryNotificationRepository::new()),
            attachments: Arc::new(InMemoryAttachmentRepository::new()),
            clock,
            delay_defaults,
        }
    }

    /// State backed by PostgreSQL.
    pub fn postgres(pool: PgPool, clock: Arc<dyn Clock>, delay_defaults: DelayDefaults) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            missions: Arc::new(PostgresMissionRepository::new(pool.clone())),
            interventions: Arc::new(PostgresInterventionRepository::new(pool.clone())),
            delays: Arc::new(PostgresDelayRepository::new(pool.clone())),
            reports: Arc::new(PostgresReportRepository::new(pool.clone())),
            notifications: Arc::new(PostgresNotificationRepository::new(pool.clone())),
            attachments: Arc::new(PostgresAttachmentRepository::new(pool)),
            clock,
            delay_defaults,
        }
    }

    /// Picks the record store from configuration.
    ///
    /// A configured database URL connects to PostgreSQL (running migrations
    /// when enabled); an empty one selects the in-memory store.
    pub async fn from_config(config: &AppConfig, clock: Arc<dyn Clock>) -> Result<Self, DomainError> {
        let defaults = config.detection.delay_defaults();
        if config.database.store() == RecordStore::InMemory {
            tracing::warn!("No database URL configured, using the in-memory store");
            return Ok(Self::in_memory(clock, defaults));
        }

        let pool = crate::adapters::postgres::connect(&config.database).await?;
        if config.database.run_migrations {
            crate::adapters::postgres::migrate(&pool).await?;
            tracing::info!("Database migrations applied");
        }
        Ok(Self::postgres(pool, clock, defaults))
    }

    pub fn dispatcher(&self) -> NotificationDispatcher {
        NotificationDispatcher::new(
            self.notifications.clone(),
            self.users.clone(),
            self.clock.clone(),
        )
    }

    // ───────────────────────────────────────────────────────────────
    // Detection
    // ───────────────────────────────────────────────────────────────

    pub fn delay_flagger(&self) -> DelayFlagger {
        DelayFlagger::new(
            self.interventions.clone(),
            self.delays.clone(),
            self.users.clone(),
            self.dispatcher(),
            self.clock.clone(),
            self.delay_defaults.clone(),
        )
    }

    pub fn detect_overdue_handler(&self) -> DetectOverdueInterventionsHandler {
        DetectOverdueInterventionsHandler::new(
            self.interventions.clone(),
            self.delay_flagger(),
            self.clock.clone(),
        )
    }

    pub fn check_delay_handler(&self) -> CheckInterventionDelayHandler {
        CheckInterventionDelayHandler::new(self.interventions.clone(), self.delay_flagger())
    }

    // ───────────────────────────────────────────────────────────────
    // Missions
    // ───────────────────────────────────────────────────────────────

    pub fn create_mission_handler(&self) -> CreateMissionHandler {
        CreateMissionHandler::new(self.missions.clone(), self.dispatcher(), self.clock.clone())
    }

    pub fn assign_mission_handler(&self) -> AssignMissionHandler {
        AssignMissionHandler::new(self.missions.clone(), self.users.clone(), self.dispatcher())
    }

    pub fn complete_mission_handler(&self) -> CompleteMissionHandler {
        CompleteMissionHandler::new(self.missions.clone())
    }

    // ───────────────────────────────────────────────────────────────
    // Interventions
    // ───────────────────────────────────────────────────────────────

    pub fn create_intervention_handler(&self) -> CreateInterventionHandler {
        CreateInterventionHandler::new(
            self.interventions.clone(),
            self.missions.clone(),
            self.dispatcher(),
            self.clock.clone(),
        )
    }

    pub fn get_intervention_handler(&self) -> GetInterventionHandler {
        GetInterventionHandler::new(
            self.interventions.clone(),
            self.reports.clone(),
            self.attachments.clone(),
            self.check_delay_handler(),
            self.clock.clone(),
        )
    }

    pub fn update_intervention_handler(&self) -> UpdateInterventionHandler {
        UpdateInterventionHandler::new(
            self.interventions.clone(),
            self.reports.clone(),
            self.dispatcher(),
        )
    }

    pub fn delete_intervention_handler(&self) -> DeleteInterventionHandler {
        DeleteInterventionHandler::new(
            self.interventions.clone(),
            self.reports.clone(),
            self.attachments.clone(),
        )
    }

    pub fn start_intervention_handler(&self) -> StartInterventionHandler {
        StartInterventionHandler::new(
            self.interventions.clone(),
            self.missions.clone(),
            self.clock.clone(),
        )
    }

    pub fn finish_intervention_handler(&self) -> FinishInterventionHandler {
        FinishInterventionHandler::new(self.interventions.clone(), self.clock.clone())
    }

    pub fn submit_field_report_handler(&self) -> SubmitFieldReportHandler {
        SubmitFieldReportHandler::new(
            self.interventions.clone(),
            self.missions.clone(),
            self.dispatcher(),
        )
    }

    pub fn manage_delay_handler(&self) -> ManageInterventionDelayHandler {
        ManageInterventionDelayHandler::new(self.interventions.clone(), self.clock.clone())
    }

    pub fn add_attachment_handler(&self) -> AddAttachmentHandler {
        AddAttachmentHandler::new(
            self.interventions.clone(),
            self.reports.clone(),
            self.attachments.clone(),
            self.clock.clone(),
        )
    }

    pub fn remove_attachment_handler(&self) -> RemoveAttachmentHandler {
        RemoveAttachmentHandler::new(
            self.interventions.clone(),
            self.reports.clone(),
            self.attachments.clone(),
        )
    }

    // ───────────────────────────────────────────────────────────────
    // Reports
    // ───────────────────────────────────────────────────────────────

    pub fn create_report_handler(&self) -> CreateReportHandler {
        CreateReportHandler::new(
            self.reports.clone(),
            self.interventions.clone(),
            self.missions.clone(),
            self.dispatcher(),
            self.clock.clone(),
        )
    }

    pub fn update_report_handler(&self) -> UpdateReportHandler {
        UpdateReportHandler::new(
            self.reports.clone(),
            self.interventions.clone(),
            self.missions.clone(),
            self.dispatcher(),
            self.clock.clone(),
        )
    }

    pub fn submit_report_handler(&self) -> SubmitReportHandler {
        SubmitReportHandler::new(
            self.reports.clone(),
            self.interventions.clone(),
            self.missions.clone(),
            self.dispatcher(),
            self.clock.clone(),
        )
    }

    pub fn validate_report_handler(&self) -> ValidateReportHandler {
        ValidateReportHandler::new(
            self.reports.clone(),
            self.interventions.clone(),
            self.missions.clone(),
            self.dispatcher(),
            self.clock.clone(),
        )
    }

    pub fn reject_report_handler(&self) -> RejectReportHandler {
        RejectReportHandler::new(
            self.reports.clone(),
            self.interventions.clone(),
            self.missions.clone(),
            self.dispatcher(),
            self.clock.clone(),
        )
    }

    pub fn get_report_handler(&self) -> GetReportHandler {
        GetReportHandler::new(self.reports.clone(), self.interventions.clone())
    }

    // ───────────────────────────────────────────────────────────────
    // Delays
    // ───────────────────────────────────────────────────────────────

    pub fn create_delay_handler(&self) -> CreateDelayHandler {
        CreateDelayHandler::new(
            self.delays.clone(),
            self.interventions.clone(),
            self.dispatcher(),
            self.clock.clone(),
        )
    }

    pub fn update_delay_handler(&self) -> UpdateDelayHandler {
        UpdateDelayHandler::new(self.delays.clone())
    }

    pub fn resolve_delay_handler(&self) -> ResolveDelayHandler {
        ResolveDelayHandler::new(
            self.delays.clone(),
            self.interventions.clone(),
            self.clock.clone(),
        )
    }

    pub fn list_delays_handler(&self) -> ListDelaysHandler {
        ListDelaysHandler::new(self.delays.clone(), self.clock.clone())
    }

    pub fn get_delay_handler(&self) -> GetDelayHandler {
        GetDelayHandler::new(self.delays.clone(), self.clock.clone())
    }

    pub fn delay_dashboard_handler(&self) -> DelayDashboardHandler {
        DelayDashboardHandler::new(self.delays.clone(), self.interventions.clone())
    }

    // ───────────────────────────────────────────────────────────────
    // Notifications
    // ───────────────────────────────────────────────────────────────

    pub fn list_notifications_handler(&self) -> ListNotificationsHandler {
        ListNotificationsHandler::new(self.notifications.clone())
    }

    pub fn unread_count_handler(&self) -> UnreadCountHandler {
        UnreadCountHandler::new(self.notifications.clone())
    }

    pub fn mark_read_handler(&self) -> MarkNotificationReadHandler {
        MarkNotificationReadHandler::new(self.notifications.clone())
    }

    pub fn mark_all_read_handler(&self) -> MarkAllNotificationsReadHandler {
        MarkAllNotificationsReadHandler::new(self.notifications.clone())
    }

    pub fn delete_notification_handler(&self) -> DeleteNotificationHandler {
        DeleteNotificationHandler::new(self.notifications.clone())
    }
}
