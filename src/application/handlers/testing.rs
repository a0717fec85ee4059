//! Shared fixture for handler tests: every port backed by the in-memory
//! adapters and a clock pinned to 2024-01-05 08:00 UTC.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use super::detection::{DelayDefaults, DelayFlagger};
use crate::adapters::clock::FixedClock;
use crate::adapters::memory::{
    InMemoryAttachmentRepository, InMemoryDelayRepository, InMemoryInterventionRepository,
    InMemoryMissionRepository, InMemoryNotificationRepository, InMemoryReportRepository,
    InMemoryUserRepository,
};
use crate::application::NotificationDispatcher;
use crate::domain::delay::Delay;
use crate::domain::foundation::{
    Actor, ClientId, DelayId, DomainError, InterventionId, MissionId, Role, Timestamp, UserId,
};
use crate::domain::intervention::{Intervention, NewIntervention, Priority};
use crate::domain::mission::{Mission, NewMission};
use crate::domain::notification::Notification;
use crate::domain::user::User;
use crate::ports::{
    DelayRepository, InterventionRepository, MissionRepository, NotificationRepository,
    UserRepository,
};

pub(crate) const NOW_SECS: i64 = 1_704_441_600;

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) struct TestWorld {
    pub users: Arc<InMemoryUserRepository>,
    pub missions: Arc<InMemoryMissionRepository>,
    pub interventions: Arc<InMemoryInterventionRepository>,
    pub delays: Arc<InMemoryDelayRepository>,
    pub reports: Arc<InMemoryReportRepository>,
    pub notifications: Arc<InMemoryNotificationRepository>,
    pub attachments: Arc<InMemoryAttachmentRepository>,
    pub clock: Arc<FixedClock>,
}

impl TestWorld {
    pub fn new() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            missions: Arc::new(InMemoryMissionRepository::new()),
            interventions: Arc::new(InMemoryInterventionRepository::new()),
            delays: Arc::new(InMemoryDelayRepository::new()),
            reports: Arc::new(InMemoryReportRepository::new()),
            notifications: Arc::new(InMemoryNotificationRepository::new()),
            attachments: Arc::new(InMemoryAttachmentRepository::new()),
            clock: Arc::new(FixedClock::new(Timestamp::from_unix_secs(NOW_SECS))),
        }
    }

    pub fn now(&self) -> Timestamp {
        Timestamp::from_unix_secs(NOW_SECS)
    }

    pub fn dispatcher(&self) -> NotificationDispatcher {
        NotificationDispatcher::new(
            self.notifications.clone(),
            self.users.clone(),
            self.clock.clone(),
        )
    }

    pub fn flagger(&self) -> DelayFlagger {
        DelayFlagger::new(
            self.interventions.clone(),
            self.delays.clone(),
            self.users.clone(),
            self.dispatcher(),
            self.clock.clone(),
            DelayDefaults::default(),
        )
    }

    pub async fn user(&self, username: &str, role: Role) -> Actor {
        let user = User::new(UserId::new(), username, format!("{}@example.com", username), role)
            .unwrap();
        self.users.save(&user).await.unwrap();
        user.as_actor()
    }

    pub async fn named_user(&self, username: &str, first: &str, last: &str, role: Role) -> Actor {
        let user = User::new(UserId::new(), username, format!("{}@example.com", username), role)
            .unwrap()
            .with_name(first, last);
        self.users.save(&user).await.unwrap();
        user.as_actor()
    }

    pub async fn mission(&self, assignee: Option<UserId>) -> Mission {
        let mission = Mission::new(
            MissionId::new(),
            NewMission {
                client_id: ClientId::new(),
                title: "Boiler maintenance".to_string(),
                description: String::new(),
                nature: "maintenance".to_string(),
                start_date: date(2023, 12, 1),
                place: "Lyon".to_string(),
                frequency: "monthly".to_string(),
                assignee_id: assignee,
            },
            self.now(),
        )
        .unwrap();
        self.missions.save(&mission).await.unwrap();
        mission
    }

    pub async fn intervention(
        &self,
        mission_id: &MissionId,
        intervenant: Option<UserId>,
        due_date: NaiveDate,
    ) -> Intervention {
        let intervention = Intervention::new(
            InterventionId::new(),
            NewIntervention {
                mission_id: *mission_id,
                title: "Replace valve".to_string(),
                intervenant_id: intervenant,
                scheduled_date: date(2023, 12, 20),
                due_date,
                priority: Priority::Normal,
                resources: String::new(),
            },
            UserId::new(),
            self.now(),
        )
        .unwrap();
        self.interventions.save(&intervention).await.unwrap();
        intervention
    }

    pub async fn stored_intervention(&self, id: &InterventionId) -> Intervention {
        self.interventions.find_by_id(id).await.unwrap().unwrap()
    }

    pub async fn stored_mission(&self, id: &MissionId) -> Mission {
        self.missions.find_by_id(id).await.unwrap().unwrap()
    }

    pub async fn inbox(&self, user: &UserId) -> Vec<Notification> {
        self.notifications.find_by_recipient(user).await.unwrap()
    }
}

/// Intervention store whose writes always fail; reads go through.
pub(crate) struct BrokenInterventionWrites(pub Arc<dyn InterventionRepository>);

#[async_trait]
impl InterventionRepository for BrokenInterventionWrites {
    async fn save(&self, _intervention: &Intervention) -> Result<(), DomainError> {
        Err(DomainError::database("transient"))
    }

    async fn update(&self, _intervention: &Intervention) -> Result<(), DomainError> {
        Err(DomainError::database("transient"))
    }

    async fn delete(&self, _id: &InterventionId) -> Result<(), DomainError> {
        Err(DomainError::database("transient"))
    }

    async fn find_by_id(&self, id: &InterventionId) -> Result<Option<Intervention>, DomainError> {
        self.0.find_by_id(id).await
    }

    async fn find_by_intervenant(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Intervention>, DomainError> {
        self.0.find_by_intervenant(user_id).await
    }

    async fn find_detection_candidates(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<Intervention>, DomainError> {
        self.0.find_detection_candidates(today).await
    }

    async fn find_late_unresolved(&self) -> Result<Vec<Intervention>, DomainError> {
        self.0.find_late_unresolved().await
    }
}

/// Delay store whose writes always fail; reads go through.
pub(crate) struct BrokenDelayWrites(pub Arc<dyn DelayRepository>);

#[async_trait]
impl DelayRepository for BrokenDelayWrites {
    async fn save(&self, _delay: &Delay) -> Result<(), DomainError> {
        Err(DomainError::database("disk full"))
    }

    async fn update(&self, _delay: &Delay) -> Result<(), DomainError> {
        Err(DomainError::database("disk full"))
    }

    async fn find_by_id(&self, id: &DelayId) -> Result<Option<Delay>, DomainError> {
        self.0.find_by_id(id).await
    }

    async fn find_by_intervention(
        &self,
        intervention_id: &InterventionId,
    ) -> Result<Vec<Delay>, DomainError> {
        self.0.find_by_intervention(intervention_id).await
    }

    async fn find_by_responsible(&self, user_id: &UserId) -> Result<Vec<Delay>, DomainError> {
        self.0.find_by_responsible(user_id).await
    }

    async fn find_all(&self) -> Result<Vec<Delay>, DomainError> {
        self.0.find_all().await
    }
}
