//! Integration tests for the delay detection pass.
//!
//! Everything runs against the in-memory store wired through `AppState`,
//! with a clock pinned to 2024-01-05 08:00 UTC.

use chrono::NaiveDate;
use proptest::prelude::*;
use std::sync::Arc;

use mission_manager::adapters::http::AppState;
use mission_manager::adapters::FixedClock;
use mission_manager::application::handlers::{DelayDefaults, RunDelayDetectionCommand};
use mission_manager::domain::delay::{automatic_reason, DelayKind};
use mission_manager::domain::foundation::{
    Actor, ClientId, InterventionId, InterventionStatus, MissionId, Role, Timestamp, UserId,
    WorkflowError,
};
use mission_manager::domain::intervention::{
    DelayFlags, FieldReport, Intervention, NewIntervention, Priority,
};
use mission_manager::domain::mission::{Mission, NewMission};
use mission_manager::domain::notification::NotificationKind;
use mission_manager::domain::user::User;
use mission_manager::ports::{
    DelayRepository, InterventionRepository, MissionRepository, NotificationRepository,
    UserRepository,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

const NOW_SECS: i64 = 1_704_441_600;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    date(2024, 1, 5)
}

fn state() -> AppState {
    let clock = Arc::new(FixedClock::new(Timestamp::from_unix_secs(NOW_SECS)));
    AppState::in_memory(clock, DelayDefaults::default())
}

async fn user(state: &AppState, username: &str, role: Role) -> Actor {
    let user = User::new(UserId::new(), username, format!("{}@example.com", username), role)
        .unwrap()
        .with_name(username.to_uppercase(), "Test");
    state.users.save(&user).await.unwrap();
    user.as_actor()
}

async fn mission(state: &AppState) -> Mission {
    let mission = Mission::new(
        MissionId::new(),
        NewMission {
            client_id: ClientId::new(),
            title: "Quarterly HVAC check".to_string(),
            description: String::new(),
            nature: "maintenance".to_string(),
            start_date: date(2023, 12, 1),
            place: "Grenoble".to_string(),
            frequency: "quarterly".to_string(),
            assignee_id: None,
        },
        Timestamp::from_unix_secs(NOW_SECS),
    )
    .unwrap();
    state.missions.save(&mission).await.unwrap();
    mission
}

async fn intervention(
    state: &AppState,
    mission: &Mission,
    intervenant: Option<UserId>,
    due_date: NaiveDate,
) -> Intervention {
    let intervention = Intervention::new(
        InterventionId::new(),
        NewIntervention {
            mission_id: *mission.id(),
            title: "Replace filters".to_string(),
            intervenant_id: intervenant,
            scheduled_date: date(2023, 12, 28),
            due_date,
            priority: Priority::Normal,
            resources: String::new(),
        },
        UserId::new(),
        Timestamp::from_unix_secs(NOW_SECS),
    )
    .unwrap();
    state.interventions.save(&intervention).await.unwrap();
    intervention
}

// =============================================================================
// Detection pass
// =============================================================================

#[tokio::test]
async fn overdue_intervention_is_flagged_with_delay_and_notifications() {
    let state = state();
    let admin_a = user(&state, "alice", Role::Administrator).await;
    let admin_b = user(&state, "bob", Role::Administrator).await;
    let tech = user(&state, "tech", Role::Freelancer).await;
    let mission = mission(&state).await;
    let overdue = intervention(&state, &mission, Some(tech.user_id), date(2024, 1, 1)).await;

    let flagged = state
        .detect_overdue_handler()
        .detect_and_flag(today())
        .await
        .unwrap();

    assert_eq!(flagged.len(), 1);
    let stored = state
        .interventions
        .find_by_id(overdue.id())
        .await
        .unwrap()
        .unwrap();
    assert!(stored.is_late());
    assert_eq!(
        stored.delay().late_since,
        Some(Timestamp::from_unix_secs(NOW_SECS))
    );
    assert!(!stored.delay().resolved);

    let delays = state.delays.find_by_intervention(overdue.id()).await.unwrap();
    assert_eq!(delays.len(), 1);
    assert_eq!(delays[0].kind(), DelayKind::End);
    assert_eq!(delays[0].reason(), automatic_reason(date(2024, 1, 1)));
    assert_eq!(delays[0].responsible_id(), Some(&tech.user_id));
    assert!(!delays[0].is_resolved());

    let tech_inbox = state.notifications.find_by_recipient(&tech.user_id).await.unwrap();
    assert_eq!(tech_inbox.len(), 1);
    assert_eq!(tech_inbox[0].kind(), NotificationKind::RetardAutomatique);
    assert!(tech_inbox[0].message().contains("01/01/2024"));

    for admin in [admin_a, admin_b] {
        let inbox = state.notifications.find_by_recipient(&admin.user_id).await.unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].kind(), NotificationKind::RetardAutomatiqueAdmin);
        assert!(inbox[0].message().contains("TECH Test"));
    }
}

#[tokio::test]
async fn second_run_on_the_same_day_flags_nothing() {
    let state = state();
    user(&state, "admin", Role::Administrator).await;
    let tech = user(&state, "tech", Role::Employee).await;
    let mission = mission(&state).await;
    let overdue = intervention(&state, &mission, Some(tech.user_id), date(2024, 1, 2)).await;

    let handler = state.detect_overdue_handler();
    assert_eq!(handler.detect_and_flag(today()).await.unwrap().len(), 1);
    assert!(handler.detect_and_flag(today()).await.unwrap().is_empty());

    assert_eq!(
        state.delays.find_by_intervention(overdue.id()).await.unwrap().len(),
        1
    );
    assert_eq!(
        state.notifications.find_by_recipient(&tech.user_id).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn due_today_completed_and_already_late_are_skipped() {
    let state = state();
    user(&state, "admin", Role::Administrator).await;
    let tech = user(&state, "tech", Role::Employee).await;
    let mission = mission(&state).await;

    intervention(&state, &mission, Some(tech.user_id), today()).await;

    let mut finished = intervention(&state, &mission, Some(tech.user_id), date(2024, 1, 1)).await;
    finished.start(&tech, Timestamp::from_unix_secs(NOW_SECS - 7_200)).unwrap();
    finished.finish(&tech, Timestamp::from_unix_secs(NOW_SECS - 3_600)).unwrap();
    state.interventions.update(&finished).await.unwrap();

    let mut late = intervention(&state, &mission, None, date(2023, 12, 30)).await;
    late.flag_late(Timestamp::from_unix_secs(NOW_SECS - 86_400));
    state.interventions.update(&late).await.unwrap();

    let flagged = state
        .detect_overdue_handler()
        .detect_and_flag(today())
        .await
        .unwrap();
    assert!(flagged.is_empty());
    assert!(state.delays.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn unassigned_intervention_only_notifies_admins() {
    let state = state();
    let admin = user(&state, "admin", Role::Administrator).await;
    let mission = mission(&state).await;
    intervention(&state, &mission, None, date(2024, 1, 3)).await;

    let flagged = state
        .detect_overdue_handler()
        .detect_and_flag(today())
        .await
        .unwrap();
    assert_eq!(flagged.len(), 1);

    let inbox = state.notifications.find_by_recipient(&admin.user_id).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert!(inbox[0].message().contains("unassigned"));
}

#[tokio::test]
async fn run_command_requires_an_administrator() {
    let state = state();
    let tech = user(&state, "tech", Role::Employee).await;

    let result = state
        .detect_overdue_handler()
        .handle(RunDelayDetectionCommand { actor: tech })
        .await;
    assert!(matches!(result, Err(WorkflowError::Unauthorized(_))));
}

#[tokio::test]
async fn run_command_reports_the_day_and_count() {
    let state = state();
    let admin = user(&state, "admin", Role::Administrator).await;
    let mission = mission(&state).await;
    intervention(&state, &mission, None, date(2024, 1, 1)).await;
    intervention(&state, &mission, None, date(2024, 1, 4)).await;

    let result = state
        .detect_overdue_handler()
        .handle(RunDelayDetectionCommand { actor: admin })
        .await
        .unwrap();
    assert_eq!(result.today, today());
    assert_eq!(result.count(), 2);
}

// =============================================================================
// Selection predicate
// =============================================================================

fn status_strategy() -> impl Strategy<Value = InterventionStatus> {
    prop_oneof![
        Just(InterventionStatus::Pending),
        Just(InterventionStatus::InProgress),
        Just(InterventionStatus::Completed),
    ]
}

fn reconstituted(status: InterventionStatus, due_offset: i64, late: bool) -> Intervention {
    let now = Timestamp::from_unix_secs(NOW_SECS);
    let started = (status != InterventionStatus::Pending).then_some(now);
    let finished = (status == InterventionStatus::Completed).then_some(now);
    Intervention::reconstitute(
        InterventionId::new(),
        MissionId::new(),
        "Generated".to_string(),
        None,
        None,
        date(2023, 12, 1),
        today() + chrono::Duration::days(due_offset),
        Priority::Normal,
        String::new(),
        status,
        started,
        finished,
        FieldReport::default(),
        DelayFlags {
            late,
            late_since: late.then_some(now),
            ..DelayFlags::default()
        },
        now,
        0,
    )
}

proptest! {
    #[test]
    fn candidate_iff_open_overdue_and_not_late(
        status in status_strategy(),
        due_offset in -30i64..30,
        late in any::<bool>(),
    ) {
        let intervention = reconstituted(status, due_offset, late);
        let expected = status != InterventionStatus::Completed && due_offset < 0 && !late;
        prop_assert_eq!(intervention.is_detection_candidate(today()), expected);
    }

    #[test]
    fn store_selects_exactly_the_candidates(
        specs in prop::collection::vec((status_strategy(), -10i64..10, any::<bool>()), 0..12),
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async {
            let state = state();
            let mut expected = Vec::new();
            for (status, offset, late) in specs {
                let intervention = reconstituted(status, offset, late);
                if intervention.is_detection_candidate(today()) {
                    expected.push(*intervention.id());
                }
                state.interventions.save(&intervention).await.unwrap();
            }

            let mut selected: Vec<_> = state
                .interventions
                .find_detection_candidates(today())
                .await
                .unwrap()
                .iter()
                .map(|i| *i.id())
                .collect();
            selected.sort();
            expected.sort();
            assert_eq!(selected, expected);
        });
    }
}
