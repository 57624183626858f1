use prizm_application::{SessionLifecycleController, SessionStore};
use prizm_core::PrizmError;
use prizm_core::config::DeliverySettings;
use prizm_core::debate::{
    DatasetRepository, DebateDataset, StaticDatasetRepository, builtin_dataset, compile,
};
use prizm_core::delivery::{DeliveryStatus, JobState};
use prizm_core::session::{ActiveView, Attachment, Message, MessageRole};
use prizm_core::timer::VirtualClock;
use std::sync::Arc;
use std::time::Duration;

const INTERVAL: Duration = Duration::from_millis(2500);
const START_DELAY: Duration = Duration::from_millis(500);

struct FailingDatasetRepository;

impl DatasetRepository for FailingDatasetRepository {
    fn load(&self) -> prizm_core::Result<DebateDataset> {
        Err(PrizmError::io("dataset file is unreadable"))
    }
}

fn controller_with(
    datasets: Arc<dyn DatasetRepository>,
    settings: DeliverySettings,
) -> (SessionLifecycleController, VirtualClock) {
    let clock = VirtualClock::new();
    let controller = SessionLifecycleController::new(
        SessionStore::new(),
        Arc::new(clock.clone()),
        datasets,
        settings,
    )
    .expect("valid settings");
    (controller, clock)
}

fn builtin_controller() -> (SessionLifecycleController, VirtualClock) {
    controller_with(
        Arc::new(StaticDatasetRepository::new(builtin_dataset())),
        DeliverySettings::default(),
    )
}

fn roles(messages: &[Message]) -> Vec<MessageRole> {
    messages.iter().map(|m| m.role).collect()
}

#[test]
fn test_full_playback_of_two_records() {
    let (controller, clock) = builtin_controller();
    let session_id = controller
        .start_analysis("Assess the quarterly report", None)
        .unwrap();
    let projection = controller.projection();

    // Only the seed message exists before the start delay elapses
    assert_eq!(projection.messages_for(&session_id).len(), 1);
    assert_eq!(
        projection.delivery_status(&session_id),
        Some(DeliveryStatus::Scheduled)
    );

    clock.advance(START_DELAY + INTERVAL * 9);

    let messages = projection.messages_for(&session_id);
    assert_eq!(messages.len(), 10);
    assert_eq!(
        roles(&messages),
        vec![
            MessageRole::User,
            MessageRole::Extractor,
            MessageRole::Supportive,
            MessageRole::Opposing,
            MessageRole::Synthesizer,
            MessageRole::Extractor,
            MessageRole::Supportive,
            MessageRole::Opposing,
            MessageRole::Synthesizer,
            MessageRole::CompletionMarker,
        ]
    );
    assert_eq!(messages[0].body, "Assess the quarterly report");

    let delivered: Vec<_> = messages[1..].iter().map(Message::payload).collect();
    assert_eq!(delivered, compile(&builtin_dataset().records));

    let handle = controller.delivery_handle(&session_id).unwrap();
    assert_eq!(handle.state(), JobState::Completed);
    assert_eq!(
        projection.delivery_status(&session_id),
        Some(DeliveryStatus::Completed)
    );
    assert!(!projection.is_delivering(&session_id));
    assert_eq!(clock.pending(), 0);
}

#[test]
fn test_first_message_waits_for_start_delay_and_interval() {
    let (controller, clock) = builtin_controller();
    let session_id = controller.start_analysis("Assess", None).unwrap();
    let projection = controller.projection();

    clock.advance(START_DELAY);
    assert!(controller.delivery_handle(&session_id).is_some());
    assert_eq!(projection.messages_for(&session_id).len(), 1);

    clock.advance(INTERVAL - Duration::from_millis(1));
    assert_eq!(projection.messages_for(&session_id).len(), 1);

    clock.advance(Duration::from_millis(1));
    assert_eq!(projection.messages_for(&session_id).len(), 2);
}

#[test]
fn test_empty_request_is_rejected_without_side_effects() {
    let (controller, clock) = builtin_controller();

    let err = controller.start_analysis("", None).unwrap_err();
    assert!(err.is_invalid_request());

    let err = controller.start_analysis("   \n", None).unwrap_err();
    assert!(err.is_invalid_request());

    assert!(controller.projection().sessions().is_empty());
    assert_eq!(controller.active_view(), ActiveView::NoSessionSelected);
    assert_eq!(clock.pending(), 0);
}

#[test]
fn test_attachment_only_request_is_accepted() {
    let (controller, _clock) = builtin_controller();
    let attachment = Attachment::named("q3-report.pdf");

    let session_id = controller.start_analysis("", Some(&attachment)).unwrap();

    let sessions = controller.projection().sessions();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].title, "q3-report.pdf");

    let messages = controller.projection().messages_for(&session_id);
    assert_eq!(messages[0].role, MessageRole::User);
    assert!(messages[0].body.contains("q3-report.pdf"));
}

#[test]
fn test_new_analysis_becomes_active() {
    let (controller, _clock) = builtin_controller();
    let first = controller.start_analysis("First", None).unwrap();
    assert_eq!(controller.active_session_id().as_deref(), Some(first.as_str()));

    let second = controller.start_analysis("Second", None).unwrap();
    assert_eq!(
        controller.active_view(),
        ActiveView::SessionActive {
            session_id: second.clone()
        }
    );

    let ids: Vec<_> = controller
        .projection()
        .sessions()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec![second, first]);
}

#[test]
fn test_sessions_play_back_independently() {
    let (controller, clock) = builtin_controller();
    let first = controller.start_analysis("First", None).unwrap();
    clock.advance(START_DELAY + INTERVAL * 2);
    let second = controller.start_analysis("Second", None).unwrap();

    clock.advance(START_DELAY + INTERVAL * 20);

    let projection = controller.projection();
    let expected = compile(&builtin_dataset().records);
    for id in [&first, &second] {
        let messages = projection.messages_for(id);
        assert_eq!(messages.len(), expected.len() + 1);
        let delivered: Vec<_> = messages[1..].iter().map(Message::payload).collect();
        assert_eq!(delivered, expected);
    }
}

#[test]
fn test_switching_keeps_background_playback_running() {
    let (controller, clock) = builtin_controller();
    let first = controller.start_analysis("First", None).unwrap();
    clock.advance(START_DELAY + INTERVAL);

    controller.switch_session(None).unwrap();
    assert_eq!(controller.active_view(), ActiveView::NoSessionSelected);

    clock.advance(INTERVAL * 10);
    assert_eq!(controller.projection().messages_for(&first).len(), 10);
    assert_eq!(
        controller.projection().delivery_status(&first),
        Some(DeliveryStatus::Completed)
    );
}

#[test]
fn test_cancel_on_switch_stops_previous_playback() {
    let settings = DeliverySettings {
        cancel_on_switch: true,
        ..DeliverySettings::default()
    };
    let (controller, clock) = controller_with(
        Arc::new(StaticDatasetRepository::new(builtin_dataset())),
        settings,
    );
    let first = controller.start_analysis("First", None).unwrap();
    clock.advance(START_DELAY + INTERVAL * 2);
    let second = controller.start_analysis("Second", None).unwrap();

    clock.advance(START_DELAY + INTERVAL * 20);

    let projection = controller.projection();
    assert_eq!(projection.messages_for(&first).len(), 3);
    assert_eq!(
        projection.delivery_status(&first),
        Some(DeliveryStatus::Cancelled)
    );
    assert_eq!(projection.messages_for(&second).len(), 10);
}

#[test]
fn test_switch_to_unknown_session_fails() {
    let (controller, _clock) = builtin_controller();
    let id = controller.start_analysis("First", None).unwrap();

    let err = controller.switch_session(Some("missing")).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(controller.active_session_id().as_deref(), Some(id.as_str()));
}

#[test]
fn test_switch_back_to_existing_session() {
    let (controller, _clock) = builtin_controller();
    let first = controller.start_analysis("First", None).unwrap();
    controller.start_analysis("Second", None).unwrap();

    controller.switch_session(Some(&first)).unwrap();
    assert_eq!(controller.active_session_id().as_deref(), Some(first.as_str()));
}

#[test]
fn test_cancel_before_start_delay_prevents_playback() {
    let (controller, clock) = builtin_controller();
    let id = controller.start_analysis("First", None).unwrap();

    assert!(controller.cancel_delivery(&id));
    assert!(!controller.cancel_delivery(&id));
    clock.advance(START_DELAY + INTERVAL * 20);

    let projection = controller.projection();
    assert_eq!(projection.messages_for(&id).len(), 1);
    assert_eq!(projection.delivery_status(&id), Some(DeliveryStatus::Cancelled));
    assert!(controller.delivery_handle(&id).is_none());
}

#[test]
fn test_cancel_mid_playback_halts_growth() {
    let (controller, clock) = builtin_controller();
    let id = controller.start_analysis("First", None).unwrap();
    clock.advance(START_DELAY + INTERVAL * 3);

    assert!(controller.cancel_delivery(&id));
    clock.advance(INTERVAL * 20);

    assert_eq!(controller.projection().messages_for(&id).len(), 4);
    assert_eq!(
        controller.delivery_handle(&id).unwrap().state(),
        JobState::Cancelled
    );
}

#[test]
fn test_shutdown_cancels_everything() {
    let (controller, clock) = builtin_controller();
    let first = controller.start_analysis("First", None).unwrap();
    clock.advance(Duration::from_millis(100));
    let second = controller.start_analysis("Second", None).unwrap();
    let third = controller.start_analysis("Third", None).unwrap();
    clock.advance(START_DELAY + INTERVAL);
    controller.cancel_delivery(&third);

    controller.shutdown();
    clock.advance(INTERVAL * 20);

    let projection = controller.projection();
    for id in [&first, &second, &third] {
        assert_eq!(projection.delivery_status(id), Some(DeliveryStatus::Cancelled));
    }
    assert_eq!(projection.messages_for(&first).len(), 2);
    assert_eq!(clock.pending(), 0);
}

#[test]
fn test_unreadable_dataset_still_completes() {
    let (controller, clock) =
        controller_with(Arc::new(FailingDatasetRepository), DeliverySettings::default());
    let id = controller.start_analysis("First", None).unwrap();

    clock.advance(START_DELAY + INTERVAL);

    let messages = controller.projection().messages_for(&id);
    assert_eq!(
        roles(&messages),
        vec![MessageRole::User, MessageRole::CompletionMarker]
    );
    assert_eq!(
        controller.projection().delivery_status(&id),
        Some(DeliveryStatus::Completed)
    );
}

#[test]
fn test_zero_interval_is_a_config_error() {
    let settings = DeliverySettings {
        interval_ms: 0,
        ..DeliverySettings::default()
    };
    let result = SessionLifecycleController::new(
        SessionStore::new(),
        Arc::new(VirtualClock::new()),
        Arc::new(StaticDatasetRepository::new(builtin_dataset())),
        settings,
    );
    assert!(result.is_err_and(|e| e.is_config()));
}

#[test]
fn test_snapshots_grow_as_prefixes() {
    let (controller, clock) = builtin_controller();
    let id = controller.start_analysis("First", None).unwrap();
    let projection = controller.projection();

    let mut previous = projection.messages_for(&id);
    for _ in 0..25 {
        clock.advance(INTERVAL / 2);
        let current = projection.messages_for(&id);
        assert!(current.len() >= previous.len());
        assert_eq!(&current[..previous.len()], previous.as_slice());
        previous = current;
    }
    assert_eq!(previous.len(), 10);
}
