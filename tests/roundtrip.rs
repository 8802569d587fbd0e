//! End-to-end round trips through the public API, including edits that
//! survive process recreation via a snapshot persisted to disk.

use prefscreen::{
    Bundle, DeliveryOutcome, DispatchOutcome, EditorHost, LaunchRequest, MemoryStore,
    Presentation, PreferenceStore, RowSpec, ScreenController, SelectionMode, SelectionValues,
    Time, TimePeriod,
};
use prefscreen::result::{
    KEY_INPUT_VALUE, KEY_RESULT_CODE, KEY_SELECTED_TIME_PERIOD, KEY_SELECTION, RESULT_CANCELED,
    RESULT_OK,
};

#[derive(Default)]
struct RecordingHost {
    requests: Vec<LaunchRequest>,
}

impl EditorHost for RecordingHost {
    fn launch(&mut self, request: LaunchRequest) {
        self.requests.push(request);
    }
}

fn screen() -> ScreenController {
    let mut controller = ScreenController::with_default_editors();
    controller
        .add_row("user.name", "Name", RowSpec::text())
        .unwrap();
    controller
        .add_row(
            "alert.level",
            "Alert level",
            RowSpec::SingleSelection {
                labels: vec!["Quiet".to_string(), "Normal".to_string(), "Loud".to_string()],
                values: SelectionValues::Int(vec![0, 1, 2]),
                mode: SelectionMode::OkCancel,
            },
        )
        .unwrap();
    controller
        .add_row(
            "night.hours",
            "Night hours",
            RowSpec::time_period(
                TimePeriod::new(Time::new(22, 0, 0), Time::new(6, 0, 0)),
                true,
            ),
        )
        .unwrap();
    controller
        .add_row("sound.enabled", "Sound", RowSpec::Toggle)
        .unwrap();
    controller
}

fn launched(outcome: DispatchOutcome) -> i64 {
    match outcome {
        DispatchOutcome::Launched(id) => id,
        DispatchOutcome::Applied => panic!("expected a launch"),
    }
}

#[test]
fn uninterrupted_edit_round_trip() {
    let mut controller = screen();
    controller.commit();
    let mut store = MemoryStore::new();
    let mut host = RecordingHost::default();

    let cid = launched(controller.activate_row(0, &mut store, &mut host).unwrap());
    assert_eq!(host.requests[0].presentation, Presentation::Dialog);

    let mut result = Bundle::new();
    result.put_int(KEY_RESULT_CODE, RESULT_OK);
    result.put_str(KEY_INPUT_VALUE, "Alice");
    let outcome = controller.deliver_result(cid, &result, &mut store).unwrap();
    assert!(matches!(outcome, DeliveryOutcome::Applied { .. }));
    assert_eq!(store.get_string("user.name").as_deref(), Some("Alice"));
}

#[test]
fn edit_survives_process_recreation_through_a_snapshot_file() {
    let mut store = MemoryStore::new();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("screen.json");

    // First process: launch the time period screen, then die mid-edit.
    let cid = {
        let mut controller = screen();
        controller.commit();
        let mut host = RecordingHost::default();
        let cid = launched(controller.activate_row(2, &mut store, &mut host).unwrap());
        assert_eq!(host.requests[0].presentation, Presentation::Screen);
        controller.save_state().save_to_file(&path).unwrap();
        cid
    };

    // Second process: rebuild the screen, thaw, then receive the result.
    let snapshot = Bundle::load_from_file(&path).unwrap();
    let mut controller = screen();
    controller.restore(&snapshot).unwrap();
    controller.commit();

    let mut result = Bundle::new();
    result.put_int(KEY_RESULT_CODE, RESULT_OK);
    result.put_str(KEY_SELECTED_TIME_PERIOD, "23:15-5:45");
    let outcome = controller.deliver_result(cid, &result, &mut store).unwrap();
    assert!(matches!(outcome, DeliveryOutcome::Applied { .. }));
    assert_eq!(
        store.get_string("night.hours").as_deref(),
        Some("23:15:00-5:45:00")
    );
    assert_eq!(
        controller.display_text(2, &store).as_deref(),
        Some("23:15-5:45")
    );
}

#[test]
fn thawed_edit_matches_the_uninterrupted_one() {
    let mut result = Bundle::new();
    result.put_int(KEY_RESULT_CODE, RESULT_OK);
    result.put_int(KEY_SELECTION, 2);

    let mut direct_store = MemoryStore::new();
    {
        let mut controller = screen();
        controller.commit();
        let mut host = RecordingHost::default();
        let cid = launched(
            controller
                .activate_row(1, &mut direct_store, &mut host)
                .unwrap(),
        );
        controller
            .deliver_result(cid, &result, &mut direct_store)
            .unwrap();
    }

    let mut thawed_store = MemoryStore::new();
    {
        let mut controller = screen();
        controller.commit();
        let mut host = RecordingHost::default();
        let cid = launched(
            controller
                .activate_row(1, &mut thawed_store, &mut host)
                .unwrap(),
        );
        let frozen = controller.save_state();

        let mut rebuilt = screen();
        rebuilt.restore(&frozen).unwrap();
        rebuilt.commit();
        rebuilt
            .deliver_result(cid, &result, &mut thawed_store)
            .unwrap();
    }

    assert_eq!(direct_store.get_int("alert.level"), Some(2));
    assert_eq!(
        thawed_store.get_int("alert.level"),
        direct_store.get_int("alert.level")
    );
}

#[test]
fn cancellation_never_mutates_the_store() {
    let mut controller = screen();
    controller.commit();
    let mut store = MemoryStore::new();
    store.set_string("user.name", "before");
    let mut host = RecordingHost::default();

    let cid = launched(controller.activate_row(0, &mut store, &mut host).unwrap());
    let mut result = Bundle::new();
    result.put_int(KEY_RESULT_CODE, RESULT_CANCELED);
    let outcome = controller.deliver_result(cid, &result, &mut store).unwrap();
    assert!(matches!(outcome, DeliveryOutcome::Cancelled { .. }));
    assert_eq!(store.get_string("user.name").as_deref(), Some("before"));
    assert_eq!(store.len(), 1);
}

#[test]
fn unknown_correlation_id_is_ignored() {
    let mut controller = screen();
    controller.commit();
    let mut store = MemoryStore::new();

    let mut result = Bundle::new();
    result.put_int(KEY_RESULT_CODE, RESULT_OK);
    result.put_str(KEY_INPUT_VALUE, "phantom");
    let outcome = controller.deliver_result(77, &result, &mut store).unwrap();
    assert_eq!(outcome, DeliveryOutcome::Ignored);
    assert!(store.is_empty());
}

#[test]
fn toggle_rows_apply_without_any_launch() {
    let mut controller = screen();
    controller.commit();
    let mut store = MemoryStore::new();
    let mut host = RecordingHost::default();

    let outcome = controller.activate_row(3, &mut store, &mut host).unwrap();
    assert_eq!(outcome, DispatchOutcome::Applied);
    assert!(host.requests.is_empty());
    assert_eq!(store.get_bool("sound.enabled"), Some(true));
    assert_eq!(controller.display_text(3, &store).as_deref(), Some("on"));
}
