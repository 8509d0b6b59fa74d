// End-to-end planning scenarios: gesture → snap → optimistic move → backend
mod fixtures;

use std::sync::Arc;
use std::time::{Duration, Instant};

use fixtures::{dates, RecordingBackend, ACTIVITY_ID};
use pretty_assertions::assert_eq;
use roadtrip_planner::models::planning_event::{EventKey, EventKind, MISSING_ADDRESS_LABEL};
use roadtrip_planner::models::step::Step;
use roadtrip_planner::services::api::{ApiError, HttpMethod, PlanningBackend};
use roadtrip_planner::services::planning::{
    shifted_range, snap_minutes, DragController, GestureOutcome, MoveError, MoveFailure,
    MoveResolution, MutationWorker, PlanningBoard,
};
use roadtrip_planner::utils::date::parse_wall_clock;
use serde_json::json;

const HOUR_HEIGHT: f32 = 60.0;
const SNAP: u32 = 15;

fn museum_key() -> EventKey {
    EventKey::new(EventKind::Activity, ACTIVITY_ID)
}

fn loaded_board(steps: &[Step]) -> PlanningBoard {
    let mut board = PlanningBoard::new();
    assert!(board.sync_steps(steps));
    board
}

/// Drive a full press/move/release gesture and return its outcome.
fn gesture(key: EventKey, draggable: bool, dy: f32, held: Duration) -> GestureOutcome {
    let pressed = Instant::now();
    let mut controller = DragController::new();
    controller.press(key, draggable, pressed);
    controller.pointer_moved((0.0, dy / 2.0));
    controller.release((0.0, dy), pressed + held)
}

/// What the app does with a drop: snap, range check, then the board.
fn drop_event(
    board: &mut PlanningBoard,
    backend: &dyn PlanningBackend,
    key: &EventKey,
    dy: f32,
) -> Result<Option<MoveResolution>, MoveError> {
    let minutes = snap_minutes(dy, HOUR_HEIGHT, SNAP);
    if minutes == 0 {
        return Ok(None);
    }
    let event = board.find(key).ok_or_else(|| MoveError::UnknownEvent(key.clone()))?;
    let (start, end) = shifted_range(event, minutes)?;
    board.attempt_move(backend, key, start, end).map(Some)
}

#[test]
fn test_successful_drag_moves_activity_two_hours() {
    let roadtrip = fixtures::sample_roadtrip();
    let mut board = loaded_board(&roadtrip.steps);
    let backend = RecordingBackend::new();

    let museum = board.find(&museum_key()).unwrap();
    assert_eq!(museum.start, parse_wall_clock("2025-07-01T10:00:00Z").unwrap());
    assert_eq!(museum.end, parse_wall_clock("2025-07-01T11:00:00Z").unwrap());

    let outcome = gesture(
        museum_key(),
        true,
        2.0 * HOUR_HEIGHT,
        Duration::from_millis(800),
    );
    let GestureOutcome::Drop { key, dy } = outcome else {
        panic!("expected a drop, got {:?}", outcome);
    };

    let resolution = drop_event(&mut board, &backend, &key, dy).unwrap();
    assert_eq!(resolution, Some(MoveResolution::Confirmed(museum_key())));

    let museum = board.find(&museum_key()).unwrap();
    assert_eq!(museum.start, dates::jul_1(12));
    assert_eq!(museum.end, dates::jul_1(13));

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Patch);
    assert_eq!(requests[0].path, format!("/activities/{}/dates", ACTIVITY_ID));
    assert_eq!(
        requests[0].body,
        Some(json!({
            "startDateTime": "2025-07-01T12:00:00.000Z",
            "endDateTime": "2025-07-01T13:00:00.000Z",
        }))
    );
}

#[test]
fn test_local_state_updates_before_the_call_resolves() {
    let roadtrip = fixtures::sample_roadtrip();
    let mut board = loaded_board(&roadtrip.steps);

    let ticket = board
        .begin_move(&museum_key(), dates::jul_1(12), dates::jul_1(13))
        .unwrap();

    // Nothing has been sent yet, the board already shows the new slot
    assert!(board.is_in_flight(&museum_key()));
    assert_eq!(board.find(&museum_key()).unwrap().start, dates::jul_1(12));
    assert_eq!(ticket.request.path, format!("/activities/{}/dates", ACTIVITY_ID));

    let resolution = board.finish_move(&ticket.receipt, Ok(()));
    assert_eq!(resolution, MoveResolution::Confirmed(museum_key()));
    assert!(!board.is_in_flight(&museum_key()));
}

#[test]
fn test_blocked_drag_without_address() {
    let steps = vec![fixtures::lyon_stage("")];
    let mut board = loaded_board(&steps);
    let backend = RecordingBackend::new();
    let before = board.events().to_vec();

    let museum = board.find(&museum_key()).unwrap();
    assert!(!museum.is_draggable());
    assert_eq!(MISSING_ADDRESS_LABEL, "⚠️ Adresse manquante");

    // The controller never starts a drag on an ineligible event
    let outcome = gesture(
        museum_key(),
        museum.is_draggable(),
        2.0 * HOUR_HEIGHT,
        Duration::from_millis(800),
    );
    assert_eq!(outcome, GestureOutcome::Ignored);

    // Even when asked directly, the board refuses without calling out
    let err = board
        .attempt_move(&backend, &museum_key(), dates::jul_1(12), dates::jul_1(13))
        .unwrap_err();
    assert!(matches!(err, MoveError::Ineligible { .. }));
    assert!(err.user_message().contains("adresse"));

    assert_eq!(board.events(), before.as_slice());
    assert!(backend.requests().is_empty());
}

#[test]
fn test_out_of_range_drag_is_refused() {
    let roadtrip = fixtures::sample_roadtrip();
    let mut board = loaded_board(&roadtrip.steps);
    let backend = RecordingBackend::new();
    let before = board.events().to_vec();

    // 10:00-11:00 pushed down 13 hours would end at 24:00
    let err = drop_event(&mut board, &backend, &museum_key(), 13.0 * HOUR_HEIGHT).unwrap_err();
    assert!(matches!(err, MoveError::OutOfDay(_)));
    assert!(!err.user_message().is_empty());

    assert_eq!(board.events(), before.as_slice());
    assert!(backend.requests().is_empty());
}

#[test]
fn test_tap_never_reaches_the_mutation_path() {
    let outcome = gesture(museum_key(), true, 4.0, Duration::from_millis(150));
    assert_eq!(outcome, GestureOutcome::Tap(museum_key()));

    // A slow press without movement is neither a tap nor a drag
    let outcome = gesture(museum_key(), true, 0.0, Duration::from_millis(900));
    assert_eq!(outcome, GestureOutcome::Ignored);
}

#[test]
fn test_small_drag_snaps_to_no_change() {
    let roadtrip = fixtures::sample_roadtrip();
    let mut board = loaded_board(&roadtrip.steps);
    let backend = RecordingBackend::new();

    // 12 px at 60 px/h is 12 minutes, which rounds to 15
    assert_eq!(snap_minutes(12.0, HOUR_HEIGHT, SNAP), 15);
    // 6 px is 6 minutes, which rounds to 0
    let resolution = drop_event(&mut board, &backend, &museum_key(), 6.0).unwrap();
    assert_eq!(resolution, None);
    assert!(backend.requests().is_empty());
}

#[test]
fn test_rejected_move_rolls_back() {
    let roadtrip = fixtures::sample_roadtrip();
    let mut board = loaded_board(&roadtrip.steps);
    let before = board.events().to_vec();

    let backend = RecordingBackend::new();
    backend.reply_with(Err(ApiError::Status {
        status: 500,
        body: "boom".to_string(),
    }));

    let resolution = drop_event(&mut board, &backend, &museum_key(), 2.0 * HOUR_HEIGHT)
        .unwrap()
        .unwrap();
    assert!(matches!(
        resolution,
        MoveResolution::RolledBack {
            failure: MoveFailure::Rejected { status: 500 },
            ..
        }
    ));
    assert_eq!(board.events(), before.as_slice());
    assert_eq!(backend.requests().len(), 1);
}

#[test]
fn test_missing_route_address_failure_is_specific() {
    let roadtrip = fixtures::sample_roadtrip();
    let mut board = loaded_board(&roadtrip.steps);

    let backend = RecordingBackend::new();
    backend.reply_with(Err(ApiError::Status {
        status: 400,
        body: r#"{"code":"MISSING_ROUTE_ADDRESS"}"#.to_string(),
    }));

    let resolution = board
        .attempt_move(&backend, &museum_key(), dates::jul_1(12), dates::jul_1(13))
        .unwrap();
    let MoveResolution::RolledBack { failure, .. } = resolution else {
        panic!("expected a rollback");
    };
    assert_eq!(failure, MoveFailure::MissingRouteAddress);
    assert_eq!(board.find(&museum_key()).unwrap().start, dates::jul_1(10));
}

#[test]
fn test_reload_supersedes_in_flight_move() {
    let roadtrip = fixtures::sample_roadtrip();
    let mut board = loaded_board(&roadtrip.steps);

    let ticket = board
        .begin_move(&museum_key(), dates::jul_1(12), dates::jul_1(13))
        .unwrap();

    // Someone else moved the museum in the meantime
    let mut changed = roadtrip.steps.clone();
    changed[1].activities[0].start_date_time = dates::jul_1(14);
    changed[1].activities[0].end_date_time = dates::jul_1(15);
    assert!(board.sync_steps(&changed));

    // The late failure of the superseded move must not touch the new list
    let resolution = board.finish_move(
        &ticket.receipt,
        Err(ApiError::Network("timeout".to_string())),
    );
    assert_eq!(resolution, MoveResolution::Stale(museum_key()));
    assert_eq!(board.find(&museum_key()).unwrap().start, dates::jul_1(14));
}

#[test]
fn test_unchanged_reload_keeps_optimistic_state() {
    let roadtrip = fixtures::sample_roadtrip();
    let mut board = loaded_board(&roadtrip.steps);

    board
        .begin_move(&museum_key(), dates::jul_1(12), dates::jul_1(13))
        .unwrap();

    assert!(!board.sync_steps(&roadtrip.steps.clone()));
    assert!(board.is_in_flight(&museum_key()));
    assert_eq!(board.find(&museum_key()).unwrap().start, dates::jul_1(12));
}

#[test]
fn test_edit_save_reload_keeps_pending_drag() {
    let roadtrip = fixtures::sample_roadtrip();
    let mut board = loaded_board(&roadtrip.steps);

    let ticket = board
        .begin_move(&museum_key(), dates::jul_1(12), dates::jul_1(13))
        .unwrap();

    // Saving notes on the stop invalidates the board; the server has not
    // applied the museum move yet
    let mut edited = roadtrip.steps.clone();
    edited[0].notes = "Plein d'essence".to_string();
    board.invalidate();
    assert!(board.sync_steps(&edited));
    assert_eq!(board.find(&museum_key()).unwrap().start, dates::jul_1(12));

    assert_eq!(
        board.finish_move(&ticket.receipt, Ok(())),
        MoveResolution::Confirmed(museum_key())
    );
    let museum = board.find(&museum_key()).unwrap();
    assert_eq!((museum.start, museum.end), (dates::jul_1(12), dates::jul_1(13)));
}

#[test]
fn test_reload_with_saved_move_supersedes_it() {
    let roadtrip = fixtures::sample_roadtrip();
    let mut board = loaded_board(&roadtrip.steps);

    let ticket = board
        .begin_move(&museum_key(), dates::jul_1(12), dates::jul_1(13))
        .unwrap();

    // The server already stores the new slot when the reload lands
    let mut saved = roadtrip.steps.clone();
    saved[1].activities[0].start_date_time = dates::jul_1(12);
    saved[1].activities[0].end_date_time = dates::jul_1(13);
    assert!(board.sync_steps(&saved));
    assert!(!board.is_in_flight(&museum_key()));

    assert_eq!(
        board.finish_move(&ticket.receipt, Ok(())),
        MoveResolution::Stale(museum_key())
    );
    assert_eq!(board.find(&museum_key()).unwrap().start, dates::jul_1(12));
}

#[test]
fn test_second_drag_waits_for_the_first() {
    let roadtrip = fixtures::sample_roadtrip();
    let mut board = loaded_board(&roadtrip.steps);

    board
        .begin_move(&museum_key(), dates::jul_1(12), dates::jul_1(13))
        .unwrap();
    let err = board
        .begin_move(&museum_key(), dates::jul_1(14), dates::jul_1(15))
        .unwrap_err();
    assert_eq!(err, MoveError::InFlight(museum_key()));
}

#[test]
fn test_worker_round_trip() {
    let roadtrip = fixtures::sample_roadtrip();
    let mut board = loaded_board(&roadtrip.steps);
    let backend = Arc::new(RecordingBackend::new());
    let mut worker = MutationWorker::new(backend.clone());

    let ticket = board
        .begin_move(&museum_key(), dates::jul_1(12), dates::jul_1(13))
        .unwrap();
    worker.dispatch(ticket);

    let deadline = Instant::now() + Duration::from_secs(5);
    let done = loop {
        let mut finished = worker.poll();
        if let Some(done) = finished.pop() {
            break done;
        }
        assert!(Instant::now() < deadline, "worker never answered");
        std::thread::sleep(Duration::from_millis(5));
    };

    assert_eq!(worker.pending(), 0);
    assert_eq!(
        board.finish_move(&done.receipt, done.outcome),
        MoveResolution::Confirmed(museum_key())
    );
    assert_eq!(backend.requests().len(), 1);
}
