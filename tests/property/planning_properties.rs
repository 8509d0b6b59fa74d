// Property-based tests for grid positioning, snapping and projection
// Random inputs check the layout and projection rules hold for any itinerary

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use roadtrip_planner::models::planning_event::{event_color, EventKind, PlanningEvent};
use roadtrip_planner::models::step::{Activity, ActivityType, Roadtrip, Step, StepType};
use roadtrip_planner::services::api::{ApiError, ApiRequest, PlanningBackend};
use roadtrip_planner::services::planning::{
    project_events, snap_minutes, EventProjector, GridMetrics, MoveResolution, PlanningBoard,
};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
}

fn at_minutes(minutes: i64) -> NaiveDateTime {
    day().and_hms_opt(0, 0, 0).unwrap() + Duration::minutes(minutes)
}

fn activity_event(start_minutes: i64, end_minutes: i64, address: &str) -> PlanningEvent {
    PlanningEvent {
        id: "act".to_string(),
        title: "Activité".to_string(),
        start: at_minutes(start_minutes),
        end: at_minutes(end_minutes),
        kind: EventKind::Activity,
        color: event_color(EventKind::Activity, None).to_string(),
        step_id: "stage".to_string(),
        step_type: StepType::Stage,
        step_address: "Lyon".to_string(),
        address: address.to_string(),
        notes: String::new(),
        activity_type: Some(ActivityType::Other),
    }
}

/// Stages with a few activities each, at whole-minute times on one day.
fn arb_steps() -> impl Strategy<Value = Vec<Step>> {
    let activity = (0i64..1380, 1i64..60, any::<bool>());
    prop::collection::vec(prop::collection::vec(activity, 0..4), 1..4).prop_map(|stages| {
        stages
            .into_iter()
            .enumerate()
            .map(|(s, activities)| {
                let mut step = Step::stage(
                    format!("stage-{}", s),
                    format!("Étape {}", s),
                    "Lyon",
                    at_minutes(0),
                    at_minutes(1439),
                );
                for (a, (start, length, has_address)) in activities.into_iter().enumerate() {
                    step = step.with_activity(Activity {
                        id: format!("act-{}-{}", s, a),
                        name: format!("Activité {}", a),
                        address: if has_address { "Quai".to_string() } else { String::new() },
                        start_date_time: at_minutes(start),
                        end_date_time: at_minutes(start + length),
                        activity_type: ActivityType::Other,
                        notes: String::new(),
                    });
                }
                step
            })
            .collect()
    })
}

/// Backend that refuses everything and counts calls.
struct RefusingBackend {
    calls: std::sync::atomic::AtomicUsize,
}

impl PlanningBackend for RefusingBackend {
    fn fetch_roadtrip(&self, _roadtrip_id: &str) -> Result<Roadtrip, ApiError> {
        Err(ApiError::Network("offline".to_string()))
    }

    fn send(&self, _request: &ApiRequest) -> Result<(), ApiError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Err(ApiError::Status {
            status: 503,
            body: "unavailable".to_string(),
        })
    }
}

proptest! {
    /// Property: top is start hours × hour height and height never drops
    /// below the minimum
    #[test]
    fn prop_event_box_matches_hours(
        h1 in 0u32..24,
        span in 1u32..=24,
        hour_height in 30.0f32..=240.0,
        min_height in 5.0f32..=30.0,
    ) {
        let h2 = (h1 + span).min(24);
        prop_assume!(h1 < h2);

        let metrics = GridMetrics { hour_height, min_event_height: min_height };
        let event = activity_event(h1 as i64 * 60, h2 as i64 * 60, "Quai");
        let event_box = metrics.event_box(&event);

        let expected_height = ((h2 - h1) as f32 * hour_height).max(min_height);
        prop_assert!((event_box.top - h1 as f32 * hour_height).abs() < 1e-3);
        prop_assert!((event_box.height - expected_height).abs() < 1e-2);
    }

    /// Property: the applied delta is the raw minute delta rounded to the
    /// nearest multiple of the interval
    #[test]
    fn prop_snap_is_nearest_multiple(
        dy in -2000.0f32..2000.0,
        hour_height in 30.0f32..=240.0,
        interval in prop::sample::select(vec![5u32, 10, 15, 20, 30, 60]),
    ) {
        let minutes = snap_minutes(dy, hour_height, interval);
        let raw = dy as f64 / hour_height as f64 * 60.0;
        let expected = ((raw / interval as f64).round() * interval as f64) as i64;

        prop_assert_eq!(minutes, expected);
        prop_assert_eq!(minutes % interval as i64, 0);
    }

    /// Property: projecting the same content twice never replaces the list
    #[test]
    fn prop_projection_is_idempotent(steps in arb_steps()) {
        let mut projector = EventProjector::new();
        let first = projector.project_if_changed(&steps);
        prop_assert!(first.is_some());

        // A deep copy has the same content but a different identity
        let copy = steps.clone();
        prop_assert!(projector.project_if_changed(&copy).is_none());
        prop_assert_eq!(first.unwrap(), project_events(&copy));
    }

    /// Property: an event without an address never reaches the backend, and a
    /// refused move restores the original times
    #[test]
    fn prop_refused_moves_leave_the_board_unchanged(
        steps in arb_steps(),
        shift in prop::sample::select(vec![-60i64, -15, 15, 30, 120]),
    ) {
        let mut board = PlanningBoard::new();
        board.sync_steps(&steps);
        let before = board.events().to_vec();
        let backend = RefusingBackend { calls: Default::default() };
        let mut eligible = 0;

        for event in before.iter() {
            let key = event.key();
            let result = board.attempt_move(
                &backend,
                &key,
                event.start + Duration::minutes(shift),
                event.end + Duration::minutes(shift),
            );

            if event.address.is_empty() {
                prop_assert!(result.is_err());
            } else {
                eligible += 1;
                let rolled_back = matches!(result, Ok(MoveResolution::RolledBack { .. }));
                prop_assert!(rolled_back);
            }
        }

        prop_assert_eq!(board.events(), before.as_slice());
        prop_assert_eq!(backend.calls.load(std::sync::atomic::Ordering::SeqCst), eligible);
    }
}
