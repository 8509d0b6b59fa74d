//! Pointer gesture classification for planning events.
//!
//! A press on an event arms the controller. The gesture then either becomes a
//! drag (pointer travelled past [`DRAG_THRESHOLD_PX`] on a draggable event) or,
//! on release, a tap (short and still). Everything else is ignored.

use std::time::{Duration, Instant};

use chrono::{Duration as ChronoDuration, NaiveDateTime};
use thiserror::Error;

use crate::models::planning_event::{EventKey, PlanningEvent};
use crate::utils::date::{end_of_day, start_of_day};

pub const DRAG_THRESHOLD_PX: f32 = 10.0;
pub const TAP_MAX_DURATION: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq)]
pub enum GestureState {
    Idle,
    Armed {
        key: EventKey,
        draggable: bool,
        pressed_at: Instant,
        /// Largest displacement seen since the press
        travelled: f32,
    },
    Dragging {
        key: EventKey,
        dy: f32,
    },
}

/// What a finished gesture asks the grid to do.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    /// Open the edit screen of the event
    Tap(EventKey),
    /// Move the event by a raw vertical displacement in pixels
    Drop { key: EventKey, dy: f32 },
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragController {
    state: GestureState,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

impl DragController {
    pub fn new() -> Self {
        Self {
            state: GestureState::Idle,
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    /// Vertical displacement of the current drag, if one is in progress.
    pub fn drag_offset(&self) -> Option<(&EventKey, f32)> {
        match &self.state {
            GestureState::Dragging { key, dy } => Some((key, *dy)),
            _ => None,
        }
    }

    /// Pointer went down on an event.
    pub fn press(&mut self, key: EventKey, draggable: bool, at: Instant) {
        self.state = GestureState::Armed {
            key,
            draggable,
            pressed_at: at,
            travelled: 0.0,
        };
    }

    /// Pointer moved; `delta` is the total displacement since the press.
    pub fn pointer_moved(&mut self, delta: (f32, f32)) {
        let distance = (delta.0 * delta.0 + delta.1 * delta.1).sqrt();

        match &mut self.state {
            GestureState::Armed {
                key,
                draggable,
                travelled,
                ..
            } => {
                *travelled = travelled.max(distance);
                if *draggable && *travelled > DRAG_THRESHOLD_PX {
                    log::debug!("Drag started on {}", key);
                    self.state = GestureState::Dragging {
                        key: key.clone(),
                        dy: delta.1,
                    };
                }
            }
            GestureState::Dragging { dy, .. } => *dy = delta.1,
            GestureState::Idle => {}
        }
    }

    /// Pointer went up; the controller returns to idle.
    pub fn release(&mut self, delta: (f32, f32), at: Instant) -> GestureOutcome {
        self.pointer_moved(delta);

        let state = std::mem::replace(&mut self.state, GestureState::Idle);
        match state {
            GestureState::Dragging { key, dy } => GestureOutcome::Drop { key, dy },
            GestureState::Armed {
                key,
                pressed_at,
                travelled,
                ..
            } => {
                let quick = at.saturating_duration_since(pressed_at) < TAP_MAX_DURATION;
                if quick && travelled < DRAG_THRESHOLD_PX {
                    GestureOutcome::Tap(key)
                } else {
                    GestureOutcome::Ignored
                }
            }
            GestureState::Idle => GestureOutcome::Ignored,
        }
    }

    /// Abandon the current gesture (pointer left the window, view changed).
    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
    }
}

/// Convert a vertical displacement to minutes, snapped to `interval`.
///
/// `round((dy / hour_height × 60) / interval) × interval`
pub fn snap_minutes(dy: f32, hour_height: f32, interval: u32) -> i64 {
    let raw = dy as f64 / hour_height as f64 * 60.0;
    let interval = interval.max(1) as f64;
    ((raw / interval).round() * interval) as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("move would leave the day (new range {new_start} - {new_end})")]
pub struct OutOfDay {
    pub new_start: NaiveDateTime,
    pub new_end: NaiveDateTime,
}

/// Shift an event by `minutes`, keeping its duration and its day.
///
/// The new range must stay within `[00:00, 24:00)` of the day the event
/// starts on.
pub fn shifted_range(
    event: &PlanningEvent,
    minutes: i64,
) -> Result<(NaiveDateTime, NaiveDateTime), OutOfDay> {
    let new_start = event.start + ChronoDuration::minutes(minutes);
    let new_end = new_start + event.duration();

    let day = event.start.date();
    if new_start < start_of_day(day) || new_end >= end_of_day(day) {
        return Err(OutOfDay { new_start, new_end });
    }

    Ok((new_start, new_end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::planning_event::{event_color, EventKind};
    use crate::models::step::StepType;
    use chrono::NaiveDate;
    use test_case::test_case;

    fn key() -> EventKey {
        EventKey::new(EventKind::Activity, "act-1")
    }

    fn make_event(h: u32, minutes: i64) -> PlanningEvent {
        let start = NaiveDate::from_ymd_opt(2025, 7, 1)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap();
        PlanningEvent {
            id: "act-1".to_string(),
            title: "Visite".to_string(),
            start,
            end: start + ChronoDuration::minutes(minutes),
            kind: EventKind::Activity,
            color: event_color(EventKind::Activity, None).to_string(),
            step_id: "st-1".to_string(),
            step_type: StepType::Stage,
            step_address: "Lyon".to_string(),
            address: "Lyon".to_string(),
            notes: String::new(),
            activity_type: None,
        }
    }

    #[test]
    fn test_quick_still_press_is_tap() {
        let start = Instant::now();
        let mut controller = DragController::new();
        controller.press(key(), true, start);
        controller.pointer_moved((3.0, 4.0));

        let outcome = controller.release((3.0, 4.0), start + Duration::from_millis(200));
        assert_eq!(outcome, GestureOutcome::Tap(key()));
        assert_eq!(controller.state(), &GestureState::Idle);
    }

    #[test]
    fn test_slow_press_is_not_tap() {
        let start = Instant::now();
        let mut controller = DragController::new();
        controller.press(key(), true, start);

        let outcome = controller.release((0.0, 0.0), start + Duration::from_millis(800));
        assert_eq!(outcome, GestureOutcome::Ignored);
    }

    #[test]
    fn test_travel_past_threshold_starts_drag() {
        let start = Instant::now();
        let mut controller = DragController::new();
        controller.press(key(), true, start);
        controller.pointer_moved((0.0, 8.0));
        assert!(!controller.is_dragging());

        controller.pointer_moved((0.0, 11.0));
        assert!(controller.is_dragging());
        assert_eq!(controller.drag_offset(), Some((&key(), 11.0)));

        let outcome = controller.release((0.0, 120.0), start + Duration::from_millis(100));
        assert_eq!(outcome, GestureOutcome::Drop { key: key(), dy: 120.0 });
    }

    #[test]
    fn test_ineligible_event_never_drags() {
        let start = Instant::now();
        let mut controller = DragController::new();
        controller.press(key(), false, start);
        controller.pointer_moved((0.0, 200.0));
        assert!(!controller.is_dragging());

        let outcome = controller.release((0.0, 200.0), start + Duration::from_millis(100));
        assert_eq!(outcome, GestureOutcome::Ignored);
    }

    #[test]
    fn test_ineligible_event_can_still_be_tapped() {
        let start = Instant::now();
        let mut controller = DragController::new();
        controller.press(key(), false, start);
        let outcome = controller.release((1.0, 1.0), start + Duration::from_millis(100));
        assert_eq!(outcome, GestureOutcome::Tap(key()));
    }

    #[test]
    fn test_returning_to_origin_is_not_tap() {
        let start = Instant::now();
        let mut controller = DragController::new();
        controller.press(key(), false, start);
        controller.pointer_moved((30.0, 0.0));
        let outcome = controller.release((0.0, 0.0), start + Duration::from_millis(100));
        assert_eq!(outcome, GestureOutcome::Ignored);
    }

    #[test_case(120.0, 60.0, 15, 120; "two hours")]
    #[test_case(37.0, 60.0, 15, 30; "rounds down")]
    #[test_case(38.0, 60.0, 15, 45; "rounds up")]
    #[test_case(-65.0, 60.0, 30, -60; "negative")]
    #[test_case(10.0, 60.0, 15, 15; "just over half")]
    #[test_case(25.0, 50.0, 5, 30; "five minute snap")]
    fn test_snap_minutes(dy: f32, hour_height: f32, interval: u32, expected: i64) {
        assert_eq!(snap_minutes(dy, hour_height, interval), expected);
    }

    #[test]
    fn test_shifted_range_keeps_duration() {
        let event = make_event(10, 60);
        let (start, end) = shifted_range(&event, 120).unwrap();
        assert_eq!(start.format("%H:%M").to_string(), "12:00");
        assert_eq!(end.format("%H:%M").to_string(), "13:00");
    }

    #[test]
    fn test_shifted_range_rejects_end_at_midnight() {
        let event = make_event(22, 60);
        assert!(shifted_range(&event, 60).is_err());
        assert!(shifted_range(&event, 45).is_ok());
    }

    #[test]
    fn test_shifted_range_rejects_before_midnight() {
        let event = make_event(1, 60);
        assert!(shifted_range(&event, -90).is_err());
        assert!(shifted_range(&event, -60).is_ok());
    }
}
