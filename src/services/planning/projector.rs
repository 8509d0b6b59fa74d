//! Projection of roadtrip steps onto planning events.

use serde_json::{json, Value};

use crate::models::planning_event::{event_color, EventKind, PlanningEvent};
use crate::models::step::Step;
use crate::utils::date::format_wall_clock;

/// Content signature of a step list: ids, names and every date field of the
/// steps and their children.
///
/// Two step lists with equal signatures project to the same events, so the
/// projector can skip work and, more importantly, keep optimistic edits that
/// the caller's (stale) steps do not know about yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepsSignature(String);

impl StepsSignature {
    pub fn of(steps: &[Step]) -> Self {
        let steps: Vec<Value> = steps
            .iter()
            .map(|step| {
                let accommodations: Vec<Value> = step
                    .accommodations
                    .iter()
                    .map(|accommodation| {
                        json!([
                            accommodation.id,
                            accommodation.name,
                            format_wall_clock(accommodation.arrival_date_time),
                            format_wall_clock(accommodation.departure_date_time),
                        ])
                    })
                    .collect();
                let activities: Vec<Value> = step
                    .activities
                    .iter()
                    .map(|activity| {
                        json!([
                            activity.id,
                            activity.name,
                            format_wall_clock(activity.start_date_time),
                            format_wall_clock(activity.end_date_time),
                        ])
                    })
                    .collect();

                json!([
                    step.id,
                    step.name,
                    step.step_type,
                    format_wall_clock(step.arrival_date_time),
                    step.departure_date_time.map(format_wall_clock),
                    accommodations,
                    activities,
                ])
            })
            .collect();

        Self(Value::Array(steps).to_string())
    }
}

/// Build the ordered event list for a roadtrip.
///
/// A stop yields one event (zero-length without a departure); a stage yields
/// one event per accommodation and per activity and none for itself.
pub fn project_events(steps: &[Step]) -> Vec<PlanningEvent> {
    let mut events = Vec::new();

    for step in steps {
        if !step.is_stage() {
            events.push(PlanningEvent {
                id: step.id.clone(),
                title: step.name.clone(),
                start: step.arrival_date_time,
                end: step.departure_date_time.unwrap_or(step.arrival_date_time),
                kind: EventKind::Stop,
                color: event_color(EventKind::Stop, None).to_string(),
                step_id: step.id.clone(),
                step_type: step.step_type,
                step_address: step.address.clone(),
                address: step.address.clone(),
                notes: step.notes.clone(),
                activity_type: None,
            });
            continue;
        }

        for accommodation in &step.accommodations {
            events.push(PlanningEvent {
                id: accommodation.id.clone(),
                title: accommodation.name.clone(),
                start: accommodation.arrival_date_time,
                end: accommodation.departure_date_time,
                kind: EventKind::Accommodation,
                color: event_color(EventKind::Accommodation, None).to_string(),
                step_id: step.id.clone(),
                step_type: step.step_type,
                step_address: step.address.clone(),
                address: accommodation.address.clone(),
                notes: accommodation.notes.clone(),
                activity_type: None,
            });
        }

        for activity in &step.activities {
            events.push(PlanningEvent {
                id: activity.id.clone(),
                title: activity.name.clone(),
                start: activity.start_date_time,
                end: activity.end_date_time,
                kind: EventKind::Activity,
                color: event_color(EventKind::Activity, Some(activity.activity_type)).to_string(),
                step_id: step.id.clone(),
                step_type: step.step_type,
                step_address: step.address.clone(),
                address: activity.address.clone(),
                notes: activity.notes.clone(),
                activity_type: Some(activity.activity_type),
            });
        }
    }

    sort_events(&mut events);
    events
}

/// Order by start, then id so equal starts render in a stable order.
pub fn sort_events(events: &mut [PlanningEvent]) {
    events.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
}

/// Remembers the signature of the last projection.
#[derive(Debug, Default)]
pub struct EventProjector {
    signature: Option<StepsSignature>,
}

impl EventProjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project `steps` unless they match the last projected content.
    pub fn project_if_changed(&mut self, steps: &[Step]) -> Option<Vec<PlanningEvent>> {
        let signature = StepsSignature::of(steps);
        if self.signature.as_ref() == Some(&signature) {
            return None;
        }

        self.signature = Some(signature);
        Some(project_events(steps))
    }

    /// Forget the last signature so the next call always projects.
    pub fn invalidate(&mut self) {
        self.signature = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::step::{Accommodation, Activity, ActivityType};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 7, day)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn sample_steps() -> Vec<Step> {
        vec![
            Step::stage("st-1", "Annecy", "Annecy", at(1, 15), at(3, 10))
                .with_accommodation(Accommodation {
                    id: "acc-1".to_string(),
                    name: "Camping".to_string(),
                    address: "Route du lac".to_string(),
                    arrival_date_time: at(1, 16),
                    departure_date_time: at(1, 18),
                    notes: String::new(),
                })
                .with_activity(Activity {
                    id: "act-1".to_string(),
                    name: "Semnoz".to_string(),
                    address: "Le Semnoz".to_string(),
                    start_date_time: at(2, 9),
                    end_date_time: at(2, 13),
                    activity_type: ActivityType::Hiking,
                    notes: String::new(),
                }),
            Step::stop("st-2", "Chamonix", "Chamonix", at(1, 11), None),
        ]
    }

    #[test]
    fn test_projection_kinds_and_order() {
        let events = project_events(&sample_steps());

        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["st-2", "acc-1", "act-1"]);
        assert_eq!(events[0].kind, EventKind::Stop);
        assert_eq!(events[1].kind, EventKind::Accommodation);
        assert_eq!(events[2].kind, EventKind::Activity);
        assert_eq!(events[2].color, "#2E7D32");
        assert_eq!(events[2].step_id, "st-1");
    }

    #[test]
    fn test_stop_without_departure_is_zero_length() {
        let events = project_events(&sample_steps());
        let stop = &events[0];
        assert_eq!(stop.start, stop.end);
    }

    #[test]
    fn test_stage_itself_yields_no_event() {
        let events = project_events(&sample_steps());
        assert!(events.iter().all(|e| e.id != "st-1"));
    }

    #[test]
    fn test_project_if_changed_skips_equal_content() {
        let mut projector = EventProjector::new();
        assert!(projector.project_if_changed(&sample_steps()).is_some());
        // A fresh but content-equal list is not re-projected
        assert!(projector.project_if_changed(&sample_steps()).is_none());
    }

    #[test]
    fn test_project_if_changed_detects_date_change() {
        let mut projector = EventProjector::new();
        let mut steps = sample_steps();
        projector.project_if_changed(&steps);

        steps[0].activities[0].start_date_time = at(2, 10);
        assert!(projector.project_if_changed(&steps).is_some());
    }

    #[test]
    fn test_notes_do_not_change_signature() {
        let mut steps = sample_steps();
        let before = StepsSignature::of(&steps);
        steps[1].notes = "Pause café".to_string();
        assert_eq!(before, StepsSignature::of(&steps));
    }

    #[test]
    fn test_separators_in_names_do_not_collide() {
        let mut first = sample_steps();
        first[0].activities[0].name = "Semnoz|x".to_string();
        first[1].name = "Chamonix".to_string();

        let mut second = sample_steps();
        second[0].activities[0].name = "Semnoz".to_string();
        second[1].name = "x;Chamonix".to_string();

        assert_ne!(StepsSignature::of(&first), StepsSignature::of(&second));
    }

    #[test]
    fn test_children_stay_with_their_step() {
        let mut moved = sample_steps();
        let activity = moved[0].activities.remove(0);
        moved[1].activities.push(activity);

        assert_ne!(StepsSignature::of(&sample_steps()), StepsSignature::of(&moved));
    }

    #[test]
    fn test_invalidate_forces_projection() {
        let mut projector = EventProjector::new();
        projector.project_if_changed(&sample_steps());
        projector.invalidate();
        assert!(projector.project_if_changed(&sample_steps()).is_some());
    }
}
