// Planning event module
// Calendar projection of stops, accommodations and activities

use std::fmt;

use chrono::{Duration, NaiveDateTime};
use thiserror::Error;

use crate::models::step::{ActivityType, StepType};

/// Label shown on events that cannot be moved because an address is missing.
pub const MISSING_ADDRESS_LABEL: &str = "⚠️ Adresse manquante";

/// Which backend record a planning event was projected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Stop,
    Accommodation,
    Activity,
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Stop => "Étape",
            EventKind::Accommodation => "Hébergement",
            EventKind::Activity => "Activité",
        }
    }
}

/// Identity of a planning event. Backend ids are only unique per collection,
/// so the kind is part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventKey {
    pub kind: EventKind,
    pub id: String,
}

impl EventKey {
    pub fn new(kind: EventKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}:{}", self.kind, self.id)
    }
}

/// Why an event cannot be dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Ineligibility {
    #[error("event has no address")]
    MissingAddress,
    #[error("parent step has no address")]
    MissingStepAddress,
}

/// Uniform, time-boxed view of one stop, accommodation or activity.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanningEvent {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub kind: EventKind,
    /// Hex color (#RRGGBB)
    pub color: String,
    pub step_id: String,
    /// Stored type of the parent step; selects the stop-kind mutation route
    pub step_type: StepType,
    pub step_address: String,
    pub address: String,
    pub notes: String,
    pub activity_type: Option<ActivityType>,
}

impl PlanningEvent {
    pub fn key(&self) -> EventKey {
        EventKey::new(self.kind, self.id.clone())
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Check whether the backend could compute routes for this event after a
    /// move: both the event and, for stops, its parent step need an address.
    pub fn eligibility(&self) -> Result<(), Ineligibility> {
        if self.address.trim().is_empty() {
            return Err(Ineligibility::MissingAddress);
        }

        if self.kind == EventKind::Stop && self.step_address.trim().is_empty() {
            return Err(Ineligibility::MissingStepAddress);
        }

        Ok(())
    }

    pub fn is_draggable(&self) -> bool {
        self.eligibility().is_ok()
    }
}

/// Display color for an event kind.
pub fn event_color(kind: EventKind, activity_type: Option<ActivityType>) -> &'static str {
    match (kind, activity_type) {
        (EventKind::Stop, _) => "#FF9800",
        (EventKind::Accommodation, _) => "#4CAF50",
        (EventKind::Activity, Some(ActivityType::Hiking)) => "#2E7D32",
        (EventKind::Activity, Some(ActivityType::Shopping)) => "#AD1457",
        (EventKind::Activity, Some(ActivityType::Visit)) => "#1565C0",
        (EventKind::Activity, Some(ActivityType::Transport)) => "#6A1B9A",
        (EventKind::Activity, Some(ActivityType::Restaurant)) => "#EF6C00",
        (EventKind::Activity, _) => "#546E7A",
    }
}

/// Editable copy of an event, used by the edit dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub key: EventKey,
    pub step_type: StepType,
    pub title: String,
    pub address: String,
    pub notes: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub activity_type: Option<ActivityType>,
}

impl EventDraft {
    pub fn from_event(event: &PlanningEvent) -> Self {
        Self {
            key: event.key(),
            step_type: event.step_type,
            title: event.title.clone(),
            address: event.address.clone(),
            notes: event.notes.clone(),
            start: event.start,
            end: event.end,
            activity_type: event.activity_type,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Le nom est obligatoire".to_string());
        }

        if self.end < self.start {
            return Err("La fin doit être postérieure au début".to_string());
        }

        Ok(())
    }
}
