//! Request descriptions for the backend routes used by the planning grid.

use chrono::NaiveDateTime;
use serde_json::{json, Value};

use crate::models::planning_event::{EventDraft, EventKind, PlanningEvent};
use crate::models::step::StepType;
use crate::utils::date::format_wall_clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Put,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
        }
    }
}

/// Method, path (relative to the API base URL) and JSON body of one call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn roadtrip(roadtrip_id: &str) -> Self {
        Self {
            method: HttpMethod::Get,
            path: format!("/roadtrips/{}", roadtrip_id),
            body: None,
        }
    }

    /// The single call that persists a drag, selected by event kind.
    pub fn move_event(
        event: &PlanningEvent,
        new_start: NaiveDateTime,
        new_end: NaiveDateTime,
    ) -> Self {
        let start = format_wall_clock(new_start);
        let end = format_wall_clock(new_end);

        match event.kind {
            EventKind::Activity => Self {
                method: HttpMethod::Patch,
                path: format!("/activities/{}/dates", event.id),
                body: Some(json!({ "startDateTime": start, "endDateTime": end })),
            },
            EventKind::Accommodation => Self {
                method: HttpMethod::Put,
                path: format!("/accommodations/{}", event.id),
                body: Some(json!({ "arrivalDateTime": start, "departureDateTime": end })),
            },
            EventKind::Stop => Self {
                method: HttpMethod::Put,
                path: step_path(event.step_type, &event.step_id),
                body: Some(json!({ "arrivalDateTime": start, "departureDateTime": end })),
            },
        }
    }

    /// Full update issued when the edit dialog is saved.
    pub fn edit_event(draft: &EventDraft) -> Self {
        let start = format_wall_clock(draft.start);
        let end = format_wall_clock(draft.end);

        match draft.key.kind {
            EventKind::Activity => Self {
                method: HttpMethod::Patch,
                path: format!("/activities/{}", draft.key.id),
                body: Some(json!({
                    "name": draft.title,
                    "address": draft.address,
                    "notes": draft.notes,
                    "startDateTime": start,
                    "endDateTime": end,
                    "type": draft.activity_type.unwrap_or_default().as_str(),
                })),
            },
            EventKind::Accommodation => Self {
                method: HttpMethod::Put,
                path: format!("/accommodations/{}", draft.key.id),
                body: Some(json!({
                    "name": draft.title,
                    "address": draft.address,
                    "notes": draft.notes,
                    "arrivalDateTime": start,
                    "departureDateTime": end,
                })),
            },
            EventKind::Stop => Self {
                method: HttpMethod::Put,
                path: step_path(draft.step_type, &draft.key.id),
                body: Some(json!({
                    "name": draft.title,
                    "address": draft.address,
                    "notes": draft.notes,
                    "arrivalDateTime": start,
                    "departureDateTime": end,
                })),
            },
        }
    }
}

fn step_path(step_type: StepType, step_id: &str) -> String {
    format!("/{}/{}", step_type.resource(), step_id)
}
