// Step module
// Roadtrip steps and the bookings nested under them, as served by the backend

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::date::{wall_clock, wall_clock_opt};

/// Whether a step is a multi-day stay or a single waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepType {
    Stage,
    Stop,
}

impl StepType {
    /// Backend collection that stores steps of this type.
    pub fn resource(&self) -> &'static str {
        match self {
            StepType::Stage => "stages",
            StepType::Stop => "stops",
        }
    }
}

/// Closed set of activity categories. Unknown tags read as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityType {
    Hiking,
    Shopping,
    Visit,
    Transport,
    Restaurant,
    #[default]
    Other,
}

impl ActivityType {
    pub const ALL: [ActivityType; 6] = [
        ActivityType::Hiking,
        ActivityType::Shopping,
        ActivityType::Visit,
        ActivityType::Transport,
        ActivityType::Restaurant,
        ActivityType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Hiking => "Hiking",
            ActivityType::Shopping => "Shopping",
            ActivityType::Visit => "Visit",
            ActivityType::Transport => "Transport",
            ActivityType::Restaurant => "Restaurant",
            ActivityType::Other => "Other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ActivityType::Hiking => "🥾",
            ActivityType::Shopping => "🛍",
            ActivityType::Visit => "🏛",
            ActivityType::Transport => "🚌",
            ActivityType::Restaurant => "🍽",
            ActivityType::Other => "📌",
        }
    }
}

impl From<String> for ActivityType {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "hiking" => ActivityType::Hiking,
            "shopping" => ActivityType::Shopping,
            "visit" => ActivityType::Visit,
            "transport" => ActivityType::Transport,
            "restaurant" => ActivityType::Restaurant,
            _ => ActivityType::Other,
        }
    }
}

impl From<ActivityType> for String {
    fn from(value: ActivityType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lodging booked during a stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
    #[serde(with = "wall_clock")]
    pub arrival_date_time: NaiveDateTime,
    #[serde(with = "wall_clock")]
    pub departure_date_time: NaiveDateTime,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
}

/// Scheduled happening during a stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
    #[serde(with = "wall_clock")]
    pub start_date_time: NaiveDateTime,
    #[serde(with = "wall_clock")]
    pub end_date_time: NaiveDateTime,
    #[serde(rename = "type", default)]
    pub activity_type: ActivityType,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
}

/// A waypoint of a roadtrip.
///
/// Only stages own accommodations and activities; the lists of a stop are
/// ignored by the planning grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub step_type: StepType,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
    #[serde(with = "wall_clock")]
    pub arrival_date_time: NaiveDateTime,
    #[serde(default, with = "wall_clock_opt")]
    pub departure_date_time: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
    #[serde(default)]
    pub accommodations: Vec<Accommodation>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl Step {
    /// Create a stop with the given arrival and optional departure.
    pub fn stop(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        arrival: NaiveDateTime,
        departure: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            id: id.into(),
            step_type: StepType::Stop,
            name: name.into(),
            address: address.into(),
            arrival_date_time: arrival,
            departure_date_time: departure,
            notes: String::new(),
            accommodations: Vec::new(),
            activities: Vec::new(),
        }
    }

    /// Create an empty stage spanning `arrival..departure`.
    pub fn stage(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        arrival: NaiveDateTime,
        departure: NaiveDateTime,
    ) -> Self {
        Self {
            step_type: StepType::Stage,
            ..Self::stop(id, name, address, arrival, Some(departure))
        }
    }

    pub fn is_stage(&self) -> bool {
        self.step_type == StepType::Stage
    }

    pub fn with_accommodation(mut self, accommodation: Accommodation) -> Self {
        self.accommodations.push(accommodation);
        self
    }

    pub fn with_activity(mut self, activity: Activity) -> Self {
        self.activities.push(activity);
        self
    }
}

/// A roadtrip as loaded by a refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roadtrip {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, alias = "name", deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_step_decodes_backend_payload() {
        let json = r#"{
            "_id": "st-1",
            "type": "Stage",
            "name": "Annecy",
            "address": "Annecy, France",
            "arrivalDateTime": "2025-07-01T15:00:00.000Z",
            "departureDateTime": "2025-07-03T10:00:00.000Z",
            "notes": null,
            "accommodations": [{
                "_id": "acc-1",
                "name": "Camping du lac",
                "address": "Route du lac",
                "arrivalDateTime": "2025-07-01T16:00:00.000Z",
                "departureDateTime": "2025-07-03T10:00:00.000Z"
            }],
            "activities": [{
                "_id": "act-1",
                "name": "Semnoz",
                "address": "Le Semnoz",
                "startDateTime": "2025-07-02T09:00:00.000Z",
                "endDateTime": "2025-07-02T13:00:00.000Z",
                "type": "hiking"
            }]
        }"#;

        let step: Step = serde_json::from_str(json).unwrap();
        assert_eq!(step.id, "st-1");
        assert!(step.is_stage());
        assert_eq!(step.notes, "");
        assert_eq!(step.accommodations[0].id, "acc-1");
        assert_eq!(step.accommodations[0].notes, "");
        assert_eq!(step.activities[0].activity_type, ActivityType::Hiking);
        assert_eq!(
            step.activities[0].start_date_time.format("%H:%M").to_string(),
            "09:00"
        );
    }

    #[test]
    fn test_stop_without_departure() {
        let json = r#"{
            "id": "st-2",
            "type": "Stop",
            "name": "Col de la Forclaz",
            "address": "",
            "arrivalDateTime": "2025-07-04T11:00:00Z",
            "departureDateTime": null
        }"#;

        let step: Step = serde_json::from_str(json).unwrap();
        assert_eq!(step.step_type, StepType::Stop);
        assert!(step.departure_date_time.is_none());
        assert!(step.accommodations.is_empty());
    }

    #[test]
    fn test_unknown_activity_type_is_other() {
        assert_eq!(ActivityType::from("karaoke".to_string()), ActivityType::Other);
        assert_eq!(ActivityType::from(" Visit ".to_string()), ActivityType::Visit);
    }

    #[test]
    fn test_step_type_resource() {
        assert_eq!(StepType::Stage.resource(), "stages");
        assert_eq!(StepType::Stop.resource(), "stops");
    }
}
