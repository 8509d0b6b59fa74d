// Test fixtures - reusable roadtrip data and a scripted backend
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{NaiveDate, NaiveDateTime};
use roadtrip_planner::models::step::{Accommodation, Activity, ActivityType, Roadtrip, Step};
use roadtrip_planner::services::api::{ApiError, ApiRequest, PlanningBackend};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Returns July 1, 2025 at the given hour
    pub fn jul_1(hour: u32) -> NaiveDateTime {
        at(1, hour, 0)
    }

    pub fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 7, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }
}

pub const STAGE_ID: &str = "stage-lyon";
pub const ACTIVITY_ID: &str = "act-museum";

pub fn museum(address: &str) -> Activity {
    Activity {
        id: ACTIVITY_ID.to_string(),
        name: "Musée des Confluences".to_string(),
        address: address.to_string(),
        start_date_time: dates::jul_1(10),
        end_date_time: dates::jul_1(11),
        activity_type: ActivityType::Visit,
        notes: String::new(),
    }
}

/// A stage in Lyon holding one activity, plus a hotel night.
pub fn lyon_stage(activity_address: &str) -> Step {
    Step::stage(
        STAGE_ID,
        "Lyon",
        "Place Bellecour, Lyon",
        dates::at(1, 9, 0),
        dates::at(2, 11, 0),
    )
    .with_activity(museum(activity_address))
    .with_accommodation(Accommodation {
        id: "acc-hotel".to_string(),
        name: "Hôtel des Célestins".to_string(),
        address: "4 rue des Archers, Lyon".to_string(),
        arrival_date_time: dates::jul_1(18),
        departure_date_time: dates::at(2, 10, 0),
        notes: String::new(),
    })
}

pub fn sample_roadtrip() -> Roadtrip {
    Roadtrip {
        id: "rt-1".to_string(),
        title: "Tour des Alpes".to_string(),
        steps: vec![
            Step::stop(
                "stop-macon",
                "Mâcon",
                "Quai Lamartine, Mâcon",
                dates::at(1, 7, 30),
                Some(dates::at(1, 8, 0)),
            ),
            lyon_stage("86 quai Perrache, Lyon"),
        ],
    }
}

/// Backend that records every request and answers from a script.
///
/// Unscripted calls succeed.
#[derive(Default)]
pub struct RecordingBackend {
    pub roadtrip: Option<Roadtrip>,
    requests: Mutex<Vec<ApiRequest>>,
    replies: Mutex<VecDeque<Result<(), ApiError>>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_with(&self, reply: Result<(), ApiError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl PlanningBackend for RecordingBackend {
    fn fetch_roadtrip(&self, roadtrip_id: &str) -> Result<Roadtrip, ApiError> {
        self.requests
            .lock()
            .unwrap()
            .push(ApiRequest::roadtrip(roadtrip_id));
        self.roadtrip.clone().ok_or(ApiError::Status {
            status: 404,
            body: "not found".to_string(),
        })
    }

    fn send(&self, request: &ApiRequest) -> Result<(), ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}
