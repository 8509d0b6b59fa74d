//! Vertical positioning of events and day/week windows.

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::models::planning_event::PlanningEvent;
use crate::models::settings::PlanningSettings;
use crate::utils::date::{end_of_day, get_week_start};

const HOURS_PER_DAY: f32 = 24.0;
const MONDAY: u8 = 1;

/// Pixel geometry of the time grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    pub hour_height: f32,
    pub min_event_height: f32,
}

/// Vertical placement of an event inside its day column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventBox {
    pub top: f32,
    pub height: f32,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self::from_settings(&PlanningSettings::default())
    }
}

impl GridMetrics {
    pub fn from_settings(settings: &PlanningSettings) -> Self {
        Self {
            hour_height: settings.hour_height,
            min_event_height: settings.min_event_height,
        }
    }

    pub fn day_height(&self) -> f32 {
        HOURS_PER_DAY * self.hour_height
    }

    /// Offset of a wall-clock time from the top of its day column.
    pub fn offset_for(&self, at: NaiveDateTime) -> f32 {
        let hours = at.hour() as f32 + at.minute() as f32 / 60.0;
        hours * self.hour_height
    }

    /// `top = start hours × hour_height`,
    /// `height = max(duration hours × hour_height, min_event_height)`.
    ///
    /// Events running past midnight are cut at the bottom of the start day.
    pub fn event_box(&self, event: &PlanningEvent) -> EventBox {
        let top = self.offset_for(event.start);
        let visible_end = event.end.min(end_of_day(event.start.date()));
        let minutes = (visible_end - event.start).num_minutes().max(0) as f32;
        let height = (minutes / 60.0 * self.hour_height).max(self.min_event_height);

        EventBox { top, height }
    }
}

/// The dates shown by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanningWindow {
    Day(NaiveDate),
    /// Seven days starting on the given Monday
    Week(NaiveDate),
}

impl PlanningWindow {
    pub fn week_containing(date: NaiveDate) -> Self {
        PlanningWindow::Week(get_week_start(date, MONDAY))
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        match *self {
            PlanningWindow::Day(date) => vec![date],
            PlanningWindow::Week(monday) => (0..7).map(|i| monday + Duration::days(i)).collect(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            PlanningWindow::Day(day) => day == date,
            PlanningWindow::Week(monday) => date >= monday && date < monday + Duration::days(7),
        }
    }
}

/// Group events into the window's day columns by start date. Order inside a
/// column follows the input order.
pub fn bucket_by_day<'a>(
    window: &PlanningWindow,
    events: &'a [PlanningEvent],
) -> Vec<(NaiveDate, Vec<&'a PlanningEvent>)> {
    window
        .dates()
        .into_iter()
        .map(|date| {
            let column = events
                .iter()
                .filter(|event| event.start.date() == date)
                .collect();
            (date, column)
        })
        .collect()
}
