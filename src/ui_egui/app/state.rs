use crate::models::planning_event::EventDraft;
use crate::models::step::Roadtrip;
use crate::services::api::ApiError;
use crate::services::planning::{BackgroundTask, PlanningWindow};
use crate::ui_egui::edit_dialog::EditDialogState;
use crate::ui_egui::settings_dialog::SettingsDialogState;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewType {
    Day,
    Week,
}

impl ViewType {
    pub fn from_setting(value: &str) -> Self {
        match value {
            "Day" => ViewType::Day,
            _ => ViewType::Week,
        }
    }

    pub fn as_setting(&self) -> &'static str {
        match self {
            ViewType::Day => "Day",
            ViewType::Week => "Week",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewType::Day => "Jour",
            ViewType::Week => "Semaine",
        }
    }

    pub fn window(&self, date: NaiveDate) -> PlanningWindow {
        match self {
            ViewType::Day => PlanningWindow::Day(date),
            ViewType::Week => PlanningWindow::week_containing(date),
        }
    }
}

/// Planning position to restore when the edit dialog closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnContext {
    pub date: NaiveDate,
    pub view: ViewType,
}

/// A roadtrip reload running in the background.
pub struct RefreshJob {
    pub task: BackgroundTask<Result<Roadtrip, ApiError>>,
    /// Silent reloads show no loading state and no success notice
    pub silent: bool,
}

/// An edit save running in the background.
pub struct EditSaveJob {
    pub task: BackgroundTask<Result<(), ApiError>>,
    pub draft: EventDraft,
}

#[derive(Default)]
pub struct AppState {
    pub refresh: Option<RefreshJob>,
    /// Another reload was requested while one was running
    pub refresh_queued: Option<bool>,
    pub edit_dialog: Option<EditDialogState>,
    pub edit_save: Option<EditSaveJob>,
    pub settings_dialog: Option<SettingsDialogState>,
    /// Grid scroll offset to apply on the next frame
    pub pending_scroll: Option<f32>,
    /// Whether a roadtrip has been loaded at least once
    pub loaded_once: bool,
}
