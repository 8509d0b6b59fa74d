mod alert;
mod context;
mod lifecycle;
mod mutations;
mod navigation;
mod panels;
mod refresh;
mod state;
mod toast;

pub use self::context::AppContext;
pub use self::state::{ReturnContext, ViewType};

use self::alert::AlertState;
use self::state::AppState;
use self::toast::ToastManager;
use crate::models::settings::PlanningSettings;
use crate::services::planning::PlanningBoard;
use crate::ui_egui::theme::PlannerTheme;
use chrono::NaiveDate;

pub struct PlannerApp {
    /// Backend, database and mutation worker
    context: AppContext,
    settings: PlanningSettings,
    current_view: ViewType,
    current_date: NaiveDate,
    /// Currently applied theme colors
    active_theme: PlannerTheme,
    /// Projected events with their optimistic state
    board: PlanningBoard,
    roadtrip_title: String,
    /// Background jobs and dialog state
    state: AppState,
    toast_manager: ToastManager,
    alert: AlertState,
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.handle_update(ctx, frame);
    }
}
