use super::PlannerApp;
use crate::ui_egui::app::state::{ReturnContext, ViewType};
use chrono::{Duration, Local, Timelike};

/// Scroll offset target when opening the grid: a little before 08:00.
const MORNING_HOUR: f32 = 7.5;

impl PlannerApp {
    pub(super) fn navigate_previous(&mut self) {
        self.current_date -= self.navigation_step();
    }

    pub(super) fn navigate_next(&mut self) {
        self.current_date += self.navigation_step();
    }

    pub(super) fn jump_to_today(&mut self) {
        self.current_date = Local::now().date_naive();
    }

    fn navigation_step(&self) -> Duration {
        match self.current_view {
            ViewType::Day => Duration::days(1),
            ViewType::Week => Duration::weeks(1),
        }
    }

    pub(super) fn return_context(&self) -> ReturnContext {
        ReturnContext {
            date: self.current_date,
            view: self.current_view,
        }
    }

    pub(super) fn restore_return_context(&mut self, context: ReturnContext) {
        self.current_date = context.date;
        self.current_view = context.view;
    }

    pub(super) fn scroll_to_morning(&mut self) {
        self.state.pending_scroll = Some(MORNING_HOUR * self.settings.hour_height);
    }

    /// After the first load, show the first event if the current window has
    /// none.
    pub(super) fn focus_first_event_if_window_empty(&mut self) {
        let window = self.current_view.window(self.current_date);
        let events = self.board.events();
        if events.iter().any(|event| window.contains(event.start.date())) {
            return;
        }

        if let Some(first) = events.first() {
            self.current_date = first.start.date();
            let hour = first.start.hour() as f32;
            self.state.pending_scroll = Some((hour - 0.5).max(0.0) * self.settings.hour_height);
        }
    }
}
