use super::alert::AlertState;
use super::context::AppContext;
use super::state::{AppState, ViewType};
use super::toast::ToastManager;
use super::PlannerApp;
use crate::models::settings::PlanningSettings;
use crate::services::planning::PlanningBoard;
use crate::services::settings::SettingsService;
use crate::ui_egui::drag::DragManager;
use crate::ui_egui::theme::PlannerTheme;
use chrono::Local;

impl PlannerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, context: AppContext) -> Self {
        let settings = load_settings_or_default(&context.settings_service());
        log::info!(
            "Loaded settings: snap={} min, hour_height={}, view={}",
            settings.drag_snap_interval,
            settings.hour_height,
            settings.current_view
        );

        let current_view = ViewType::from_setting(&settings.current_view);
        let active_theme = PlannerTheme::for_preference(&settings.theme);
        active_theme.apply_to_context(&cc.egui_ctx);

        let mut app = Self {
            context,
            settings,
            current_view,
            current_date: Local::now().date_naive(),
            active_theme,
            board: PlanningBoard::new(),
            roadtrip_title: String::new(),
            state: AppState::default(),
            toast_manager: ToastManager::new(),
            alert: AlertState::new(),
        };

        app.scroll_to_morning();
        app.start_refresh(false);
        app
    }

    pub(super) fn apply_theme(&mut self, ctx: &egui::Context) {
        self.active_theme = PlannerTheme::for_preference(&self.settings.theme);
        self.active_theme.apply_to_context(ctx);
    }

    /// Switch between day and week view and remember the choice.
    pub(super) fn set_view(&mut self, ctx: &egui::Context, view: ViewType) {
        if self.current_view == view {
            return;
        }

        DragManager::cancel(ctx);
        self.current_view = view;
        self.settings.current_view = view.as_setting().to_string();
        if let Err(e) = self.context.settings_service().update(&self.settings) {
            log::warn!("Failed to persist current view: {:#}", e);
        }
    }

    pub(super) fn handle_update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Background results first so this frame renders them
        self.poll_refresh(ctx);
        self.poll_mutations(ctx);
        self.poll_edit_save(ctx);

        self.handle_keyboard_shortcuts(ctx);

        self.render_top_bar(ctx);
        let outcome = self.render_main_panel(ctx);
        self.handle_gesture(outcome);

        self.handle_dialogs(ctx);

        // Alerts and toasts last, so they appear on top
        self.alert.render(ctx);
        let is_dark = self.active_theme.is_dark;
        self.toast_manager.render(ctx, is_dark);
    }

    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        if self.alert.is_open()
            || self.state.edit_dialog.is_some()
            || self.state.settings_dialog.is_some()
            || ctx.wants_keyboard_input()
        {
            return;
        }

        let (previous, next, today, refresh) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::T),
                i.key_pressed(egui::Key::F5),
            )
        });

        if previous {
            DragManager::cancel(ctx);
            self.navigate_previous();
        }
        if next {
            DragManager::cancel(ctx);
            self.navigate_next();
        }
        if today {
            self.jump_to_today();
        }
        if refresh {
            self.start_refresh(false);
        }
    }
}

fn load_settings_or_default(settings_service: &SettingsService) -> PlanningSettings {
    match settings_service.get() {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Failed to load settings: {}, using defaults", e);
            PlanningSettings::default()
        }
    }
}
