use super::state::ViewType;
use super::PlannerApp;
use crate::services::planning::{GestureOutcome, GridMetrics, PlanningWindow};
use crate::ui_egui::drag::DragManager;
use crate::ui_egui::settings_dialog::{render_settings_dialog, SettingsDialogState};
use crate::ui_egui::views::palette::TimeGridPalette;
use crate::ui_egui::views::{PlanningView, PlanningViewConfig};
use chrono::Local;
use egui::RichText;

impl PlannerApp {
    pub(super) fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("planner_top_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.button("◀").on_hover_text("Précédent (←)").clicked() {
                    DragManager::cancel(ctx);
                    self.navigate_previous();
                }
                if ui.button("Aujourd'hui").on_hover_text("T").clicked() {
                    DragManager::cancel(ctx);
                    self.jump_to_today();
                }
                if ui.button("▶").on_hover_text("Suivant (→)").clicked() {
                    DragManager::cancel(ctx);
                    self.navigate_next();
                }

                ui.separator();

                for view in [ViewType::Day, ViewType::Week] {
                    if ui
                        .selectable_label(self.current_view == view, view.label())
                        .clicked()
                    {
                        self.set_view(ctx, view);
                    }
                }

                ui.separator();

                let loading = self.is_loading();
                let refresh = ui.add_enabled(!loading, egui::Button::new("⟳ Actualiser"));
                if refresh.on_hover_text("F5").clicked() {
                    self.start_refresh(false);
                }
                if loading {
                    ui.spinner();
                }

                let saving =
                    self.board.in_flight_count() + usize::from(self.state.edit_save.is_some());
                if saving > 0 {
                    ui.label(
                        RichText::new(format!("⏳ {} enregistrement(s) en cours", saving)).weak(),
                    );
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("⚙").on_hover_text("Préférences").clicked()
                        && self.state.settings_dialog.is_none()
                    {
                        self.state.settings_dialog = Some(SettingsDialogState::new(&self.settings));
                    }
                    ui.label(range_label(&self.current_view.window(self.current_date)));
                    if !self.roadtrip_title.is_empty() {
                        ui.separator();
                        ui.label(RichText::new(&self.roadtrip_title).strong());
                    }
                });
            });
            ui.add_space(4.0);
        });
    }

    pub(super) fn render_main_panel(&mut self, ctx: &egui::Context) -> GestureOutcome {
        let palette = TimeGridPalette::from_theme(&self.active_theme);
        let now = Local::now().naive_local();
        let config = PlanningViewConfig {
            window: self.current_view.window(self.current_date),
            metrics: GridMetrics::from_settings(&self.settings),
            snap_interval: self.settings.drag_snap_interval,
            today: now.date(),
            now,
            palette: &palette,
            scroll_to: self.state.pending_scroll.take(),
        };

        let panel_frame = egui::Frame::central_panel(&ctx.style())
            .outer_margin(egui::Margin::ZERO)
            .inner_margin(egui::Margin::same(8.0));

        // Keep the now line moving
        ctx.request_repaint_after(std::time::Duration::from_secs(30));

        egui::CentralPanel::default()
            .frame(panel_frame)
            .show(ctx, |ui| PlanningView::show(ui, &self.board, &config))
            .inner
    }

    pub(super) fn handle_dialogs(&mut self, ctx: &egui::Context) {
        self.handle_edit_dialog(ctx);
        self.handle_settings_dialog(ctx);
    }

    fn handle_settings_dialog(&mut self, ctx: &egui::Context) {
        let database = self.context.database();
        let Some(dialog) = self.state.settings_dialog.as_mut() else {
            return;
        };

        let response = render_settings_dialog(ctx, dialog, database);

        if let Some(saved) = response.saved {
            let height_changed = saved.hour_height != self.settings.hour_height;
            self.current_view = ViewType::from_setting(&saved.current_view);
            self.settings = saved;
            self.apply_theme(ctx);
            if height_changed {
                self.scroll_to_morning();
            }
            self.toast_manager.info("Préférences enregistrées");
        }

        if response.closed {
            self.state.settings_dialog = None;
        }
    }
}

fn range_label(window: &PlanningWindow) -> String {
    let dates = window.dates();
    match (dates.first(), dates.last()) {
        (Some(first), Some(last)) if first != last => format!(
            "{} – {}",
            first.format("%d/%m"),
            last.format("%d/%m/%Y")
        ),
        (Some(first), _) => first.format("%d/%m/%Y").to_string(),
        _ => String::new(),
    }
}
