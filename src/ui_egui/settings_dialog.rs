use crate::models::settings::{PlanningSettings, SNAP_INTERVAL_CHOICES};
use crate::services::database::Database;
use crate::services::settings::SettingsService;
use egui::{Color32, RichText};

const LABEL_WIDTH: f32 = 180.0;

/// Draft being edited plus the last save error.
pub struct SettingsDialogState {
    pub draft: PlanningSettings,
    pub error_message: Option<String>,
}

impl SettingsDialogState {
    pub fn new(current: &PlanningSettings) -> Self {
        Self {
            draft: current.clone(),
            error_message: None,
        }
    }
}

pub struct SettingsDialogResponse {
    /// Settings that were persisted this frame
    pub saved: Option<PlanningSettings>,
    pub closed: bool,
}

fn labeled_row(ui: &mut egui::Ui, label: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    ui.horizontal(|ui| {
        ui.allocate_ui_with_layout(
            egui::Vec2::new(LABEL_WIDTH, 20.0),
            egui::Layout::right_to_left(egui::Align::Center),
            |ui| {
                ui.label(label);
            },
        );
        add_contents(ui);
    });
}

fn theme_label(theme: &str) -> &'static str {
    match theme {
        "light" => "Clair",
        "dark" => "Sombre",
        _ => "Système",
    }
}

/// Render the settings dialog
pub fn render_settings_dialog(
    ctx: &egui::Context,
    state: &mut SettingsDialogState,
    database: &Database,
) -> SettingsDialogResponse {
    let mut saved = None;
    let mut closed = false;
    let mut dialog_open = true;

    egui::Window::new("Préférences")
        .open(&mut dialog_open)
        .collapsible(false)
        .resizable(false)
        .default_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            if let Some(ref error) = state.error_message {
                ui.colored_label(Color32::RED, RichText::new(error).strong());
                ui.add_space(8.0);
            }

            let settings = &mut state.draft;

            ui.heading("Planning");
            ui.add_space(4.0);

            labeled_row(ui, "Pas de déplacement :", |ui| {
                egui::ComboBox::from_id_source("snap_interval_combo")
                    .selected_text(format!("{} min", settings.drag_snap_interval))
                    .show_ui(ui, |ui| {
                        for minutes in SNAP_INTERVAL_CHOICES {
                            ui.selectable_value(
                                &mut settings.drag_snap_interval,
                                minutes,
                                format!("{} min", minutes),
                            );
                        }
                    });
            });

            labeled_row(ui, "Hauteur d'une heure :", |ui| {
                ui.add(
                    egui::Slider::new(&mut settings.hour_height, 30.0..=240.0)
                        .step_by(5.0)
                        .suffix(" px"),
                );
            });

            labeled_row(ui, "Hauteur minimale :", |ui| {
                let max = settings.hour_height;
                ui.add(
                    egui::Slider::new(&mut settings.min_event_height, 10.0..=max)
                        .step_by(1.0)
                        .suffix(" px"),
                );
            });

            labeled_row(ui, "Vue par défaut :", |ui| {
                ui.selectable_value(&mut settings.current_view, "Day".to_string(), "Jour");
                ui.selectable_value(&mut settings.current_view, "Week".to_string(), "Semaine");
            });

            ui.add_space(8.0);
            ui.heading("Apparence");
            ui.add_space(4.0);

            labeled_row(ui, "Thème :", |ui| {
                egui::ComboBox::from_id_source("theme_combo")
                    .selected_text(theme_label(&settings.theme))
                    .show_ui(ui, |ui| {
                        for theme in ["system", "light", "dark"] {
                            ui.selectable_value(
                                &mut settings.theme,
                                theme.to_string(),
                                theme_label(theme),
                            );
                        }
                    });
            });

            ui.add_space(16.0);
            ui.separator();
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if ui.button("💾 Enregistrer").clicked() {
                    let service = SettingsService::new(database);
                    match service.update(&state.draft) {
                        Ok(()) => {
                            saved = Some(state.draft.clone());
                            closed = true;
                        }
                        Err(e) => {
                            log::warn!("Failed to save settings: {:#}", e);
                            state.error_message =
                                Some(format!("Impossible d'enregistrer : {}", e));
                        }
                    }
                }

                if ui.button("✖ Annuler").clicked() {
                    closed = true;
                }

                ui.add_space(20.0);

                if ui
                    .button(RichText::new("↺ Valeurs par défaut").color(Color32::LIGHT_BLUE))
                    .clicked()
                {
                    match SettingsService::new(database).reset() {
                        Ok(()) => {
                            state.draft = PlanningSettings::default();
                            state.error_message = None;
                            saved = Some(state.draft.clone());
                        }
                        Err(e) => {
                            log::warn!("Failed to reset settings: {:#}", e);
                            state.error_message =
                                Some(format!("Impossible de réinitialiser : {}", e));
                        }
                    }
                }
            });
        });

    SettingsDialogResponse {
        saved,
        closed: closed || !dialog_open,
    }
}
