//! Edit dialog for a stop, accommodation or activity.
//!
//! Opened by a tap on an event card. It remembers where the planning grid was
//! so closing it, or saving, brings the user back to the same position.

use chrono::NaiveDateTime;
use egui::{Color32, RichText};

use crate::models::planning_event::{EventDraft, EventKind, PlanningEvent};
use crate::models::step::ActivityType;
use crate::ui_egui::app::ReturnContext;
use crate::utils::date::parse_wall_clock;

const INPUT_FORMAT: &str = "%Y-%m-%d %H:%M";
const LABEL_WIDTH: f32 = 110.0;

pub struct EditDialogState {
    original: EventDraft,
    pub title: String,
    pub address: String,
    pub notes: String,
    pub start_text: String,
    pub end_text: String,
    pub activity_type: Option<ActivityType>,
    pub error_message: Option<String>,
    /// A save request is running in the background
    pub saving: bool,
    pub return_to: ReturnContext,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditDialogAction {
    None,
    Save(EventDraft),
    Close,
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

fn parse_field(label: &str, value: &str) -> Result<NaiveDateTime, String> {
    parse_wall_clock(value.trim())
        .map_err(|_| format!("{} invalide (format attendu AAAA-MM-JJ HH:MM)", label))
}

impl EditDialogState {
    pub fn new(event: &PlanningEvent, return_to: ReturnContext) -> Self {
        let original = EventDraft::from_event(event);
        Self {
            title: original.title.clone(),
            address: original.address.clone(),
            notes: original.notes.clone(),
            start_text: original.start.format(INPUT_FORMAT).to_string(),
            end_text: original.end.format(INPUT_FORMAT).to_string(),
            activity_type: original.activity_type,
            error_message: None,
            saving: false,
            return_to,
            original,
        }
    }

    pub fn kind(&self) -> EventKind {
        self.original.key.kind
    }

    /// Build the draft to send, or a user-facing validation message.
    pub fn to_draft(&self) -> Result<EventDraft, String> {
        let start = parse_field("Début", &self.start_text)?;
        let end = parse_field("Fin", &self.end_text)?;

        let draft = EventDraft {
            title: self.title.trim().to_string(),
            address: self.address.trim().to_string(),
            notes: self.notes.clone(),
            start,
            end,
            activity_type: self.activity_type,
            ..self.original.clone()
        };
        draft.validate()?;
        Ok(draft)
    }

    pub fn has_changes(&self) -> bool {
        self.to_draft()
            .map(|draft| draft != self.original)
            .unwrap_or(true)
    }
}

/// Render the edit dialog
pub fn render_edit_dialog(ctx: &egui::Context, state: &mut EditDialogState) -> EditDialogAction {
    let mut action = EditDialogAction::None;
    let mut dialog_open = true;
    let window_title = format!("Modifier : {}", state.kind().label());

    egui::Window::new(window_title)
        .id(egui::Id::new("planning_edit_dialog"))
        .open(&mut dialog_open)
        .collapsible(false)
        .resizable(false)
        .default_width(440.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            if let Some(ref error) = state.error_message {
                ui.colored_label(Color32::RED, RichText::new(error).strong());
                ui.add_space(8.0);
            }

            ui.add_enabled_ui(!state.saving, |ui| {
                labeled_row(ui, "Nom :", |ui| {
                    ui.text_edit_singleline(&mut state.title);
                });

                labeled_row(ui, "Adresse :", |ui| {
                    ui.text_edit_singleline(&mut state.address);
                });
                if state.address.trim().is_empty() {
                    labeled_row(ui, "", |ui| {
                        ui.colored_label(
                            Color32::from_rgb(230, 140, 30),
                            "Sans adresse, l'élément ne peut pas être déplacé.",
                        );
                    });
                }

                labeled_row(ui, "Début :", |ui| {
                    ui.text_edit_singleline(&mut state.start_text);
                });
                labeled_row(ui, "Fin :", |ui| {
                    ui.text_edit_singleline(&mut state.end_text);
                });

                if state.kind() == EventKind::Activity {
                    labeled_row(ui, "Type :", |ui| {
                        let selected = state.activity_type.unwrap_or_default();
                        egui::ComboBox::from_id_source("activity_type_combo")
                            .selected_text(format!("{} {}", selected.icon(), selected))
                            .show_ui(ui, |ui| {
                                for activity_type in ActivityType::ALL {
                                    ui.selectable_value(
                                        &mut state.activity_type,
                                        Some(activity_type),
                                        format!("{} {}", activity_type.icon(), activity_type),
                                    );
                                }
                            });
                    });
                }

                labeled_row(ui, "Notes :", |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut state.notes)
                            .desired_rows(3)
                            .desired_width(260.0),
                    );
                });
            });

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(6.0);

            ui.horizontal(|ui| {
                let save_label = if state.saving {
                    "⏳ Enregistrement…"
                } else {
                    "💾 Enregistrer"
                };
                let can_save = !state.saving && state.has_changes();
                if ui
                    .add_enabled(can_save, egui::Button::new(save_label))
                    .clicked()
                {
                    match state.to_draft() {
                        Ok(draft) => {
                            state.error_message = None;
                            action = EditDialogAction::Save(draft);
                        }
                        Err(message) => state.error_message = Some(message),
                    }
                }

                if ui.button("✖ Fermer").clicked() {
                    action = EditDialogAction::Close;
                }
            });
        });

    if !dialog_open && action == EditDialogAction::None {
        action = EditDialogAction::Close;
    }

    action
}
