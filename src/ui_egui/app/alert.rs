//! Blocking alerts for refused or failed changes.
//!
//! An alert is a modal window with a single OK button. Alerts raised while one
//! is showing queue up behind it.

use std::collections::VecDeque;

use egui::{Color32, Context, RichText};

use crate::services::planning::{MoveError, MoveFailure};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub level: AlertLevel,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Warning,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    /// A move refused before anything was sent.
    pub fn move_refused(err: &MoveError) -> Self {
        let title = match err {
            MoveError::Ineligible { .. } => "Adresse manquante",
            MoveError::OutOfDay(_) => "Déplacement impossible",
            _ => "Déplacement refusé",
        };
        Self::warning(title, err.user_message())
    }

    /// A move the backend refused; the event is already back in place.
    pub fn move_failed(failure: &MoveFailure) -> Self {
        let title = match failure {
            MoveFailure::MissingRouteAddress => "Adresse manquante",
            _ => "Échec de l'enregistrement",
        };
        Self::error(title, failure.user_message())
    }

    fn icon(&self) -> (&'static str, Color32) {
        match self.level {
            AlertLevel::Warning => ("⚠", Color32::from_rgb(220, 150, 50)),
            AlertLevel::Error => ("✗", Color32::from_rgb(200, 60, 60)),
        }
    }
}

#[derive(Debug, Default)]
pub struct AlertState {
    queue: VecDeque<Alert>,
}

impl AlertState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, alert: Alert) {
        log::debug!("Alert queued: {}", alert.title);
        self.queue.push_back(alert);
    }

    pub fn is_open(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Render the front alert; OK, Enter or Escape dismisses it.
    pub fn render(&mut self, ctx: &Context) {
        let Some(alert) = self.queue.front() else {
            return;
        };

        let mut dismissed = false;

        egui::Window::new(alert.title.as_str())
            .id(egui::Id::new("planner_alert"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.set_min_width(300.0);
                ui.set_max_width(420.0);
                ui.add_space(10.0);

                let (icon, color) = alert.icon();
                ui.horizontal(|ui| {
                    ui.label(RichText::new(icon).size(24.0).color(color));
                    ui.vertical(|ui| {
                        ui.label(alert.message.as_str());
                    });
                });

                ui.add_space(15.0);
                ui.separator();
                ui.add_space(6.0);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape) || i.key_pressed(egui::Key::Enter)) {
            dismissed = true;
        }

        if dismissed {
            self.queue.pop_front();
        }
    }
}
