//! Toast notifications for brief feedback messages.
//!
//! Toasts are non-blocking and fade away on their own. The planner uses them
//! for success notices and soft warnings; failures that undo a change go
//! through the alert dialog instead.

use egui::{Color32, Context, Pos2, RichText};
use std::time::{Duration, Instant};

const MAX_VISIBLE: usize = 4;
const FADE_OUT: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Warning,
}

impl ToastLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastLevel::Success => "✓",
            ToastLevel::Info => "ℹ",
            ToastLevel::Warning => "⚠",
        }
    }

    /// Warnings stay a little longer so they can be read.
    fn duration(&self) -> Duration {
        match self {
            ToastLevel::Success | ToastLevel::Info => Duration::from_secs(3),
            ToastLevel::Warning => Duration::from_secs(5),
        }
    }

    pub fn background_color(&self, is_dark_theme: bool) -> Color32 {
        match (self, is_dark_theme) {
            (ToastLevel::Success, true) => Color32::from_rgb(30, 70, 40),
            (ToastLevel::Info, true) => Color32::from_rgb(30, 50, 80),
            (ToastLevel::Warning, true) => Color32::from_rgb(80, 60, 20),
            (ToastLevel::Success, false) => Color32::from_rgb(220, 255, 220),
            (ToastLevel::Info, false) => Color32::from_rgb(220, 235, 255),
            (ToastLevel::Warning, false) => Color32::from_rgb(255, 245, 200),
        }
    }

    pub fn text_color(&self, is_dark_theme: bool) -> Color32 {
        match (self, is_dark_theme) {
            (ToastLevel::Success, true) => Color32::from_rgb(100, 220, 120),
            (ToastLevel::Info, true) => Color32::from_rgb(100, 180, 255),
            (ToastLevel::Warning, true) => Color32::from_rgb(255, 200, 80),
            (ToastLevel::Success, false) => Color32::from_rgb(30, 120, 50),
            (ToastLevel::Info, false) => Color32::from_rgb(30, 80, 150),
            (ToastLevel::Warning, false) => Color32::from_rgb(150, 100, 0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub created_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
            created_at: Instant::now(),
        }
    }

    fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.level.duration()
    }

    /// Opacity for the fade-out at the end of the toast's life.
    fn opacity(&self) -> f32 {
        let duration = self.level.duration();
        let elapsed = self.created_at.elapsed();
        let fade_start = duration.saturating_sub(FADE_OUT);

        if elapsed >= duration {
            0.0
        } else if elapsed >= fade_start {
            ((duration - elapsed).as_secs_f32() / FADE_OUT.as_secs_f32()).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

#[derive(Debug, Default)]
pub struct ToastManager {
    toasts: Vec<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, toast: Toast) {
        self.toasts.push(toast);
        if self.toasts.len() > MAX_VISIBLE {
            self.toasts.remove(0);
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.add(Toast::new(message, ToastLevel::Success));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.add(Toast::new(message, ToastLevel::Info));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.add(Toast::new(message, ToastLevel::Warning));
    }

    pub fn render(&mut self, ctx: &Context, is_dark_theme: bool) {
        self.toasts.retain(|t| !t.is_expired());
        if self.toasts.is_empty() {
            return;
        }

        // Keep repainting while toasts fade
        ctx.request_repaint();

        let screen_rect = ctx.screen_rect();
        let toast_width = 340.0;
        let toast_height = 40.0;
        let margin = 12.0;
        let spacing = 6.0;

        for (i, toast) in self.toasts.iter().rev().enumerate() {
            let opacity = toast.opacity();
            if opacity <= 0.0 {
                continue;
            }

            let y_offset = (i as f32) * (toast_height + spacing);
            let pos = Pos2::new(
                screen_rect.right() - toast_width - margin,
                screen_rect.bottom() - toast_height - margin - y_offset,
            );

            let bg_color = toast
                .level
                .background_color(is_dark_theme)
                .gamma_multiply(0.9 * opacity);
            let text_color = toast.level.text_color(is_dark_theme).gamma_multiply(opacity);

            egui::Area::new(egui::Id::new(("planner_toast", i)))
                .fixed_pos(pos)
                .order(egui::Order::Foreground)
                .interactable(false)
                .show(ctx, |ui| {
                    egui::Frame::none()
                        .fill(bg_color)
                        .rounding(6.0)
                        .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                        .stroke(egui::Stroke::new(1.0, text_color.gamma_multiply(0.3)))
                        .show(ui, |ui| {
                            ui.set_min_width(toast_width - 24.0);
                            ui.horizontal(|ui| {
                                ui.label(
                                    RichText::new(toast.level.icon())
                                        .color(text_color)
                                        .strong(),
                                );
                                ui.label(RichText::new(&toast.message).color(text_color));
                            });
                        });
                });
        }
    }
}
