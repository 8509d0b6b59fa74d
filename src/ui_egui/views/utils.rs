//! Common utility functions for planning views.
//!
//! This module contains pure helper functions used by the grid and the cards.

use chrono::{Datelike, NaiveDate, Weekday};
use egui::Color32;

use crate::models::planning_event::{PlanningEvent, MISSING_ADDRESS_LABEL};
use crate::ui_egui::theme::PlannerTheme;

/// Fallback for events whose color cannot be parsed.
pub const DEFAULT_EVENT_COLOR: Color32 = Color32::from_rgb(84, 110, 122);

pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

pub fn event_fill(event: &PlanningEvent) -> Color32 {
    PlannerTheme::hex_to_color(&event.color).unwrap_or(DEFAULT_EVENT_COLOR)
}

fn weekday_short(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "lun.",
        Weekday::Tue => "mar.",
        Weekday::Wed => "mer.",
        Weekday::Thu => "jeu.",
        Weekday::Fri => "ven.",
        Weekday::Sat => "sam.",
        Weekday::Sun => "dim.",
    }
}

/// Column header, e.g. "lun. 30/06".
pub fn format_day_header(date: NaiveDate) -> String {
    format!("{} {}", weekday_short(date.weekday()), date.format("%d/%m"))
}

/// Tooltip for an event card: title, times, address and notes preview.
pub fn format_event_tooltip(event: &PlanningEvent) -> String {
    let mut lines = Vec::new();

    lines.push(format!("{} · {}", event.kind.label(), event.title));
    lines.push(format!(
        "🕐 {} - {}",
        event.start.format("%d/%m %H:%M"),
        event.end.format("%d/%m %H:%M")
    ));

    if let Some(activity_type) = event.activity_type {
        lines.push(format!("{} {}", activity_type.icon(), activity_type));
    }

    if event.address.trim().is_empty() {
        lines.push(MISSING_ADDRESS_LABEL.to_string());
    } else {
        lines.push(format!("📍 {}", event.address));
    }

    let notes = event.notes.trim();
    if !notes.is_empty() {
        let preview: String = notes.chars().take(100).collect();
        if notes.chars().count() > 100 {
            lines.push(format!("📝 {}…", preview));
        } else {
            lines.push(format!("📝 {}", preview));
        }
    }

    lines.join("\n")
}
