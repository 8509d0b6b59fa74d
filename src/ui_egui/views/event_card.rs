//! Painting of event cards on the planning grid.
//!
//! Draggable events get a solid card. Events that cannot be moved are drawn
//! faded with a dashed border and the missing-address label. While dragging,
//! a ghost outline shows where the event would land.

use egui::{Color32, FontId, Pos2, Rect, Shape, Stroke, Vec2};

use super::palette::TimeGridPalette;
use super::utils::{event_fill, with_alpha};
use crate::models::planning_event::{PlanningEvent, MISSING_ADDRESS_LABEL};

const CARD_ROUNDING: f32 = 3.0;
const CARD_INSET: f32 = 2.0;
const INELIGIBLE_ALPHA: u8 = 110;

#[derive(Debug, Clone, Copy, Default)]
pub struct CardState {
    pub draggable: bool,
    /// A move for this event awaits the backend
    pub saving: bool,
    /// The event is being dragged; the original card is dimmed
    pub lifted: bool,
}

/// Screen rectangle of a card placed at `top`/`height` inside `column`.
pub fn placed_rect(column: Rect, top: f32, height: f32) -> Rect {
    Rect::from_min_size(
        Pos2::new(column.left() + CARD_INSET, column.top() + top),
        Vec2::new((column.width() - 2.0 * CARD_INSET).max(1.0), height),
    )
}

fn dashed_outline(rect: Rect, stroke: Stroke) -> Vec<Shape> {
    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
        rect.left_top(),
    ];
    Shape::dashed_line(&corners, stroke, 5.0, 3.0)
}

fn paint_label(
    ui: &egui::Ui,
    rect: Rect,
    text: String,
    size: f32,
    color: Color32,
    offset_y: f32,
) -> f32 {
    let job = egui::text::LayoutJob::simple(
        text,
        FontId::proportional(size),
        color,
        (rect.width() - 8.0).max(1.0),
    );
    let galley = ui.fonts(|f| f.layout_job(job));
    let height = galley.size().y;

    ui.painter().with_clip_rect(rect).galley(
        Pos2::new(rect.left() + 4.0, rect.top() + offset_y),
        galley,
        color,
    );

    height
}

pub fn paint_event_card(
    ui: &egui::Ui,
    rect: Rect,
    event: &PlanningEvent,
    state: CardState,
    palette: &TimeGridPalette,
) {
    let base = event_fill(event);
    let fill = if !state.draggable {
        with_alpha(base, INELIGIBLE_ALPHA)
    } else if state.lifted {
        with_alpha(base, 90)
    } else {
        base
    };

    ui.painter().rect_filled(rect, CARD_ROUNDING, fill);

    if !state.draggable {
        ui.painter().extend(dashed_outline(rect, Stroke::new(1.5, base)));
    }

    let mut title = String::new();
    if state.saving {
        title.push_str("⏳ ");
    }
    if let Some(activity_type) = event.activity_type {
        title.push_str(activity_type.icon());
        title.push(' ');
    }
    title.push_str(&event.title);

    let text_color = if state.draggable {
        palette.card_text
    } else {
        with_alpha(palette.card_text, 200)
    };

    let mut y = 2.0;

    // The warning comes first so short cards still show it
    if !state.draggable {
        y += paint_label(ui, rect, MISSING_ADDRESS_LABEL.to_string(), 9.5, text_color, y);
    }

    y += paint_label(ui, rect, title, 11.0, text_color, y);

    if rect.height() > y + 12.0 {
        let times = format!(
            "{} - {}",
            event.start.format("%H:%M"),
            event.end.format("%H:%M")
        );
        paint_label(ui, rect, times, 9.5, text_color, y);
    }
}

/// Outline of the drop target while dragging, with the tentative range.
pub fn paint_drop_ghost(
    ui: &egui::Ui,
    rect: Rect,
    event: &PlanningEvent,
    label: String,
    valid: bool,
    palette: &TimeGridPalette,
) {
    let base = event_fill(event);
    let stroke_color = if valid {
        palette.ghost_stroke
    } else {
        palette.now_line
    };

    ui.painter()
        .rect_filled(rect, CARD_ROUNDING, with_alpha(base, 170));
    ui.painter()
        .rect_stroke(rect, CARD_ROUNDING, Stroke::new(2.0, stroke_color));
    paint_label(ui, rect, label, 10.5, palette.card_text, 2.0);
}
