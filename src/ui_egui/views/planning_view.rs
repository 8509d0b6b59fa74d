//! Day and week planning views.
//!
//! Lays out the day headers and the scrollable time grid, paints every event of
//! the board at its computed position and turns pointer input into gestures.

use chrono::{NaiveDate, NaiveDateTime};
use egui::{Align2, CursorIcon, FontId, Id, Pos2, Rect, Sense, Vec2};

use super::event_card::{paint_drop_ghost, paint_event_card, placed_rect, CardState};
use super::palette::TimeGridPalette;
use super::time_grid::{
    draw_current_time_indicator, render_time_grid, GridGeometry, TIME_LABEL_WIDTH,
};
use super::utils::{format_day_header, format_event_tooltip};
use crate::models::planning_event::{EventKey, PlanningEvent};
use crate::services::planning::{
    bucket_by_day, shifted_range, snap_minutes, GestureOutcome, GridMetrics, PlanningBoard,
    PlanningWindow,
};
use crate::ui_egui::drag::DragManager;

const HEADER_HEIGHT: f32 = 26.0;

pub struct PlanningViewConfig<'a> {
    pub window: PlanningWindow,
    pub metrics: GridMetrics,
    pub snap_interval: u32,
    pub today: NaiveDate,
    pub now: NaiveDateTime,
    pub palette: &'a TimeGridPalette,
    /// Scroll the grid to this offset on this frame
    pub scroll_to: Option<f32>,
}

struct DropPreview<'a> {
    event: &'a PlanningEvent,
    column: Rect,
    dy: f32,
}

pub struct PlanningView;

impl PlanningView {
    pub fn show(
        ui: &mut egui::Ui,
        board: &PlanningBoard,
        config: &PlanningViewConfig,
    ) -> GestureOutcome {
        let dates = config.window.dates();
        Self::render_day_headers(ui, &dates, config);

        let mut scroll = egui::ScrollArea::vertical()
            .id_source("planning_grid_scroll")
            .auto_shrink([false, false])
            .drag_to_scroll(false);
        if let Some(offset) = config.scroll_to {
            scroll = scroll.vertical_scroll_offset(offset);
        }

        scroll
            .show(ui, |ui| Self::render_grid(ui, board, dates, config))
            .inner
    }

    fn render_day_headers(ui: &mut egui::Ui, dates: &[NaiveDate], config: &PlanningViewConfig) {
        let width = ui.available_width();
        let (rect, _) = ui.allocate_exact_size(Vec2::new(width, HEADER_HEIGHT), Sense::hover());
        let geometry = GridGeometry::new(rect.min, width, dates.to_vec(), &config.metrics);

        for (index, date) in dates.iter().enumerate() {
            let column = geometry.column_rect(index);
            let color = if *date == config.today {
                config.palette.today_header_text
            } else {
                config.palette.header_text
            };
            ui.painter().text(
                Pos2::new(column.center().x, rect.center().y),
                Align2::CENTER_CENTER,
                format_day_header(*date),
                FontId::proportional(13.0),
                color,
            );
        }
    }

    fn render_grid(
        ui: &mut egui::Ui,
        board: &PlanningBoard,
        dates: Vec<NaiveDate>,
        config: &PlanningViewConfig,
    ) -> GestureOutcome {
        let ctx = ui.ctx().clone();
        let metrics = config.metrics;
        let palette = config.palette;

        let width = ui.available_width().max(TIME_LABEL_WIDTH + 80.0);
        let (rect, _) =
            ui.allocate_exact_size(Vec2::new(width, metrics.day_height()), Sense::hover());
        let geometry = GridGeometry::new(rect.min, width, dates, &metrics);
        render_time_grid(ui, &geometry, &metrics, config.today, palette);

        let dragged = DragManager::drag_offset(&ctx);
        let clip = ui.clip_rect();
        let layer = ui.layer_id();
        let (pressed, press_origin) =
            ctx.input(|i| (i.pointer.primary_pressed(), i.pointer.press_origin()));

        let mut hit: Option<(EventKey, bool)> = None;
        let mut preview: Option<DropPreview> = None;

        for (index, (_, column_events)) in bucket_by_day(&config.window, board.events())
            .into_iter()
            .enumerate()
        {
            let column = geometry.column_rect(index);

            for event in column_events {
                let placed = metrics.event_box(event);
                let card = placed_rect(column, placed.top, placed.height);
                let key = event.key();
                let lifted = matches!(&dragged, Some((dragged_key, _)) if dragged_key == &key);
                let state = CardState {
                    draggable: event.is_draggable(),
                    saving: board.is_in_flight(&key),
                    lifted,
                };

                paint_event_card(ui, card, event, state, palette);

                let response = ui.interact(
                    card,
                    Id::new(("planning_event", &key)),
                    Sense::click_and_drag(),
                );
                if dragged.is_none() {
                    let _ = response.on_hover_text(format_event_tooltip(event));
                }

                // Later cards are painted on top, so the last hit wins
                // Presses on windows above the grid do not count
                if pressed
                    && press_origin.is_some_and(|p| {
                        card.contains(p) && clip.contains(p) && ctx.layer_id_at(p) == Some(layer)
                    })
                {
                    hit = Some((key.clone(), state.draggable));
                }

                if let Some((_, dy)) = dragged.as_ref().filter(|_| lifted) {
                    preview = Some(DropPreview {
                        event,
                        column,
                        dy: *dy,
                    });
                }
            }
        }

        if let Some(preview) = preview {
            Self::paint_preview(ui, &preview, config);
            ctx.set_cursor_icon(CursorIcon::Grabbing);
        }

        draw_current_time_indicator(ui, &geometry, &metrics, config.now, palette);

        Self::track_gesture(&ctx, hit, press_origin)
    }

    fn paint_preview(ui: &egui::Ui, preview: &DropPreview, config: &PlanningViewConfig) {
        let metrics = config.metrics;
        let minutes = snap_minutes(preview.dy, metrics.hour_height, config.snap_interval);
        let placed = metrics.event_box(preview.event);
        let top = placed.top + minutes as f32 / 60.0 * metrics.hour_height;
        let rect = placed_rect(preview.column, top, placed.height);

        let (start, end, valid) = match shifted_range(preview.event, minutes) {
            Ok((start, end)) => (start, end, true),
            Err(out) => (out.new_start, out.new_end, false),
        };
        let mut label = format!("{} - {}", start.format("%H:%M"), end.format("%H:%M"));
        if minutes != 0 {
            label.push_str(&format!(" ({:+} min)", minutes));
        }

        paint_drop_ghost(ui, rect, preview.event, label, valid, config.palette);
    }

    fn track_gesture(
        ctx: &egui::Context,
        hit: Option<(EventKey, bool)>,
        press_origin: Option<Pos2>,
    ) -> GestureOutcome {
        if let (Some((key, draggable)), Some(origin)) = (hit, press_origin) {
            DragManager::press(ctx, key, draggable, origin);
        }

        if DragManager::active(ctx).is_none() {
            return GestureOutcome::Ignored;
        }

        let (released, pos) =
            ctx.input(|i| (i.pointer.primary_released(), i.pointer.interact_pos()));
        if released {
            return DragManager::release(ctx, pos);
        }

        if let Some(pos) = pos {
            DragManager::pointer_moved(ctx, pos);
        }
        ctx.request_repaint();
        GestureOutcome::Ignored
    }
}
