//! Time grid rendering for the planning views.
//!
//! Paints the hour gutter, the day columns with hour lines and the current
//! time indicator. Event cards are painted on top by the planning view.

use chrono::{NaiveDate, NaiveDateTime};
use egui::{Align2, FontId, Pos2, Rect, Stroke, Vec2};

use super::palette::TimeGridPalette;
use crate::services::planning::GridMetrics;

pub const TIME_LABEL_WIDTH: f32 = 50.0;
pub const COLUMN_SPACING: f32 = 1.0;

/// Screen geometry of one frame of the grid.
#[derive(Debug, Clone)]
pub struct GridGeometry {
    /// Full scrollable content rectangle (24 hours tall)
    pub rect: Rect,
    pub dates: Vec<NaiveDate>,
    pub column_width: f32,
}

impl GridGeometry {
    pub fn new(origin: Pos2, width: f32, dates: Vec<NaiveDate>, metrics: &GridMetrics) -> Self {
        let columns = dates.len().max(1) as f32;
        let column_width =
            ((width - TIME_LABEL_WIDTH - COLUMN_SPACING * columns) / columns).max(40.0);
        let total_width = TIME_LABEL_WIDTH + (column_width + COLUMN_SPACING) * columns;

        Self {
            rect: Rect::from_min_size(origin, Vec2::new(total_width, metrics.day_height())),
            dates,
            column_width,
        }
    }

    pub fn column_rect(&self, index: usize) -> Rect {
        let left = self.rect.left()
            + TIME_LABEL_WIDTH
            + COLUMN_SPACING
            + index as f32 * (self.column_width + COLUMN_SPACING);
        Rect::from_min_size(
            Pos2::new(left, self.rect.top()),
            Vec2::new(self.column_width, self.rect.height()),
        )
    }
}

/// Draw the current time indicator line across today's column.
pub fn draw_current_time_indicator(
    ui: &egui::Ui,
    geometry: &GridGeometry,
    metrics: &GridMetrics,
    now: NaiveDateTime,
    palette: &TimeGridPalette,
) {
    let Some(day_index) = geometry.dates.iter().position(|d| *d == now.date()) else {
        return;
    };

    let column = geometry.column_rect(day_index);
    let y = column.top() + metrics.offset_for(now);

    let painter = ui.painter();
    painter.circle_filled(Pos2::new(column.left() - 3.0, y), 3.0, palette.now_line);
    painter.line_segment(
        [Pos2::new(column.left(), y), Pos2::new(column.right(), y)],
        Stroke::new(2.0, palette.now_line),
    );
}

/// Paint gutter, columns and hour lines.
pub fn render_time_grid(
    ui: &egui::Ui,
    geometry: &GridGeometry,
    metrics: &GridMetrics,
    today: NaiveDate,
    palette: &TimeGridPalette,
) {
    let painter = ui.painter();
    let gutter = Rect::from_min_size(
        geometry.rect.min,
        Vec2::new(TIME_LABEL_WIDTH, geometry.rect.height()),
    );
    painter.rect_filled(gutter, 0.0, palette.gutter_bg);

    for (index, date) in geometry.dates.iter().enumerate() {
        let column = geometry.column_rect(index);
        let fill = if *date == today {
            palette.today_bg
        } else {
            palette.column_bg
        };
        painter.rect_filled(column, 0.0, fill);

        if index > 0 {
            painter.line_segment(
                [
                    Pos2::new(column.left() - COLUMN_SPACING, column.top()),
                    Pos2::new(column.left() - COLUMN_SPACING, column.bottom()),
                ],
                Stroke::new(1.0, palette.divider),
            );
        }
    }

    for hour in 0..24 {
        let y = geometry.rect.top() + hour as f32 * metrics.hour_height;
        painter.line_segment(
            [
                Pos2::new(gutter.right(), y),
                Pos2::new(geometry.rect.right(), y),
            ],
            Stroke::new(1.0, palette.hour_line),
        );

        let half = y + metrics.hour_height / 2.0;
        painter.line_segment(
            [
                Pos2::new(gutter.right(), half),
                Pos2::new(geometry.rect.right(), half),
            ],
            Stroke::new(0.5, palette.half_hour_line),
        );

        painter.text(
            Pos2::new(gutter.right() - 6.0, y + 2.0),
            Align2::RIGHT_TOP,
            format!("{:02}:00", hour),
            FontId::proportional(12.0),
            palette.hour_text,
        );
    }
}
