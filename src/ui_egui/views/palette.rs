use super::utils::with_alpha;
use crate::ui_egui::theme::PlannerTheme;
use egui::Color32;

fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |c1: u8, c2: u8| -> u8 { ((c1 as f32 * (1.0 - t)) + (c2 as f32 * t)).round() as u8 };
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

#[derive(Clone, Copy)]
pub(crate) struct TimeGridPalette {
    pub gutter_bg: Color32,
    pub column_bg: Color32,
    pub today_bg: Color32,
    pub hour_line: Color32,
    pub half_hour_line: Color32,
    pub divider: Color32,
    pub hour_text: Color32,
    pub header_text: Color32,
    pub today_header_text: Color32,
    pub now_line: Color32,
    pub ghost_stroke: Color32,
    pub card_text: Color32,
}

impl TimeGridPalette {
    pub fn from_theme(theme: &PlannerTheme) -> Self {
        Self {
            gutter_bg: theme.gutter_background,
            column_bg: theme.grid_background,
            today_bg: blend(theme.grid_background, theme.today_background, 0.8),
            hour_line: theme.grid_line,
            half_hour_line: with_alpha(theme.grid_line, 110),
            divider: with_alpha(theme.grid_line, 220),
            hour_text: theme.text_secondary,
            header_text: theme.text_primary,
            today_header_text: theme.accent,
            now_line: theme.now_line,
            ghost_stroke: theme.accent,
            card_text: Color32::WHITE,
        }
    }
}
