//! Theme module for the planner window
//!
//! Defines the PlannerTheme structure, resolves the "system" preference and
//! converts between egui::Color32 and the hex colors carried by events.

use egui::Color32;

/// Colors used by the planning grid and its surrounding panels
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerTheme {
    /// Whether this is a dark theme (affects base egui::Visuals)
    pub is_dark: bool,

    /// Application background color
    pub app_background: Color32,

    /// Grid background behind the day columns
    pub grid_background: Color32,

    /// Hour label gutter
    pub gutter_background: Color32,

    /// Today's column background color
    pub today_background: Color32,

    /// Accent for today's header and the drop preview
    pub accent: Color32,

    /// Hour and column lines
    pub grid_line: Color32,

    /// Primary text color (headings, dates)
    pub text_primary: Color32,

    /// Secondary text color (hour labels, secondary info)
    pub text_secondary: Color32,

    /// Current time indicator
    pub now_line: Color32,
}

impl PlannerTheme {
    /// Create the default Light theme
    pub fn light() -> Self {
        Self {
            is_dark: false,
            app_background: Color32::from_rgb(245, 245, 245),
            grid_background: Color32::from_rgb(255, 255, 255),
            gutter_background: Color32::from_rgb(248, 248, 250),
            today_background: Color32::from_rgb(255, 248, 235),
            accent: Color32::from_rgb(255, 152, 0),
            grid_line: Color32::from_rgb(225, 225, 225),
            text_primary: Color32::from_rgb(40, 40, 40),
            text_secondary: Color32::from_rgb(110, 110, 110),
            now_line: Color32::from_rgb(229, 57, 53),
        }
    }

    /// Create the default Dark theme
    pub fn dark() -> Self {
        Self {
            is_dark: true,
            app_background: Color32::from_rgb(30, 30, 30),
            grid_background: Color32::from_rgb(40, 40, 40),
            gutter_background: Color32::from_rgb(35, 35, 38),
            today_background: Color32::from_rgb(58, 50, 38),
            accent: Color32::from_rgb(255, 167, 38),
            grid_line: Color32::from_rgb(62, 62, 62),
            text_primary: Color32::from_rgb(240, 240, 240),
            text_secondary: Color32::from_rgb(170, 170, 170),
            now_line: Color32::from_rgb(255, 100, 100),
        }
    }

    /// Theme for a stored preference ("light", "dark" or "system").
    pub fn for_preference(preference: &str) -> Self {
        match preference {
            "dark" => Self::dark(),
            "light" => Self::light(),
            _ => match dark_light::detect() {
                dark_light::Mode::Dark => Self::dark(),
                dark_light::Mode::Light | dark_light::Mode::Default => Self::light(),
            },
        }
    }

    /// Apply this theme to an egui context
    pub fn apply_to_context(&self, ctx: &egui::Context) {
        let mut visuals = if self.is_dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        visuals.window_fill = self.app_background;
        visuals.panel_fill = self.app_background;
        visuals.override_text_color = Some(self.text_primary);

        ctx.set_visuals(visuals);
    }

    /// Parse hex string to Color32
    pub fn hex_to_color(hex: &str) -> Result<Color32, String> {
        let hex = hex.trim_start_matches('#');

        if hex.len() != 6 {
            return Err("Hex color must be 6 characters".to_string());
        }

        let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| "Invalid hex color")?;
        let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| "Invalid hex color")?;
        let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| "Invalid hex color")?;

        Ok(Color32::from_rgb(r, g, b))
    }
}
