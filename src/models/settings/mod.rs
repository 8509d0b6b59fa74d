// Settings module
// User preferences for the planning grid

/// Snap intervals offered in the settings dialog, in minutes.
pub const SNAP_INTERVAL_CHOICES: [u32; 6] = [5, 10, 15, 20, 30, 60];

#[derive(Debug, Clone, PartialEq)]
pub struct PlanningSettings {
    pub id: Option<i64>,
    /// Minute granularity of drag moves
    pub drag_snap_interval: u32,
    /// Pixel height of one hour row
    pub hour_height: f32,
    /// Smallest drawn event height, so short events stay clickable
    pub min_event_height: f32,
    /// "Day" or "Week"
    pub current_view: String,
    /// "light", "dark" or "system"
    pub theme: String,
}

impl Default for PlanningSettings {
    fn default() -> Self {
        Self {
            id: Some(1),
            drag_snap_interval: 15,
            hour_height: 60.0,
            min_event_height: 20.0,
            current_view: "Week".to_string(),
            theme: "system".to_string(),
        }
    }
}

impl PlanningSettings {
    pub fn validate(&self) -> Result<(), String> {
        if !(5..=60).contains(&self.drag_snap_interval) {
            return Err(format!(
                "Snap interval must be between 5 and 60 minutes, got {}",
                self.drag_snap_interval
            ));
        }

        if !(30.0..=240.0).contains(&self.hour_height) {
            return Err(format!(
                "Hour height must be between 30 and 240 pixels, got {}",
                self.hour_height
            ));
        }

        if self.min_event_height <= 0.0 || self.min_event_height > self.hour_height {
            return Err("Minimum event height must be positive and at most one hour".to_string());
        }

        if !matches!(self.current_view.as_str(), "Day" | "Week") {
            return Err(format!("Unknown view '{}'", self.current_view));
        }

        if !matches!(self.theme.as_str(), "light" | "dark" | "system") {
            return Err(format!("Unknown theme '{}'", self.theme));
        }

        Ok(())
    }
}
