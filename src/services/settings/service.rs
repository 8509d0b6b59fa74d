use crate::models::settings::PlanningSettings;
use crate::services::database::Database;
use anyhow::{anyhow, Context, Result};

use super::mapper::row_to_settings;

pub struct SettingsService<'a> {
    db: &'a Database,
}

impl<'a> SettingsService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Get the current settings
    pub fn get(&self) -> Result<PlanningSettings> {
        let conn = self.db.connection();

        let settings = conn
            .query_row(
                "SELECT id, drag_snap_interval, hour_height, min_event_height,
                    current_view, theme
             FROM settings WHERE id = 1",
                [],
                row_to_settings,
            )
            .context("Failed to load settings")?;

        Ok(settings)
    }

    /// Update settings
    pub fn update(&self, settings: &PlanningSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        let conn = self.db.connection();

        conn.execute(
            "UPDATE settings \
             SET drag_snap_interval = ?1, \
                 hour_height = ?2, \
                 min_event_height = ?3, \
                 current_view = ?4, \
                 theme = ?5, \
                 updated_at = CURRENT_TIMESTAMP \
             WHERE id = 1",
            (
                settings.drag_snap_interval,
                settings.hour_height as f64,
                settings.min_event_height as f64,
                &settings.current_view,
                &settings.theme,
            ),
        )
        .context("Failed to update settings")?;

        Ok(())
    }

    /// Reset settings to defaults
    pub fn reset(&self) -> Result<()> {
        self.update(&PlanningSettings::default())
    }
}
