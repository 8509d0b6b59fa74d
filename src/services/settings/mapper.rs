use crate::models::settings::PlanningSettings;
use rusqlite::Row;

pub fn row_to_settings(row: &Row) -> Result<PlanningSettings, rusqlite::Error> {
    Ok(PlanningSettings {
        id: Some(row.get(0)?),
        drag_snap_interval: row.get(1)?,
        hour_height: row.get::<_, f64>(2)? as f32,
        min_event_height: row.get::<_, f64>(3)? as f32,
        current_view: row.get(4)?,
        theme: row.get(5)?,
    })
}
