use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_settings_table(conn)?;
    insert_default_settings(conn)?;
    Ok(())
}

fn create_settings_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            drag_snap_interval INTEGER NOT NULL DEFAULT 15,
            hour_height REAL NOT NULL DEFAULT 60.0,
            min_event_height REAL NOT NULL DEFAULT 20.0,
            current_view TEXT NOT NULL DEFAULT 'Week',
            theme TEXT NOT NULL DEFAULT 'system',
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create settings table")?;
    Ok(())
}

fn insert_default_settings(conn: &Connection) -> Result<()> {
    conn.execute("INSERT OR IGNORE INTO settings (id) VALUES (1)", [])
        .context("Failed to insert default settings")?;
    Ok(())
}
