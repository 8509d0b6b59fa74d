// Database service module
// SQLite connection for locally persisted planner preferences

mod schema;

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Thin wrapper around the application's SQLite connection.
pub struct Database {
    conn: Connection,
    path: String,
}

impl Database {
    /// Create a new database connection
    ///
    /// # Arguments
    /// * `path` - Path to the SQLite database file (or ":memory:" for in-memory)
    ///
    /// # Examples
    /// ```
    /// use roadtrip_planner::services::database::Database;
    /// let db = Database::new(":memory:").unwrap();
    /// ```
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .context(format!("Failed to open database at {}", path))?;

        Ok(Self {
            conn,
            path: path.to_string(),
        })
    }

    /// Creates tables and seeds the default settings row.
    pub fn initialize_schema(&self) -> Result<()> {
        schema::initialize_schema(self.connection())
    }

    /// Get a reference to the database connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_new_database_in_memory() {
        let result = Database::new(":memory:");
        assert!(result.is_ok(), "Should create in-memory database");
    }

    #[test]
    fn test_new_database_with_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("planner.db");
        let db_path_str = db_path.to_str().unwrap();

        let db = Database::new(db_path_str).unwrap();
        assert!(Path::new(db_path_str).exists(), "Database file should exist");
        assert_eq!(db.path(), db_path_str);
    }

    #[test]
    fn test_initialize_schema_is_idempotent() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db.initialize_schema().unwrap();

        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM settings", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1, "Exactly one settings row should exist");
    }

    #[test]
    fn test_settings_table_defaults() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();

        let (snap, view): (i64, String) = db
            .connection()
            .query_row(
                "SELECT drag_snap_interval, current_view FROM settings WHERE id = 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();

        assert_eq!(snap, 15);
        assert_eq!(view, "Week");
    }
}
