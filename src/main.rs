// Roadtrip Planner Application
// Main entry point

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use roadtrip_planner::services::api::ApiClient;
use roadtrip_planner::services::config::{default_database_path, load_config};
use roadtrip_planner::services::database::Database;
use roadtrip_planner::ui_egui::{AppContext, PlannerApp};

const FALLBACK_DATABASE_PATH: &str = "planner.db";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Roadtrip Planner");

    let config = load_config(None)?;
    let database = open_database()?;
    let backend = ApiClient::new(&config)?;
    log::info!("Using backend at {}", backend.base_url());

    let context = AppContext::new(config, Arc::new(backend), database);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Roadtrip Planner")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Roadtrip Planner",
        options,
        Box::new(|cc| Ok(Box::new(PlannerApp::new(cc, context)))),
    )
    .map_err(|err| anyhow!("Planner window failed: {}", err))
}

/// Open the preferences database and leak it for the 'static lifetime eframe
/// requires.
fn open_database() -> Result<&'static Database> {
    let path = default_database_path().unwrap_or_else(|| PathBuf::from(FALLBACK_DATABASE_PATH));
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory {}", parent.display()))?;
    }

    let db_path = path.to_string_lossy().to_string();
    let db = Database::new(&db_path)?;
    db.initialize_schema()?;
    log::info!("Preferences stored in {}", db.path());

    Ok(Box::leak(Box::new(db)))
}
