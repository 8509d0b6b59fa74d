use std::sync::Arc;

use crate::models::config::AppConfig;
use crate::services::api::PlanningBackend;
use crate::services::database::Database;
use crate::services::planning::MutationWorker;
use crate::services::settings::SettingsService;

/// Shared access point for services and resources that multiple app modules need.
pub struct AppContext {
    config: AppConfig,
    backend: Arc<dyn PlanningBackend>,
    database: &'static Database,
    worker: MutationWorker,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        backend: Arc<dyn PlanningBackend>,
        database: &'static Database,
    ) -> Self {
        let worker = MutationWorker::new(Arc::clone(&backend));
        Self {
            config,
            backend,
            database,
            worker,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Handle to the backend for a background thread.
    pub fn backend(&self) -> Arc<dyn PlanningBackend> {
        Arc::clone(&self.backend)
    }

    pub fn database(&self) -> &'static Database {
        self.database
    }

    pub fn worker(&self) -> &MutationWorker {
        &self.worker
    }

    pub fn worker_mut(&mut self) -> &mut MutationWorker {
        &mut self.worker
    }

    pub fn settings_service(&self) -> SettingsService<'_> {
        SettingsService::new(self.database)
    }
}
