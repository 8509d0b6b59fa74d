use std::time::Duration as StdDuration;

use super::alert::Alert;
use super::state::RefreshJob;
use super::PlannerApp;
use crate::models::step::Roadtrip;
use crate::services::api::ApiError;
use crate::services::planning::{BackgroundTask, TaskPoll};

impl PlannerApp {
    /// Reload the roadtrip. A silent reload shows no loading state and only
    /// reports failures as a toast.
    pub(super) fn start_refresh(&mut self, silent: bool) {
        if self.state.refresh.is_some() {
            // Keep the louder of the two requests
            let queued = self.state.refresh_queued.unwrap_or(true) && silent;
            self.state.refresh_queued = Some(queued);
            log::debug!("Refresh already running, queued another (silent={})", queued);
            return;
        }

        let roadtrip_id = self.context.config().roadtrip_id.clone();
        if roadtrip_id.is_empty() {
            if !silent {
                self.alert.show(Alert::warning(
                    "Aucun roadtrip",
                    "Aucun roadtrip n'est configuré. Renseignez roadtrip_id dans config.toml \
                     ou la variable ROADTRIP_ID.",
                ));
            }
            return;
        }

        log::info!("Loading roadtrip {} (silent={})", roadtrip_id, silent);
        let backend = self.context.backend();
        self.state.refresh = Some(RefreshJob {
            task: BackgroundTask::spawn(move || backend.fetch_roadtrip(&roadtrip_id)),
            silent,
        });
    }

    pub(super) fn is_loading(&self) -> bool {
        self.state.refresh.as_ref().is_some_and(|job| !job.silent)
    }

    /// Poll for a completed reload.
    ///
    /// Should be called once per frame, before rendering.
    pub(super) fn poll_refresh(&mut self, ctx: &egui::Context) {
        let Some(job) = &self.state.refresh else {
            return;
        };
        let silent = job.silent;
        let poll = job.task.poll();

        match poll {
            TaskPoll::Pending => {
                ctx.request_repaint_after(StdDuration::from_millis(200));
                return;
            }
            TaskPoll::Ready(result) => {
                self.state.refresh = None;
                self.apply_refresh(result, silent);
            }
            TaskPoll::Lost => {
                self.state.refresh = None;
                log::error!("Refresh worker disconnected unexpectedly");
                self.apply_refresh(
                    Err(ApiError::Network("refresh worker stopped".to_string())),
                    silent,
                );
            }
        }

        if let Some(queued_silent) = self.state.refresh_queued.take() {
            self.start_refresh(queued_silent);
        }
    }

    fn apply_refresh(&mut self, result: Result<Roadtrip, ApiError>, silent: bool) {
        match result {
            Ok(roadtrip) => {
                let replaced = self.board.sync_steps(&roadtrip.steps);
                log::info!(
                    "Loaded roadtrip '{}': {} steps, {} events (list {})",
                    roadtrip.title,
                    roadtrip.steps.len(),
                    self.board.events().len(),
                    if replaced { "replaced" } else { "unchanged" }
                );
                self.roadtrip_title = roadtrip.title;

                if !self.state.loaded_once {
                    self.state.loaded_once = true;
                    self.focus_first_event_if_window_empty();
                }
                if !silent {
                    self.toast_manager.success("Planning actualisé");
                }
            }
            Err(err) => {
                log::error!("Failed to load roadtrip: {}", err);
                if silent {
                    self.toast_manager
                        .warning("Actualisation impossible, le planning affiché peut être ancien");
                } else {
                    self.alert.show(Alert::error(
                        "Chargement impossible",
                        format!("Le roadtrip n'a pas pu être chargé.\n\n{}", err),
                    ));
                }
            }
        }
    }
}
