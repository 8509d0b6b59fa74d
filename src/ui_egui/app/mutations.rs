use std::time::Duration as StdDuration;

use super::alert::Alert;
use super::state::EditSaveJob;
use super::PlannerApp;
use crate::models::planning_event::{EventDraft, EventKey};
use crate::services::api::{ApiError, ApiRequest};
use crate::services::planning::{
    shifted_range, snap_minutes, BackgroundTask, GestureOutcome, MoveError, MoveFailure,
    MoveResolution, TaskPoll,
};
use crate::ui_egui::edit_dialog::{render_edit_dialog, EditDialogAction, EditDialogState};

impl PlannerApp {
    pub(super) fn handle_gesture(&mut self, outcome: GestureOutcome) {
        match outcome {
            GestureOutcome::Tap(key) => self.open_edit_dialog(&key),
            GestureOutcome::Drop { key, dy } => self.handle_drop(&key, dy),
            GestureOutcome::Ignored => {}
        }
    }

    fn handle_drop(&mut self, key: &EventKey, dy: f32) {
        let Some(event) = self.board.find(key) else {
            log::warn!("Dropped event {} is no longer on the board", key);
            return;
        };

        let minutes = snap_minutes(
            dy,
            self.settings.hour_height,
            self.settings.drag_snap_interval,
        );
        if minutes == 0 {
            log::debug!("Drop of {} snapped to no change", key);
            return;
        }

        let (new_start, new_end) = match shifted_range(event, minutes) {
            Ok(range) => range,
            Err(out_of_day) => {
                log::warn!("Refused move of {}: {}", key, out_of_day);
                self.alert
                    .show(Alert::move_refused(&MoveError::OutOfDay(out_of_day)));
                return;
            }
        };

        match self.board.begin_move(key, new_start, new_end) {
            Ok(ticket) => self.context.worker_mut().dispatch(ticket),
            Err(err @ MoveError::InFlight(_)) => {
                log::warn!("Refused move: {}", err);
                self.toast_manager.warning(err.user_message());
            }
            Err(err) => {
                log::warn!("Refused move: {}", err);
                self.alert.show(Alert::move_refused(&err));
            }
        }
    }

    /// Apply finished moves. Should be called once per frame.
    pub(super) fn poll_mutations(&mut self, ctx: &egui::Context) {
        for done in self.context.worker_mut().poll() {
            match self.board.finish_move(&done.receipt, done.outcome) {
                MoveResolution::Confirmed(_) | MoveResolution::Stale(_) => {}
                MoveResolution::RolledBack { failure, .. } => {
                    self.alert.show(Alert::move_failed(&failure));
                }
            }
        }

        if self.context.worker().pending() > 0 {
            ctx.request_repaint_after(StdDuration::from_millis(100));
        }
    }

    fn open_edit_dialog(&mut self, key: &EventKey) {
        let Some(event) = self.board.find(key) else {
            return;
        };

        log::info!("Opening edit dialog for {}", key);
        self.state.edit_dialog = Some(EditDialogState::new(event, self.return_context()));
    }

    pub(super) fn handle_edit_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.state.edit_dialog.as_mut() else {
            return;
        };

        match render_edit_dialog(ctx, dialog) {
            EditDialogAction::None => {}
            EditDialogAction::Save(draft) => {
                dialog.saving = true;
                self.start_edit_save(draft);
            }
            EditDialogAction::Close => {
                let return_to = dialog.return_to;
                self.state.edit_dialog = None;
                self.restore_return_context(return_to);
            }
        }
    }

    fn start_edit_save(&mut self, draft: EventDraft) {
        log::info!("Saving edits of {}", draft.key);
        let request = ApiRequest::edit_event(&draft);
        let backend = self.context.backend();
        self.state.edit_save = Some(EditSaveJob {
            task: BackgroundTask::spawn(move || backend.send(&request)),
            draft,
        });
    }

    /// Poll for a completed edit save.
    pub(super) fn poll_edit_save(&mut self, ctx: &egui::Context) {
        let Some(job) = &self.state.edit_save else {
            return;
        };
        let poll = job.task.poll();

        let outcome = match poll {
            TaskPoll::Pending => {
                ctx.request_repaint_after(StdDuration::from_millis(200));
                return;
            }
            TaskPoll::Ready(outcome) => outcome,
            TaskPoll::Lost => {
                log::error!("Edit save worker disconnected unexpectedly");
                Err(ApiError::Network("save worker stopped".to_string()))
            }
        };

        let Some(job) = self.state.edit_save.take() else {
            return;
        };

        match outcome {
            Ok(()) => {
                log::info!("Saved edits of {}", job.draft.key);
                if let Some(dialog) = self.state.edit_dialog.take() {
                    self.restore_return_context(dialog.return_to);
                }
                self.toast_manager.success("Modifications enregistrées");
                // Notes and addresses are not part of the steps signature
                self.board.invalidate();
                self.start_refresh(true);
            }
            Err(err) => {
                log::warn!("Failed to save edits of {}: {}", job.draft.key, err);
                let message = match MoveFailure::from_api_error(&err) {
                    failure @ MoveFailure::MissingRouteAddress => failure.user_message(),
                    _ => format!("Les modifications n'ont pas été enregistrées.\n\n{}", err),
                };
                if let Some(dialog) = self.state.edit_dialog.as_mut() {
                    dialog.saving = false;
                    dialog.error_message = Some(message.clone());
                }
                self.alert
                    .show(Alert::error("Échec de l'enregistrement", message));
            }
        }
    }
}
