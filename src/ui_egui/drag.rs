use std::time::Instant;

use egui::{Context, Id, Pos2};

use crate::models::planning_event::EventKey;
use crate::services::planning::{DragController, GestureOutcome};

/// A gesture in progress on the planning grid.
#[derive(Clone, Debug)]
pub struct DragSession {
    pub controller: DragController,
    /// Pointer position at press time
    pub origin: Pos2,
    /// Last displacement seen, used when the release happens off-window
    pub last_delta: (f32, f32),
}

impl DragSession {
    fn delta_to(&self, pos: Pos2) -> (f32, f32) {
        let delta = pos - self.origin;
        (delta.x, delta.y)
    }
}

/// Keeps the gesture of the planning grid in egui memory between frames.
pub struct DragManager;

impl DragManager {
    fn storage_id() -> Id {
        Id::new("planning_event_drag_state")
    }

    pub fn active(ctx: &Context) -> Option<DragSession> {
        ctx.memory_mut(|mem| mem.data.get_temp::<DragSession>(Self::storage_id()))
    }

    /// Offset of the event being dragged, for the ghost preview.
    pub fn drag_offset(ctx: &Context) -> Option<(EventKey, f32)> {
        Self::active(ctx).and_then(|session| {
            session
                .controller
                .drag_offset()
                .map(|(key, dy)| (key.clone(), dy))
        })
    }

    pub fn press(ctx: &Context, key: EventKey, draggable: bool, origin: Pos2) {
        let mut controller = DragController::new();
        controller.press(key, draggable, Instant::now());
        ctx.memory_mut(|mem| {
            mem.data.insert_temp(
                Self::storage_id(),
                DragSession {
                    controller,
                    origin,
                    last_delta: (0.0, 0.0),
                },
            );
        });
    }

    pub fn pointer_moved(ctx: &Context, pos: Pos2) {
        let id = Self::storage_id();
        ctx.memory_mut(|mem| {
            if let Some(mut session) = mem.data.get_temp::<DragSession>(id) {
                let delta = session.delta_to(pos);
                session.controller.pointer_moved(delta);
                session.last_delta = delta;
                mem.data.insert_temp(id, session);
            }
        });
    }

    /// Finish the gesture. `pos` is the release position if the pointer is
    /// still over the window.
    pub fn release(ctx: &Context, pos: Option<Pos2>) -> GestureOutcome {
        let id = Self::storage_id();
        ctx.memory_mut(|mem| {
            let Some(mut session) = mem.data.get_temp::<DragSession>(id) else {
                return GestureOutcome::Ignored;
            };
            mem.data.remove::<DragSession>(id);

            let delta = pos
                .map(|p| session.delta_to(p))
                .unwrap_or(session.last_delta);
            session.controller.release(delta, Instant::now())
        })
    }

    pub fn cancel(ctx: &Context) {
        ctx.memory_mut(|mem| {
            mem.data.remove::<DragSession>(Self::storage_id());
        });
    }
}
