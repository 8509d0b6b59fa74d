pub mod gesture;
pub mod layout;
pub mod mutation;
pub mod projector;
pub mod worker;

pub use gesture::{shifted_range, snap_minutes, DragController, GestureOutcome, OutOfDay};
pub use layout::{bucket_by_day, EventBox, GridMetrics, PlanningWindow};
pub use mutation::{MoveError, MoveFailure, MoveResolution, MoveTicket, PlanningBoard};
pub use projector::{project_events, EventProjector, StepsSignature};
pub use worker::{BackgroundTask, CompletedMove, MutationWorker, TaskPoll};
