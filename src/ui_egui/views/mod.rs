mod event_card;
pub(crate) mod palette;
pub mod planning_view;
mod time_grid;
mod utils;

pub use planning_view::{PlanningView, PlanningViewConfig};
