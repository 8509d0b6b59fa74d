mod app;
pub mod drag;
mod edit_dialog;
mod settings_dialog;
pub mod theme;
mod views;

pub use app::{AppContext, PlannerApp};
