// Module exports for models

pub mod config;
pub mod planning_event;
pub mod settings;
pub mod step;
