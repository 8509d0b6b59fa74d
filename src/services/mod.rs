// Service module exports

pub mod api;
pub mod config;
pub mod database;
pub mod planning;
pub mod settings;
