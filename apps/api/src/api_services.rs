mod database;
mod state_builder;

pub use database::{connect, run_setup};
pub use state_builder::{build_app_state, build_storage};
