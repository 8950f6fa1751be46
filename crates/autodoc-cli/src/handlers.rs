//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod config;
mod generate;
mod models;
mod utils;

pub use completions::handle_completions;
pub use config::handle_config;
pub use generate::handle_generate;
pub use models::handle_models;
