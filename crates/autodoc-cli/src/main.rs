//! Autodoc CLI - Markdown API documentation from model manifests
//!
//! This is the main entry point for the autodoc CLI application, providing
//! commands for rendering a manifest into a Markdown document and for
//! inspecting single model tables.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;
use tracing_appender::non_blocking::WorkerGuard;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Set up colored output
    control::set_override(cli.use_color());

    let code = match run(cli) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{}", error::format_error(&e, control::SHOULD_COLORIZE.should_colorize()));

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            e.exit_code()
        }
    };

    process::exit(code);
}

/// Main application logic
fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let config = Config::load_with_file(cli.config.as_deref())?;

    // The guard flushes the log file; it must outlive the command
    let _guard = init_logging(&cli, &config);

    execute(cli, &config)
}

#[instrument(skip_all, fields(command = ?cli.command))]
fn execute(cli: Cli, config: &Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let use_color = cli.use_color() && config.output.color;
    control::set_override(use_color);

    // Create output writer
    let mut output = OutputWriter::new(use_color, cli.quiet, cli.verbosity_level());

    tracing::info!(
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    // Handle the subcommand
    match cli.command {
        Commands::Generate(args) => handlers::handle_generate(args, config, &mut output),
        Commands::Models(args) => handlers::handle_models(args, config, &mut output),
        Commands::Config(args) => handlers::handle_config(args, config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Option<WorkerGuard> {
    // Create logging configuration from CLI args, config file and environment
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.merge_with_file(&config.logging, cli.verbosity_level());
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    match logging::init_logging(logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["autodoc", "models", "api.yaml", "User"]);
        assert_eq!(cli.verbosity_level(), 0);

        let cli = Cli::parse_from(["autodoc", "-vv", "generate", "api.yaml"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["autodoc", "--quiet", "generate", "api.yaml"]);
        assert_eq!(cli.verbosity_level(), 0);
    }
}
