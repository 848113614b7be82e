//! # packit Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! This file serves as the main entry point for packit, the compress and
//! decompress step of a CI pipeline. It handles:
//! - Reading the step inputs (flags or environment variables) using Clap
//! - Setting up the logging system based on `VERBOSE`
//! - Handing the validated configuration to the orchestrator
//! - Publishing `file_path` and choosing the exit code
//!
//! ## Examples
//!
//! As a CI step, inputs come from the environment:
//!
//! ```bash
//! COMMAND=compress SOURCE=test2 FORMAT=zip packit
//! COMMAND=decompress SOURCE=test2.zip FORMAT=zip DEST=out packit
//! ```
//!
//! Locally, the same inputs are available as flags:
//!
//! ```bash
//! packit --command compress --source 'build/**/*.log' --format tgz --verbose true
//! ```
//!
//! Processing flow:
//! 1. Parse inputs via Clap
//! 2. Configure logging
//! 3. Validate the configuration (invalid input always exits 1)
//! 4. Run, print the outcome, publish `file_path`, exit
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Compress/decompress flows and the orchestrator.
mod common; // Shared utilities (archive tools, fs, process, ui, ...)
mod core; // Core infrastructure (errors, config)

use crate::common::archive::SystemArchiver;
use crate::common::{output, ui};
use crate::core::config::{self, ActionArgs, ActionConfig};

/// Defines the command-line surface using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "packit",
    about = "📦 packit: compress and decompress paths, files and glob patterns in CI",
    long_about = "Archives a directory, file or glob pattern (zip, tar, tgz, tbz2), or extracts\n\
                  an archive. Every option can also be given as an environment variable.",
    version
)]
struct Cli {
    #[command(flatten)]
    action: ActionArgs,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if config::verbose_hint(&cli.action) {
        "debug"
    } else {
        "info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let config = match ActionConfig::from_env_args(&cli.action) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {:?}", e);
            ui::print_error(&format!("{:#}", e));
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    commands::print_configuration(&config);
    let report = commands::run(&config, &SystemArchiver::new());
    report.print_outcome(config.command);

    if let Some(value) = report.published_path() {
        if let Err(e) = output::publish(
            config.output_file.as_deref(),
            output::FILE_PATH_KEY,
            &value,
        ) {
            tracing::error!("Failed to publish {}: {:#}", output::FILE_PATH_KEY, e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }

    std::process::exit(report.exit_code());
}
