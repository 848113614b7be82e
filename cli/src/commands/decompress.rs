//! # packit Decompress Flow (`commands::decompress`)
//!
//! File: cli/src/commands/decompress.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! Extracts the archive named by `SOURCE` into `DEST` (or the workspace).
//! There is no staging phase: the archive is handed straight to the archiver,
//! which overwrites files that already exist at the destination.
//!
//! After extraction the results section lists the archive size, the time
//! taken and the top-level entries of the destination:
//!
//! ```text
//! 📋 Decompression Results:
//!   • Archive size: 184.00 B
//!   • Duration: 0.01s
//!   • test2/ (directory)
//! ```
//!
use super::target;
use super::{Stage, StageTracker};
use crate::common::archive::{Archiver, ExtractionRequest};
use crate::common::fs::io;
use crate::common::ui;
use crate::core::config::ActionConfig;
use crate::core::error::{PackitError, Result};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Extracts the configured archive and returns the destination directory.
///
/// # Errors
///
/// - `PackitError::SourceNotFound` when the archive does not exist.
/// - Destination creation and archiver failures.
pub fn execute(
    config: &ActionConfig,
    archiver: &dyn Archiver,
    tracker: &mut StageTracker,
) -> Result<PathBuf> {
    let started = Instant::now();
    let archive = config.resolve(&config.source);
    if !archive.is_file() {
        return Err(PackitError::SourceNotFound { path: archive }.into());
    }

    let destination = target::resolve_extract_target(config)?;
    info!("Extracting {:?} to {:?}", archive, destination);
    archiver.extract(&ExtractionRequest {
        format: config.format,
        archive: archive.clone(),
        destination: destination.clone(),
    })?;
    tracker.enter(Stage::Extracted);

    print_results(&archive, &destination, started.elapsed());
    Ok(destination)
}

/// The extraction already succeeded; a listing failure is only reported.
fn print_results(archive: &Path, destination: &Path, elapsed: Duration) {
    ui::print_section("Decompression Results");
    ui::print_item("Archive size", io::format_size(io::path_size(archive)));
    ui::print_item("Duration", format!("{:.2}s", elapsed.as_secs_f64()));
    match list_top_level(destination) {
        Ok(lines) => lines.iter().for_each(|line| println!("{}", line)),
        Err(err) => warn!("Could not list the extracted contents: {:#}", err),
    }
}

/// One line per top-level entry of `dir`, sorted by name.
fn list_top_level(dir: &Path) -> Result<Vec<String>> {
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to list {:?}", dir))?
        .filter_map(|entry| entry.ok())
        .collect::<Vec<_>>();
    entries.sort_by_key(|entry| entry.file_name());
    debug!("{:?} holds {} top-level entries", dir, entries.len());

    Ok(entries
        .iter()
        .map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            let path = entry.path();
            if path.is_dir() {
                ui::render_bullet(&format!("{}/ (directory)", name))
            } else {
                ui::render_item(&name, io::format_size(io::path_size(&path)))
            }
        })
        .collect())
}
