//! # packit Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! Small wrappers around `std::fs` used across packit:
//! - **`ensure_dir_exists`**: `mkdir -p` that refuses to treat a file as a directory.
//! - **`path_size`**: byte size of a file, or the recursive total of a directory.
//! - **`format_size`**: human-readable sizes ("1.50 KB") for the results sections.
//! - **`append_line`**: appends one line to a file, creating it if needed
//!   (used to publish outputs to `GITHUB_OUTPUT`).
//! - **`to_slash`**: renders a relative path with `/` separators.
//!
use crate::core::error::{PackitError, Result};
use anyhow::Context;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Component, Path};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Ensures that a directory exists at `path`, creating parents as needed.
///
/// # Errors
///
/// - The path exists but is not a directory (`PackitError::FileSystem`).
/// - Creating the directory fails.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(PackitError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Size in bytes of a file, or the sum of all files below a directory.
///
/// Symlinks are followed; unreadable entries are skipped rather than failing
/// the whole measurement, since the number only feeds the results summary.
pub fn path_size(path: &Path) -> u64 {
    if path.is_file() {
        return fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    }
    WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|meta| meta.len())
        .sum()
}

/// Formats a byte count with two decimals and a binary unit (B, KB, MB, GB, TB).
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    for unit in &UNITS[..UNITS.len() - 1] {
        if size < 1024.0 {
            return format!("{:.2} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.2} {}", size, UNITS[UNITS.len() - 1])
}

/// Appends `line` plus a newline to `path`, creating the file if missing.
pub fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {:?} for appending", path))?;
    writeln!(file, "{}", line).with_context(|| format!("Failed to write to {:?}", path))?;
    Ok(())
}

/// Joins the normal components of a relative path with `/`.
///
/// `.` components are dropped, so `./a/b.txt` becomes `a/b.txt`.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
