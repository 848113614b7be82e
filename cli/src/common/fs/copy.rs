//! # packit Filesystem Copy Operations
//!
//! File: cli/src/common/fs/copy.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! Copies single files into the staging area. Files are always copied, never
//! moved, so the workspace a CI step archives is left untouched.
//!
//! The copy is delegated to `fs_extra`, with overwrite enabled; the parent
//! directory of the target is created first.
//!
use crate::common::fs::io::ensure_dir_exists;
use crate::core::error::Result;
use std::path::Path;
use tracing::debug;

/// Copies the bytes of `source` to `target`, creating `target`'s parents.
///
/// Returns the number of bytes copied.
///
/// # Errors
///
/// Returns an `Err` if the parent directory cannot be created or the copy
/// itself fails (missing source, permissions, I/O).
pub fn copy_file(source: &Path, target: &Path) -> Result<u64> {
    if let Some(parent) = target.parent() {
        ensure_dir_exists(parent)?;
    }

    let mut options = fs_extra::file::CopyOptions::new();
    options.overwrite = true;

    let bytes = fs_extra::file::copy(source, target, &options).map_err(|e| {
        anyhow::anyhow!(e).context(format!("Failed to copy {:?} to {:?}", source, target))
    })?;
    debug!("Copied {:?} -> {:?} ({} bytes)", source, target, bytes);
    Ok(bytes)
}
