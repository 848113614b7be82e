//! # packit Symlink Helpers
//!
//! File: cli/src/common/fs/links.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! Build tools (Bazel, Buck, ...) leave output trees full of symbolic links
//! whose real files live elsewhere. packit follows those links when it
//! collects files, so it needs to tell a link apart from its target, resolve
//! it to a real path, and recognise broken links so they can be skipped with
//! a warning instead of failing the run.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// Whether `path` itself is a symbolic link (the link is not followed).
pub fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|meta| meta.file_type().is_symlink())
        .unwrap_or(false)
}

/// Whether `path` is a symbolic link whose target does not exist.
pub fn is_broken_symlink(path: &Path) -> bool {
    is_symlink(path) && fs::metadata(path).is_err()
}

/// Resolves `path` to its canonical location, following every link on the way.
///
/// # Errors
///
/// Fails when the path (or a link target along it) does not exist.
pub fn resolve_real_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("Failed to resolve real path of {:?}", path))
}
