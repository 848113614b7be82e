//! # packit Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! Filesystem helpers shared by the compress and decompress flows.
//!
//! - **`copy`**: copies single files into the staging area (`fs_extra`).
//! - **`io`**: directory creation, size accounting, output-file appends, path rendering.
//! - **`links`**: symlink detection and resolution, including broken links.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::{copy, io, links};
//!
//! io::ensure_dir_exists(&dest)?;
//! if !links::is_broken_symlink(&matched) {
//!     copy::copy_file(&matched, &staged)?;
//! }
//! ```
//!

/// Copies files into the staging area.
pub mod copy;
/// Directory creation, sizes, output appends and slash-separated paths.
pub mod io;
/// Symlink detection and resolution.
pub mod links;
