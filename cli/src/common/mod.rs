//! # packit Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! Shared utilities used by the command flows in `commands::`, kept apart
//! from the configuration and error infrastructure in `core::`.
//!
//! ## Architecture
//!
//! - **`archive`**: archive formats, request types, the `Archiver` trait and
//!   the `SystemArchiver` that drives `zip`/`unzip`/`tar`.
//! - **`fs`**: file copying, directory creation, sizes, symlink handling.
//! - **`output`**: publishes `file_path` to the CI step output file.
//! - **`process`**: runs external programs and captures their output.
//! - **`system`**: finds external tools on `PATH`.
//! - **`ui`**: the human-readable run summary printed to stdout.
//!

/// Archive formats and the archiver collaborator.
pub mod archive;
/// Filesystem operations (copy, I/O, links).
pub mod fs;
/// CI step output publication.
pub mod output;
/// External process execution.
pub mod process;
/// Host inspection (tool lookup).
pub mod system;
/// Console summary output.
pub mod ui;
