//! # packit Archive Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! The boundary between packit's path logic and the OS archive tools. packit
//! never implements a compression algorithm itself; it hands a fully resolved
//! request to an [`Archiver`] and gets success or an error back.
//!
//! ## Architecture
//!
//! - **`format`**: the `ArchiveFormat` enum (zip, tar, tgz, tbz2).
//! - **`system`**: `SystemArchiver`, which drives `zip`/`unzip`/`tar` as child
//!   processes, plus the pure functions that build their command lines.
//! - This module: the request types and the `Archiver` trait that the
//!   orchestrator depends on, so tests can swap in a recording fake.
//!
//! ## Usage
//!
//! ```rust
//! let request = ArchiveRequest {
//!     format: ArchiveFormat::Zip,
//!     output: PathBuf::from("/work/test2.zip"),
//!     working_dir: PathBuf::from("/work"),
//!     entries: vec!["test2".into(), "test2/test2.txt".into()],
//! };
//! SystemArchiver::new().compress(&request)?;
//! ```
//!
use crate::core::error::Result;
use std::path::PathBuf;

pub mod format;
pub mod system;

pub use format::ArchiveFormat;
pub use system::SystemArchiver;

/// Description of one compression job.
///
/// `entries` are relative to `working_dir` and already reflect exclusion,
/// staging and root-inclusion decisions; the archiver adds them verbatim and
/// does not recurse into directories on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRequest {
    pub format: ArchiveFormat,
    pub output: PathBuf,
    pub working_dir: PathBuf,
    pub entries: Vec<String>,
}

/// Description of one extraction job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub format: ArchiveFormat,
    pub archive: PathBuf,
    pub destination: PathBuf,
}

/// The capability that produces and consumes archive files.
pub trait Archiver {
    fn compress(&self, request: &ArchiveRequest) -> Result<()>;
    fn extract(&self, request: &ExtractionRequest) -> Result<()>;
}
