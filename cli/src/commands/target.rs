//! # Archive Targets (`commands::target`)
//!
//! File: cli/src/commands/target.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! Works out where an archive is written and where one is extracted to.
//!
//! ## Compression rules
//!
//! 1. The root name comes from the source: a directory's name, a file's stem,
//!    a glob's deepest literal directory, or `GLOBARCHIVENAME` for a glob with
//!    no literal directory. It names the folder that wraps the archive
//!    contents when `INCLUDEROOT=true`.
//! 2. `DESTFILENAME` overrides the archive name. The format extension is
//!    appended unless the name already ends with it (case-insensitive).
//! 3. `DEST` is the output directory when given. Otherwise:
//!
//! | Source    | `INCLUDEROOT` | Output directory          |
//! |-----------|---------------|---------------------------|
//! | directory | `true`        | the directory's parent    |
//! | directory | `false`       | the directory itself      |
//! | file      | either        | the file's parent         |
//! | glob      | either        | the workspace             |
//!
//! ## Extraction
//!
//! `DEST` when given, otherwise the workspace. Existing contents are left in
//! place; the archiver overwrites clashing files.
//!
use crate::common::archive::ArchiveFormat;
use crate::common::fs::io;
use crate::core::config::ActionConfig;
use crate::core::error::{PackitError, Result};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What the compress flow is archiving, after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceShape {
    Directory(PathBuf),
    File(PathBuf),
    Glob { literal_dir: Option<String> },
}

/// Where and under which name an archive is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressTarget {
    pub output_dir: PathBuf,
    /// Archive file name including the extension.
    pub file_name: String,
    /// Source-derived name; the wrapping folder when the root is included.
    pub root_name: String,
}

impl CompressTarget {
    pub fn archive_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }

    /// Creates the output directory and removes an archive left by an
    /// earlier run, so tools that update in place start from scratch.
    pub fn prepare(&self) -> Result<PathBuf> {
        io::ensure_dir_exists(&self.output_dir)?;
        let path = self.archive_path();
        if path.is_file() {
            info!("Removing existing archive {:?}", path);
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove existing archive {:?}", path))?;
        }
        Ok(path)
    }
}

/// # Resolve Compress Target (`resolve_compress_target`)
///
/// Applies the compression rules above to `source`.
///
/// ## Errors
///
/// `PackitError::FileSystem` when no name can be derived from the source
/// (the filesystem root, for instance).
pub fn resolve_compress_target(config: &ActionConfig, source: &SourceShape) -> Result<CompressTarget> {
    let root_name = match source {
        SourceShape::Directory(dir) => name_of(dir, false)?,
        SourceShape::File(file) => name_of(file, true)?,
        SourceShape::Glob { literal_dir } => literal_dir
            .clone()
            .unwrap_or_else(|| config.glob_archive_name.clone()),
    };

    let file_name = archive_file_name(
        config.destfilename.as_deref().unwrap_or(&root_name),
        config.format,
    );

    let output_dir = match (&config.dest, source) {
        (Some(dest), _) => dest.clone(),
        (None, SourceShape::Directory(dir)) if config.include_root => parent_of(dir),
        (None, SourceShape::Directory(dir)) => dir.clone(),
        (None, SourceShape::File(file)) => parent_of(file),
        (None, SourceShape::Glob { .. }) => config.workspace.clone(),
    };

    let target = CompressTarget {
        output_dir,
        file_name,
        root_name,
    };
    debug!("Compress target: {:?}", target);
    Ok(target)
}

/// Appends the format extension unless `name` already carries it.
pub fn archive_file_name(name: &str, format: ArchiveFormat) -> String {
    let extension = format.extension();
    if name.to_ascii_lowercase().ends_with(extension) {
        name.to_string()
    } else {
        format!("{}{}", name, extension)
    }
}

/// # Resolve Extract Target (`resolve_extract_target`)
///
/// The extraction directory, created if missing.
pub fn resolve_extract_target(config: &ActionConfig) -> Result<PathBuf> {
    let destination = config
        .dest
        .clone()
        .unwrap_or_else(|| config.workspace.clone());
    io::ensure_dir_exists(&destination)?;
    debug!("Extract target: {:?}", destination);
    Ok(destination)
}

fn name_of(path: &Path, stem: bool) -> Result<String> {
    let name = if stem { path.file_stem() } else { path.file_name() };
    name.map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| {
            PackitError::FileSystem(format!("Cannot derive an archive name from {:?}", path)).into()
        })
}

fn parent_of(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| path.to_path_buf())
}
