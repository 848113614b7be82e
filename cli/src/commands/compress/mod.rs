//! # packit Compress Flow (`commands::compress`)
//!
//! File: cli/src/commands/compress/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! Turns `SOURCE` into an archive. Two paths lead to the archiver:
//!
//! - **Plain path** (directory or file): the tree is walked in place with
//!   exclusions applied in line. Nothing is copied.
//! - **Glob pattern**: matches are expanded, placed by the path policy and
//!   copied into a temporary staging directory, which is archived and then
//!   removed whether or not the archiver succeeded.
//!
//! ## Architecture
//!
//! - **`source`**: classifies `SOURCE` as plain path or glob.
//! - **`exclude`**: the `EXCLUDE` token filter shared by both paths.
//! - **`pattern`**: glob expansion (`**`, `{a,b}`, symlink following).
//! - **`policy`**: flatten/preserve/strip-prefix placement with collision suffixes.
//! - **`staging`**: the self-cleaning staging directory.
//! - **`walk`**: entry listing for plain directories and staged trees.
//!
//! Output placement and naming live in `commands::target`.
//!
pub mod exclude;
pub mod pattern;
pub mod policy;
pub mod source;
pub mod staging;
pub mod walk;

use self::exclude::ExclusionFilter;
use self::source::SourceSpec;
use self::staging::StagingArea;
use super::target::{self, CompressTarget, SourceShape};
use super::{Stage, StageTracker};
use crate::common::archive::{ArchiveRequest, Archiver};
use crate::common::fs::io;
use crate::common::ui;
use crate::core::config::ActionConfig;
use crate::core::error::{PackitError, Result};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// What a successful compression produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressOutcome {
    pub archive: PathBuf,
    pub original_size: u64,
    /// Set when the run succeeded but archived no files.
    pub warning: Option<String>,
}

/// # Execute Compression (`execute`)
///
/// Runs the compress flow for `config` and prints the results section.
///
/// ## Errors
///
/// - `PackitError::SourceNotFound` for a plain source that does not exist.
/// - `PackitError::NoMatch` for a glob that selects nothing.
/// - `PackitError::InvalidPattern` for a glob or exclude token that does not compile.
/// - Archiver and filesystem failures.
pub fn execute(
    config: &ActionConfig,
    archiver: &dyn Archiver,
    tracker: &mut StageTracker,
) -> Result<CompressOutcome> {
    let started = Instant::now();
    let spec = SourceSpec::parse(&config.source, &config.workspace);
    let exclusions = ExclusionFilter::new(&config.exclude)?;
    if !exclusions.is_empty() {
        info!("Excluding: {}", config.exclude.join(" "));
    }

    let outcome = if spec.is_glob() {
        compress_glob(config, &spec, &exclusions, archiver, tracker)?
    } else {
        compress_path(config, &spec, &exclusions, archiver, tracker)?
    };

    print_results(&outcome, started.elapsed());
    Ok(outcome)
}

fn compress_path(
    config: &ActionConfig,
    spec: &SourceSpec,
    exclusions: &ExclusionFilter,
    archiver: &dyn Archiver,
    tracker: &mut StageTracker,
) -> Result<CompressOutcome> {
    tracker.enter(Stage::DirectWalk);
    let raw = spec.path();
    if !raw.exists() {
        return Err(PackitError::SourceNotFound { path: raw }.into());
    }
    let path = fs::canonicalize(&raw).with_context(|| format!("Failed to resolve {:?}", raw))?;

    let (target, working_dir, entries, file_count) = if path.is_dir() {
        let target = target::resolve_compress_target(config, &SourceShape::Directory(path.clone()))?;
        refuse_overwriting_source(&target, &path)?;
        let archive = target.prepare()?;
        let skip = canonical_archive_path(&target, &archive);
        let (working_dir, prefix) = if config.include_root {
            (parent_dir(&path), Some(target.root_name.as_str()))
        } else {
            (path.clone(), None)
        };
        let tree = walk::collect_entries(&path, prefix, exclusions, Some(&skip))?;
        (target, working_dir, tree.entries, tree.file_count)
    } else {
        let target = target::resolve_compress_target(config, &SourceShape::File(path.clone()))?;
        refuse_overwriting_source(&target, &path)?;
        target.prepare()?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let entries = if exclusions.should_exclude(&name) {
            debug!("Excluded {}", name);
            Vec::new()
        } else {
            vec![name]
        };
        let count = entries.len();
        (target, parent_dir(&path), entries, count)
    };
    tracker.enter(Stage::Filtered);

    let warning = (file_count == 0).then(|| {
        let message = format!("Source {:?} contains no files; creating an empty archive", path);
        warn!("{}", message);
        message
    });

    let archive = target.archive_path();
    archiver.compress(&ArchiveRequest {
        format: config.format,
        output: archive.clone(),
        working_dir,
        entries,
    })?;
    tracker.enter(Stage::Archived);

    Ok(CompressOutcome {
        archive,
        original_size: io::path_size(&path),
        warning,
    })
}

fn compress_glob(
    config: &ActionConfig,
    spec: &SourceSpec,
    exclusions: &ExclusionFilter,
    archiver: &dyn Archiver,
    tracker: &mut StageTracker,
) -> Result<CompressOutcome> {
    tracker.enter(Stage::GlobExpand);
    let target = target::resolve_compress_target(
        config,
        &SourceShape::Glob {
            literal_dir: spec.literal_dir_name(),
        },
    )?;
    let skip = canonical_archive_path(&target, &target.archive_path());
    let matches = pattern::match_pattern(&spec.raw, &spec.base_dir, exclusions, Some(&skip))?;
    info!("Pattern '{}' matched {} files", spec.raw, matches.len());
    tracker.enter(Stage::Filtered);

    if !config.preserve_glob_structure && !config.strip_prefix.is_empty() {
        debug!("STRIPPREFIX is ignored when the glob structure is flattened");
    }
    let plan = policy::resolve(&matches, config.preserve_glob_structure, &config.strip_prefix);

    let staging = ensure_staged(StagingArea::build(&plan, &target.root_name)?, &spec.raw)?;
    tracker.enter(Stage::Staged);

    // The staging directory is released on drop if anything below bails.
    let archived = archive_staged(config, &target, &staging, archiver);
    if archived.is_ok() {
        tracker.enter(Stage::Archived);
    }
    let original_size = io::path_size(&staging.root());

    tracker.enter(Stage::CleanedUp);
    let cleanup = staging.teardown();
    let archive = archived?;
    if let Err(err) = cleanup {
        warn!("{:#}", err);
    }

    Ok(CompressOutcome {
        archive,
        original_size,
        warning: None,
    })
}

fn archive_staged(
    config: &ActionConfig,
    target: &CompressTarget,
    staging: &StagingArea,
    archiver: &dyn Archiver,
) -> Result<PathBuf> {
    let archive = target.prepare()?;
    let root = staging.root();
    let (working_dir, prefix) = if config.include_root {
        (staging.path().to_path_buf(), Some(staging.root_name()))
    } else {
        (root.clone(), None)
    };
    let tree = walk::collect_entries(&root, prefix, &ExclusionFilter::default(), None)?;
    archiver.compress(&ArchiveRequest {
        format: config.format,
        output: archive.clone(),
        working_dir,
        entries: tree.entries,
    })?;
    Ok(archive)
}

/// Hands `staging` back when at least one file made it in. Otherwise every
/// match vanished after the walk: the area is removed and the pattern is
/// reported as matching nothing.
fn ensure_staged(staging: StagingArea, pattern: &str) -> Result<StagingArea> {
    if staging.staged() > 0 {
        return Ok(staging);
    }
    warn!("Every file matched by '{}' disappeared before staging", pattern);
    if let Err(err) = staging.teardown() {
        warn!("{:#}", err);
    }
    Err(PackitError::NoMatch {
        pattern: pattern.to_string(),
    }
    .into())
}

/// Writing the archive must never replace the source being archived.
fn refuse_overwriting_source(target: &CompressTarget, source: &Path) -> Result<()> {
    let archive = canonical_archive_path(target, &target.archive_path());
    if archive == source {
        return Err(PackitError::FileSystem(format!(
            "Archive {:?} is the source itself; choose another DEST or DESTFILENAME",
            archive
        ))
        .into());
    }
    Ok(())
}

/// The archive path as the walker will see it (through canonical parents).
fn canonical_archive_path(target: &CompressTarget, archive: &Path) -> PathBuf {
    fs::canonicalize(&target.output_dir)
        .map(|dir| dir.join(&target.file_name))
        .unwrap_or_else(|_| archive.to_path_buf())
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| path.to_path_buf())
}

fn print_results(outcome: &CompressOutcome, elapsed: Duration) {
    let archive_size = io::path_size(&outcome.archive);
    ui::print_section("Compression Results");
    ui::print_item("Archive", outcome.archive.display());
    ui::print_item("Original size", io::format_size(outcome.original_size));
    ui::print_item("Archive size", io::format_size(archive_size));
    if outcome.original_size > 0 {
        let ratio = (1.0 - archive_size as f64 / outcome.original_size as f64) * 100.0;
        ui::print_item("Compression ratio", format!("{:.2}%", ratio));
    }
    ui::print_item("Duration", format!("{:.2}s", elapsed.as_secs_f64()));
}
