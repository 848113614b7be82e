//! # Pattern Matcher (`commands::compress::pattern`)
//!
//! File: cli/src/commands/compress/pattern.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! Expands a glob source into the ordered list of files it selects.
//!
//! ## Architecture
//!
//! 1. The pattern is split into its literal directory prefix and wildcard
//!    remainder; only the prefix directory is walked.
//! 2. The remainder is compiled with `globset` (`*` within one segment, `**`
//!    across directories, `{a,b}` alternatives) and matched against each
//!    file's path relative to the walk root.
//! 3. Symlinks are followed, so build-tool output trees whose real files live
//!    elsewhere are matched. Broken links and link loops are skipped with a
//!    warning.
//! 4. Excluded directories are pruned, excluded files dropped. So is the file
//!    the archive is about to be written to, which would otherwise be picked
//!    up by the next run.
//! 5. Matches are sorted by relative path and de-duplicated by real path,
//!    keeping the first occurrence. The result is a point-in-time snapshot.
//!
//! Relative paths are reported against the matching base: the workspace for
//! relative patterns and for absolute patterns inside it, otherwise the
//! pattern's literal prefix.
//!
use super::exclude::ExclusionFilter;
use super::source::split_literal_prefix;
use crate::common::fs::{io, links};
use crate::core::error::{PackitError, Result};
use anyhow::Context;
use globset::GlobBuilder;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// One file selected for inclusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedFile {
    /// Absolute path as found during the walk (may go through symlinks).
    pub source: PathBuf,
    /// Slash-separated path relative to the matching base.
    pub relative: String,
    pub is_symlink: bool,
    /// Canonical location of the bytes, after following links.
    pub real_path: PathBuf,
}

/// # Match Pattern (`match_pattern`)
///
/// Expands `pattern` against `base_dir`, applying `exclusions`. A file whose
/// real path equals `skip` is never matched.
///
/// ## Errors
///
/// - `PackitError::InvalidPattern` when the glob does not compile.
/// - `PackitError::NoMatch` when nothing matches (including a literal prefix
///   directory that does not exist).
/// - I/O errors other than broken links and loops met during the walk.
pub fn match_pattern(
    pattern: &str,
    base_dir: &Path,
    exclusions: &ExclusionFilter,
    skip: Option<&Path>,
) -> Result<Vec<MatchedFile>> {
    let (prefix, remainder) = split_literal_prefix(pattern);
    let walk_root = base_dir.join(&prefix);
    let match_base = if prefix.is_absolute() && !walk_root.starts_with(base_dir) {
        walk_root.clone()
    } else {
        base_dir.to_path_buf()
    };
    debug!(
        "Expanding '{}' under {:?} (relative to {:?})",
        remainder, walk_root, match_base
    );

    let glob = GlobBuilder::new(&remainder)
        .literal_separator(true)
        .build()
        .map_err(|source| PackitError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?
        .compile_matcher();

    if !walk_root.is_dir() {
        debug!("Pattern root {:?} is not a directory", walk_root);
        return Err(PackitError::NoMatch {
            pattern: pattern.to_string(),
        }
        .into());
    }

    let relative_to = |path: &Path, base: &Path| -> String {
        pathdiff::diff_paths(path, base)
            .map(|rel| io::to_slash(&rel))
            .unwrap_or_default()
    };

    let walker = WalkDir::new(&walk_root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !exclusions.should_exclude_dir(&relative_to(entry.path(), &match_base))
        });

    let mut matches = Vec::new();
    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(err) => {
                skip_or_fail(err)?;
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let within_root = relative_to(entry.path(), &walk_root);
        if !glob.is_match(&within_root) {
            continue;
        }
        let relative = relative_to(entry.path(), &match_base);
        if exclusions.should_exclude(&relative) {
            debug!("Excluded {}", relative);
            continue;
        }

        let real_path = links::resolve_real_path(entry.path())?;
        if skip == Some(real_path.as_path()) {
            debug!("Skipping {} (the output archive)", relative);
            continue;
        }
        let is_symlink = entry.path_is_symlink();
        if is_symlink {
            debug!("{} -> {:?}", relative, real_path);
        }
        matches.push(MatchedFile {
            source: entry.path().to_path_buf(),
            relative,
            is_symlink,
            real_path,
        });
    }

    matches.sort_by(|a, b| a.relative.cmp(&b.relative));
    let mut seen = HashSet::new();
    matches.retain(|m| {
        let first = seen.insert(m.real_path.clone());
        if !first {
            debug!("Dropping {} (same file as an earlier match)", m.relative);
        }
        first
    });

    if matches.is_empty() {
        return Err(PackitError::NoMatch {
            pattern: pattern.to_string(),
        }
        .into());
    }
    debug!("Pattern '{}' matched {} files", pattern, matches.len());
    Ok(matches)
}

/// Broken symlinks and link loops are warnings; anything else is fatal.
pub(crate) fn skip_or_fail(err: walkdir::Error) -> Result<()> {
    if let Some(ancestor) = err.loop_ancestor() {
        warn!(
            "Skipping symlink loop at {:?} (points back to {:?})",
            err.path().unwrap_or_else(|| Path::new("?")),
            ancestor
        );
        return Ok(());
    }
    if let Some(path) = err.path() {
        if links::is_broken_symlink(path) {
            warn!("Skipping broken symlink {:?}", path);
            return Ok(());
        }
    }
    Err(err).context("Failed while walking the source tree")
}
