//! # Path Policy (`commands::compress::policy`)
//!
//! File: cli/src/commands/compress/policy.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! Decides where each glob match lands inside the staging directory.
//!
//! - **Flatten** (`PRESERVEGLOBSTRUCTURE=false`): the file's base name.
//! - **Preserve** (`PRESERVEGLOBSTRUCTURE=true`): the relative path, with
//!   `STRIPPREFIX` removed when the path starts with it. Paths outside the
//!   prefix are kept unchanged. The prefix is ignored when flattening.
//!
//! Destinations are unique within a plan. A clash gets `_N` inserted before
//! the extension of its last segment (`x.log`, `x_1.log`, `x_2.log`),
//! assigned in match order so the numbering is reproducible.
//!
use super::pattern::MatchedFile;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::debug;

/// One match and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub source: PathBuf,
    /// Slash-separated path below the staging root.
    pub destination: String,
}

/// Ordered, collision-free placement of every match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagingPlan {
    pub files: Vec<PlannedFile>,
}

#[cfg(test)]
impl StagingPlan {
    fn destinations(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.destination.as_str())
    }
}

/// # Resolve (`resolve`)
///
/// Builds the staging plan for `matches`, which must already be in match order.
pub fn resolve(matches: &[MatchedFile], preserve_structure: bool, strip_prefix: &str) -> StagingPlan {
    let prefix = normalize_prefix(strip_prefix);
    let mut taken: HashSet<String> = HashSet::with_capacity(matches.len());
    let mut files = Vec::with_capacity(matches.len());

    for matched in matches {
        let wanted = if preserve_structure {
            strip(&matched.relative, prefix)
        } else {
            base_name(&matched.relative).to_string()
        };
        let destination = unique(&wanted, &taken);
        if destination != wanted {
            debug!("{} renamed to {} to avoid a collision", wanted, destination);
        }
        taken.insert(destination.clone());
        files.push(PlannedFile {
            source: matched.source.clone(),
            destination,
        });
    }

    StagingPlan { files }
}

fn normalize_prefix(raw: &str) -> &str {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix("./").unwrap_or(trimmed);
    trimmed.trim_end_matches('/')
}

/// Removes `prefix` when it covers whole leading segments of `relative`.
fn strip(relative: &str, prefix: &str) -> String {
    if prefix.is_empty() || relative.is_empty() {
        return relative.to_string();
    }
    match relative.strip_prefix(prefix).and_then(|rest| rest.strip_prefix('/')) {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => relative.to_string(),
    }
}

fn base_name(relative: &str) -> &str {
    relative.rsplit('/').next().unwrap_or(relative)
}

fn unique(wanted: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(wanted) {
        return wanted.to_string();
    }
    (1..)
        .map(|n| with_suffix(wanted, n))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| wanted.to_string())
}

/// `dir/name.ext` -> `dir/name_N.ext`; a leading dot does not start an extension.
fn with_suffix(path: &str, n: usize) -> String {
    let (dir, name) = match path.rfind('/') {
        Some(idx) => path.split_at(idx + 1),
        None => ("", path),
    };
    match name.rfind('.') {
        Some(dot) if dot > 0 => format!("{}{}_{}{}", dir, &name[..dot], n, &name[dot..]),
        _ => format!("{}{}_{}", dir, name, n),
    }
}
