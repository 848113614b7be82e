//! # Directory Walk (`commands::compress::walk`)
//!
//! File: cli/src/commands/compress/walk.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! Lists the entries of a directory tree for the archiver: directories and
//! files, in lexicographic order, symlinks followed, exclusions applied in
//! line (excluded directories are not descended into).
//!
//! Entry names are relative to the walked root and optionally prefixed with a
//! root folder name, which is how `INCLUDEROOT=true` wraps the contents:
//!
//! ```text
//! collect_entries("/work/test2", Some("test2"), ..)
//!     -> ["test2", "test2/test2.txt"]
//! collect_entries("/work/test2", None, ..)
//!     -> ["test2.txt"]
//! ```
//!
use super::exclude::ExclusionFilter;
use super::pattern::skip_or_fail;
use crate::common::fs::io;
use crate::core::error::Result;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Result of a walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkedTree {
    /// Archive entry names, parents before children.
    pub entries: Vec<String>,
    /// Number of regular files among `entries`.
    pub file_count: usize,
}

/// Walks `root` and returns the entry list.
///
/// `skip` names a file that must never be listed, normally the archive being
/// written when it lives inside the walked tree.
pub fn collect_entries(
    root: &Path,
    prefix: Option<&str>,
    exclusions: &ExclusionFilter,
    skip: Option<&Path>,
) -> Result<WalkedTree> {
    let relative = |path: &Path| -> String {
        pathdiff::diff_paths(path, root)
            .map(|rel| io::to_slash(&rel))
            .unwrap_or_default()
    };
    let named = |rel: &str| -> String {
        match prefix {
            Some(prefix) => format!("{}/{}", prefix, rel),
            None => rel.to_string(),
        }
    };

    let mut tree = WalkedTree::default();
    if let Some(prefix) = prefix {
        tree.entries.push(prefix.to_string());
    }

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !exclusions.should_exclude_dir(&relative(entry.path()))
        });

    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(err) => {
                skip_or_fail(err)?;
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }
        let rel = relative(entry.path());
        if entry.file_type().is_dir() {
            tree.entries.push(named(&rel));
        } else if entry.file_type().is_file() {
            if skip.is_some_and(|skip| entry.path() == skip) {
                debug!("Not listing the output archive {:?}", entry.path());
                continue;
            }
            if exclusions.should_exclude(&rel) {
                debug!("Excluded {}", rel);
                continue;
            }
            tree.entries.push(named(&rel));
            tree.file_count += 1;
        }
    }

    debug!(
        "Walked {:?}: {} entries, {} files",
        root,
        tree.entries.len(),
        tree.file_count
    );
    Ok(tree)
}
