//! # Staging Area (`commands::compress::staging`)
//!
//! File: cli/src/commands/compress/staging.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! Materializes a [`StagingPlan`] in a fresh temporary directory so the
//! archiver sees exactly the layout the path policy decided on.
//!
//! ```text
//! /tmp/packit-staging-Xa9c2/      <- path()
//! └── logs/                       <- root(), named after the archive
//!     ├── x.log
//!     └── x_1.log
//! ```
//!
//! ## Lifetime
//!
//! The directory is owned by the [`StagingArea`] value. `teardown` removes it
//! and reports failures; if the value is dropped instead (early return,
//! archiver error, panic unwinding), `tempfile` removes it on drop. Either way
//! it is removed exactly once.
//!
use super::policy::StagingPlan;
use crate::common::fs::copy;
use crate::core::error::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};

const STAGING_PREFIX: &str = "packit-staging-";

/// A populated staging directory.
#[derive(Debug)]
pub struct StagingArea {
    dir: Option<TempDir>,
    path: PathBuf,
    root_name: String,
    staged: usize,
}

impl StagingArea {
    /// Creates a unique temporary directory and copies every planned file to
    /// `<tmp>/<root_name>/<destination>`.
    ///
    /// Files that vanished or turned into broken links since matching are
    /// skipped with a warning.
    ///
    /// # Errors
    ///
    /// Creating the directory or copying a file fails. The partial directory
    /// is removed before the error is returned.
    pub fn build(plan: &StagingPlan, root_name: &str) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir()
            .context("Failed to create staging directory")?;
        let path = dir.path().to_path_buf();
        let root = path.join(root_name);
        std::fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create staging root {:?}", root))?;
        debug!("Staging {} files in {:?}", plan.files.len(), root);

        let mut staged = 0;
        for file in &plan.files {
            if !file.source.is_file() {
                warn!("Skipping {:?}: no longer a regular file", file.source);
                continue;
            }
            let target = root.join(&file.destination);
            copy::copy_file(&file.source, &target)?;
            staged += 1;
        }

        Ok(Self {
            dir: Some(dir),
            path,
            root_name: root_name.to_string(),
            staged,
        })
    }

    /// The temporary directory itself.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The folder holding the staged files.
    pub fn root(&self) -> PathBuf {
        self.path.join(&self.root_name)
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    /// Number of files actually copied.
    pub fn staged(&self) -> usize {
        self.staged
    }

    /// Removes the staging directory.
    ///
    /// # Errors
    ///
    /// The directory could not be removed completely.
    pub fn teardown(mut self) -> Result<()> {
        match self.dir.take() {
            Some(dir) => {
                debug!("Removing staging directory {:?}", self.path);
                dir.close()
                    .with_context(|| format!("Failed to remove staging directory {:?}", self.path))
            }
            None => Ok(()),
        }
    }
}

impl Drop for StagingArea {
    fn drop(&mut self) {
        if self.dir.is_some() {
            debug!("Staging directory {:?} released on drop", self.path);
        }
    }
}
