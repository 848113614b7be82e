//! # packit Orchestrator (`commands`)
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! Sequences one packit run and maps its outcome to what the CI step sees:
//! the exit code and the published `file_path`.
//!
//! ## Architecture
//!
//! - **`compress`**: plain-path walk or glob expansion, staging, archiving.
//! - **`decompress`**: extraction into the destination directory.
//! - **`target`**: output naming and placement rules for both.
//!
//! A run moves through these stages, each transition logged at debug level:
//!
//! ```text
//! Init -> GlobExpand -> Filtered -> Staged -> Archived -> CleanedUp -> Done
//! Init -> DirectWalk -> Filtered -> Archived -> Done
//! Init -> Extracted -> Done
//! any  -> Failed
//! ```
//!
//! Every error is caught here. With `FAIL_ON_ERROR=true` it fails the run;
//! with `FAIL_ON_ERROR=false` it becomes a warning, `file_path` is published
//! empty and the exit code stays 0. Configuration errors never reach this
//! module: `main` rejects them before a run starts.
//!
pub mod compress;
pub mod decompress;
pub mod target;

use crate::common::archive::Archiver;
use crate::common::ui;
use crate::core::config::{ActionCommand, ActionConfig};
use crate::core::error::PackitError;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, error, warn};

/// Stages of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    GlobExpand,
    DirectWalk,
    Filtered,
    Staged,
    Archived,
    Extracted,
    CleanedUp,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Records the stages a run passes through.
#[derive(Debug)]
pub struct StageTracker {
    history: Vec<Stage>,
}

impl Default for StageTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StageTracker {
    pub fn new() -> Self {
        debug!("Stage: {}", Stage::Init);
        Self {
            history: vec![Stage::Init],
        }
    }

    pub fn enter(&mut self, next: Stage) {
        debug!("Stage: {} -> {}", self.current(), next);
        self.history.push(next);
    }

    pub fn current(&self) -> Stage {
        self.history.last().copied().unwrap_or(Stage::Init)
    }

    pub fn history(&self) -> &[Stage] {
        &self.history
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum RunStatus {
    Success,
    /// Finished with exit code 0 but something was not right.
    Warning(String),
    Failed(anyhow::Error),
}

/// Outcome of [`run`].
#[derive(Debug)]
pub struct RunReport {
    pub status: RunStatus,
    /// Archive (compress) or destination (decompress); `None` when nothing
    /// was produced.
    pub file_path: Option<PathBuf>,
    pub stages: Vec<Stage>,
}

impl RunReport {
    pub fn exit_code(&self) -> i32 {
        match self.status {
            RunStatus::Failed(_) => 1,
            RunStatus::Success | RunStatus::Warning(_) => 0,
        }
    }

    /// The value published as `file_path`; `None` means publish nothing.
    pub fn published_path(&self) -> Option<String> {
        match (&self.status, &self.file_path) {
            (RunStatus::Failed(_), _) => None,
            (_, Some(path)) => Some(path.display().to_string()),
            (_, None) => Some(String::new()),
        }
    }

    /// Prints the closing line of the run summary.
    pub fn print_outcome(&self, command: ActionCommand) {
        debug!("Stages: {}", render_stages(&self.stages));
        match &self.status {
            RunStatus::Success => {
                let path = self
                    .file_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                ui::print_success(&format!("{} completed: {}", capitalized(command), path));
            }
            RunStatus::Warning(message) => ui::print_warning(message),
            RunStatus::Failed(err) => ui::print_error(&format!("{:#}", err)),
        }
    }
}

/// # Run (`run`)
///
/// Executes the configured command against `archiver`. Never panics on
/// operational errors and never returns `Err`; the report carries the outcome.
pub fn run(config: &ActionConfig, archiver: &dyn Archiver) -> RunReport {
    let mut tracker = StageTracker::new();

    let result = match config.command {
        ActionCommand::Compress => compress::execute(config, archiver, &mut tracker)
            .map(|outcome| (outcome.archive, outcome.warning)),
        ActionCommand::Decompress => {
            decompress::execute(config, archiver, &mut tracker).map(|dest| (dest, None))
        }
    };

    let (status, file_path) = match result {
        Ok((path, warning)) => {
            tracker.enter(Stage::Done);
            let status = match warning {
                Some(message) => RunStatus::Warning(message),
                None => RunStatus::Success,
            };
            (status, Some(path))
        }
        Err(err) => {
            tracker.enter(Stage::Failed);
            (classify(err, config.fail_on_error), None)
        }
    };

    RunReport {
        status,
        file_path,
        stages: tracker.history().to_vec(),
    }
}

/// Strict mode keeps the error; lenient mode downgrades it, except for
/// configuration errors.
fn classify(err: anyhow::Error, fail_on_error: bool) -> RunStatus {
    let is_config = err
        .downcast_ref::<PackitError>()
        .is_some_and(PackitError::is_config);
    if fail_on_error || is_config {
        error!("{:#}", err);
        RunStatus::Failed(err)
    } else {
        warn!("Continuing because FAIL_ON_ERROR is false: {:#}", err);
        RunStatus::Warning(format!("{:#}", err))
    }
}

/// Prints the header and the configuration section.
pub fn print_configuration(config: &ActionConfig) {
    ui::print_header(&format!("{} Process Started", capitalized(config.command)));
    ui::print_section("Configuration");
    ui::print_item("Command", config.command);
    ui::print_item("Source", &config.source);
    ui::print_item("Format", config.format);
    ui::print_item("Workspace", config.workspace.display());
    if let Some(dest) = &config.dest {
        ui::print_item("Destination", dest.display());
    }
    if config.command == ActionCommand::Compress {
        if let Some(name) = &config.destfilename {
            ui::print_item("Archive name", name);
        }
        if !config.exclude.is_empty() {
            ui::print_item("Exclude", config.exclude.join(" "));
        }
        ui::print_item("Include root", config.include_root);
        ui::print_item("Preserve glob structure", config.preserve_glob_structure);
        if !config.strip_prefix.is_empty() {
            ui::print_item("Strip prefix", &config.strip_prefix);
        }
    }
    ui::print_item("Fail on error", config.fail_on_error);
    ui::print_item("Verbose", config.verbose);
}

fn render_stages(stages: &[Stage]) -> String {
    stages
        .iter()
        .map(Stage::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn capitalized(command: ActionCommand) -> &'static str {
    match command {
        ActionCommand::Compress => "Compression",
        ActionCommand::Decompress => "Decompression",
    }
}
