//! # packit Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! Foundational pieces used by every command flow:
//! - `config`: parses the step inputs into an immutable `ActionConfig`
//! - `error`: the `PackitError` taxonomy and the `Result` alias
//!
//! ```rust
//! use crate::core::config::ActionConfig;
//! use crate::core::error::{PackitError, Result};
//! ```
//!
pub mod config;
pub mod error;
