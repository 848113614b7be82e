//! # packit UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! Human-facing console output for the CI log. Diagnostics go through
//! `tracing` to stderr; this module prints the readable run summary to stdout:
//!
//! ```text
//! ==================================================
//! 🚀 Compress/Decompress Action
//! ==================================================
//!
//! 📋 Configuration:
//!   • Command: compress
//!   • Source: test2
//! ✅ Created /work/test2.zip
//! ```
//!
//! Every printer has a `render_*` twin returning the string, which keeps the
//! layout testable without capturing stdout.
//!

const RULE_WIDTH: usize = 50;

pub fn render_header(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("\n{rule}\n🚀 {title}\n{rule}\n")
}

pub fn render_section(title: &str) -> String {
    format!("\n📋 {}:", title)
}

pub fn render_bullet(text: &str) -> String {
    format!("  • {}", text)
}

pub fn render_item(label: &str, value: impl std::fmt::Display) -> String {
    render_bullet(&format!("{}: {}", label, value))
}

pub fn print_header(title: &str) {
    println!("{}", render_header(title));
}

pub fn print_section(title: &str) {
    println!("{}", render_section(title));
}

pub fn print_item(label: &str, value: impl std::fmt::Display) {
    println!("{}", render_item(label, value));
}

pub fn print_success(message: &str) {
    println!("✅ {}", message);
}

pub fn print_warning(message: &str) {
    println!("⚠️  {}", message);
}

pub fn print_error(message: &str) {
    println!("❌ {}", message);
}
