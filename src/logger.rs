//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` for output that only shows with `--verbose`
//! - status lines (`✓` / `✗`) with a running pass/fail tally
//!
//! Everything goes to stderr; stdout is reserved for command output
//! (schema JSON, rendered forms) so it can be piped.
//!
//! # Example
//!
//! ```ignore
//! log!("apply"; "wrote {}", path.display());
//! status_success("content/index.md");
//! status_error("content/about.md", "tags: [\"a\"] != [\"b\"]");
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::{
    io::{Write, stderr},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut out = stderr().lock();
    execute!(out, Clear(ClearType::UntilNewLine)).ok();
    writeln!(out, "{prefix} {message}").ok();
    out.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "form" | "schema" => prefix.bright_blue().bold().to_string(),
        "apply" | "check" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Status lines
// ============================================================================

/// Pass/fail tally of the status lines printed so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub passed: usize,
    pub failed: usize,
}

impl Tally {
    fn record(&mut self, ok: bool) {
        if ok {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }

    /// `3 passed, 1 failed`
    pub fn summary(&self) -> String {
        format!("{} passed, {} failed", self.passed, self.failed)
    }
}

static TALLY: Mutex<Tally> = Mutex::new(Tally {
    passed: 0,
    failed: 0,
});

/// Format one status line: symbol, message, then indented detail lines.
fn status_line(symbol: &str, message: &str, detail: &str) -> String {
    let mut line = format!("{symbol} {message}");
    for detail_line in detail.lines() {
        line.push_str("\n  ");
        line.push_str(&detail_line.dimmed().to_string());
    }
    line
}

fn print_status(line: &str) {
    let mut out = stderr().lock();
    writeln!(out, "{line}").ok();
    out.flush().ok();
}

/// Success line (✓ prefix, green).
pub fn status_success(message: &str) {
    TALLY.lock().record(true);
    print_status(&status_line(&"✓".green().to_string(), message, ""));
}

/// Error line (✗ prefix, red) with optional multi-line detail.
pub fn status_error(summary: &str, detail: &str) {
    TALLY.lock().record(false);
    print_status(&status_line(&"✗".red().to_string(), summary, detail));
}

/// Warning line (⚠ prefix, yellow); not counted.
pub fn status_warning(detail: &str) {
    print_status(&status_line(&"⚠".yellow().to_string(), detail, ""));
}

/// Current tally.
pub fn tally() -> Tally {
    *TALLY.lock()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_summary() {
        let mut tally = Tally::default();
        tally.record(true);
        tally.record(true);
        tally.record(false);
        assert_eq!(tally.summary(), "2 passed, 1 failed");
    }

    #[test]
    fn test_status_line_indents_detail() {
        let line = status_line("x", "content/index.md", "first\nsecond");
        assert_eq!(line.lines().count(), 3);
        assert!(line.starts_with("x content/index.md\n  "));
    }

    #[test]
    fn test_status_line_without_detail() {
        assert_eq!(status_line("x", "ok", ""), "x ok");
    }
}
