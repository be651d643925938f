//! Output mode control.
//!
//! [`OutputMode`] picks between the human-readable text rendering of a report
//! and its JSON serialization. [`OutputDestination`] is where the result goes.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// How a report is rendered; the value of the `--output` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputMode {
    /// Aligned plain text for terminals
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl OutputMode {
    /// Returns true if this mode serializes report data directly.
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputMode::Json)
    }
}

/// A command result that can be shown as text or serialized.
pub trait Report: Serialize {
    /// Renders the report for a terminal.
    fn to_text(&self) -> String;
}

/// Renders `report` in the requested mode.
pub fn render<R: Report>(report: &R, mode: OutputMode) -> serde_json::Result<String> {
    match mode {
        OutputMode::Text => Ok(report.to_text()),
        OutputMode::Json => serde_json::to_string_pretty(report),
    }
}

/// Destination for rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputDestination {
    /// Write to standard output
    #[default]
    Stdout,
    /// Write to a specific file
    File(PathBuf),
}

impl OutputDestination {
    /// Writes text content to this destination.
    pub fn write_text(&self, content: &str) -> std::io::Result<()> {
        match self {
            OutputDestination::Stdout => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                writeln!(handle, "{}", content)
            }
            OutputDestination::File(path) => {
                validate_path(path)?;
                std::fs::write(path, content)
            }
        }
    }
}

/// Validates that a file path's parent directory exists.
fn validate_path(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Parent directory does not exist: {}", parent.display()),
            ));
        }
    }
    Ok(())
}
