//! Output rendering for check results
//!
//! This module provides:
//! - Plain text lines for human-readable display
//! - Shell commands to paste into a terminal
//! - JSON objects for machine processing
//! - The suppression policy deciding which results are printed

mod command;
mod json;
mod text;

pub use command::CommandFormatter;
pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::config::Config;
use crate::domain::CheckResult;
use std::io::Write;

/// Output mode options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// `<file>: package=... installed=... available=...`
    #[default]
    Plain,
    /// Suggested install command only
    Command,
    /// One pretty-printed JSON object per result
    Json,
}

/// Decides which results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputPolicy {
    /// Output mode the policy applies to
    pub mode: OutputMode,
    /// Show results without an upgrade
    pub show_all: bool,
    /// Show error results
    pub show_errors: bool,
    /// Only upgradeable results, never errors
    pub upgradeable_only: bool,
}

impl Default for OutputPolicy {
    fn default() -> Self {
        Self {
            mode: OutputMode::default(),
            show_all: false,
            show_errors: true,
            upgradeable_only: false,
        }
    }
}

impl OutputPolicy {
    /// Build the policy from the run configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            mode: config.output_mode,
            show_all: config.show_all,
            show_errors: config.show_errors,
            upgradeable_only: config.upgradeable_only,
        }
    }

    /// Whether a result should be printed
    ///
    /// Errors are only hidden by `show_errors` (or `upgradeable_only`).
    /// Other results need a strictly newer valid version unless `show_all`,
    /// which never applies to command output.
    pub fn is_visible(&self, result: &CheckResult) -> bool {
        if result.is_error() {
            return self.show_errors && !self.upgradeable_only;
        }
        if self.show_all && self.mode != OutputMode::Command {
            return true;
        }
        result.is_upgradeable()
    }
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Write one result; `out` is stdout, `err` is stderr
    fn format(
        &self,
        result: &CheckResult,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> std::io::Result<()>;
}

/// Create an output formatter for a mode
pub fn create_formatter(mode: OutputMode) -> Box<dyn OutputFormatter> {
    match mode {
        OutputMode::Plain => Box::new(TextFormatter::new()),
        OutputMode::Command => Box::new(CommandFormatter::new()),
        OutputMode::Json => Box::new(JsonFormatter::new()),
    }
}

/// Applies the suppression policy, then formats
pub struct Renderer {
    policy: OutputPolicy,
    formatter: Box<dyn OutputFormatter>,
}

impl Renderer {
    /// Create a renderer for a policy
    pub fn new(policy: OutputPolicy) -> Self {
        Self {
            formatter: create_formatter(policy.mode),
            policy,
        }
    }

    /// Create a renderer from the run configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(OutputPolicy::from_config(config))
    }

    /// Render a result if the policy lets it through
    ///
    /// Returns whether anything was written.
    pub fn render(
        &self,
        result: &CheckResult,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> std::io::Result<bool> {
        if !self.policy.is_visible(result) {
            return Ok(false);
        }
        self.formatter.format(result, out, err)?;
        Ok(true)
    }
}

/// Write an error result as `<file>: <error>`
fn write_error_line(result: &CheckResult, writer: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        writer,
        "{}: {}",
        result.file.display(),
        result.error.as_deref().unwrap_or_default()
    )
}
