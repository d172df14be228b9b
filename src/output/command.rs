//! Shell command formatter

use crate::domain::CheckResult;
use crate::output::{write_error_line, OutputFormatter};
use std::io::Write;

/// Prints the suggested install command of each result
#[derive(Debug, Default)]
pub struct CommandFormatter;

impl CommandFormatter {
    /// Create a new command formatter
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for CommandFormatter {
    fn format(
        &self,
        result: &CheckResult,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> std::io::Result<()> {
        if result.is_error() {
            return write_error_line(result, err);
        }
        if result.command.is_empty() {
            return Ok(());
        }
        writeln!(out, "{}", result.command)
    }
}
