//! Plain text formatter for human-readable display

use crate::domain::CheckResult;
use crate::output::{write_error_line, OutputFormatter};
use std::io::Write;

/// Text formatter: `<file>: package=<pkg> installed=<v> available=<v>`
#[derive(Debug, Default)]
pub struct TextFormatter;

impl TextFormatter {
    /// Create a new text formatter
    pub fn new() -> Self {
        Self
    }

    /// Format a result line, omitting empty fields
    pub fn line(result: &CheckResult) -> String {
        let mut line = format!("{}:", result.file.display());
        for (key, value) in [
            ("package", &result.main_package),
            ("installed", &result.installed),
            ("available", &result.available),
        ] {
            if !value.is_empty() {
                line.push_str(&format!(" {}={}", key, value));
            }
        }
        line
    }
}

impl OutputFormatter for TextFormatter {
    fn format(
        &self,
        result: &CheckResult,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> std::io::Result<()> {
        if result.is_error() {
            return write_error_line(result, err);
        }
        writeln!(out, "{}", Self::line(result))
    }
}
