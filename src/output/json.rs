//! JSON output formatter for machine processing
//!
//! Each visible result becomes one indented JSON object followed by a
//! newline. Errors are written to stdout like any other result.

use crate::domain::CheckResult;
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of a check result
#[derive(Serialize)]
struct JsonResult<'a> {
    file: String,
    installed: &'a str,
    available: &'a str,
    main_module: &'a str,
    main_package: &'a str,
    command: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl<'a> From<&'a CheckResult> for JsonResult<'a> {
    fn from(result: &'a CheckResult) -> Self {
        Self {
            file: result.file.display().to_string(),
            installed: &result.installed,
            available: &result.available,
            main_module: &result.main_module,
            main_package: &result.main_package,
            command: &result.command,
            error: result.error.as_deref(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(
        &self,
        result: &CheckResult,
        out: &mut dyn Write,
        _err: &mut dyn Write,
    ) -> std::io::Result<()> {
        let json =
            serde_json::to_string_pretty(&JsonResult::from(result)).map_err(std::io::Error::other)?;
        writeln!(out, "{}", json)
    }
}
