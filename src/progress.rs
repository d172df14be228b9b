//! Progress display while checking binaries
//!
//! A spinner on stderr names the file currently being checked. indicatif
//! hides it when stderr is not a terminal; output written through
//! [`Progress::suspend`] never interleaves with it.

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Spinner template: tick, files checked so far, current file
const SPINNER_TEMPLATE: &str = "{spinner:.cyan} [{pos}] {msg}";

/// Progress reporter for a run
pub struct Progress {
    /// Spinner, absent in quiet mode
    bar: Option<ProgressBar>,
}

impl Progress {
    /// Create a progress reporter, drawing only if `enabled`
    pub fn new(enabled: bool) -> Self {
        let bar = enabled.then(|| {
            let spinner = ProgressBar::new_spinner();
            let style = ProgressStyle::with_template(SPINNER_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ");
            spinner.set_style(style);
            spinner.enable_steady_tick(Duration::from_millis(80));
            spinner
        });
        Self { bar }
    }

    /// Announce the file being checked
    pub fn checking(&self, file: &Path) {
        if let Some(ref bar) = self.bar {
            bar.set_message(format!("Checking {}", file.display()));
        }
    }

    /// Count one finished file
    pub fn inc(&self) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Run `f` with the spinner hidden
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        match self.bar {
            Some(ref bar) => bar.suspend(f),
            None => f(),
        }
    }

    /// Remove the spinner from the terminal
    pub fn finish_and_clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.finish_and_clear();
    }
}
