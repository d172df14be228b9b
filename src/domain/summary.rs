//! Run summary counters

use super::{CheckResult, UpgradeStatus};

/// Counts of what a run checked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of candidate files checked
    pub checked: usize,
    /// Number of binaries with a newer version available
    pub upgradeable: usize,
    /// Number of files that failed extraction or lookup
    pub errors: usize,
}

impl RunSummary {
    /// Creates an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one check result
    pub fn record(&mut self, result: &CheckResult) {
        self.checked += 1;
        match result.status() {
            UpgradeStatus::Upgradeable => self.upgradeable += 1,
            UpgradeStatus::Failed => self.errors += 1,
            _ => {}
        }
    }
}
