//! Per-binary check result types

use super::BuildMetadata;
use crate::version;
use std::cmp::Ordering;
use std::path::PathBuf;

/// Upgrade status derived from a check result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeStatus {
    /// A newer version is available
    Upgradeable,
    /// Installed version is the latest (or newer)
    UpToDate,
    /// The proxy knows no versions of the module
    NoVersions,
    /// Installed version is not a semantic version (e.g. `(devel)`)
    Indeterminate,
    /// Extraction or lookup failed
    Failed,
}

/// Outcome of checking one candidate file
///
/// Empty strings mean "absent". When `error` is set, `installed`,
/// `available` and `command` are always empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// File that was checked
    pub file: PathBuf,
    /// Installed module version
    pub installed: String,
    /// Latest version on the proxy after filtering
    pub available: String,
    /// Main module path
    pub main_module: String,
    /// Main package path
    pub main_package: String,
    /// Suggested shell command reproducing the binary at `available`
    pub command: String,
    /// Extraction or lookup failure, with context
    pub error: Option<String>,
}

impl CheckResult {
    /// Creates a result for a successfully checked binary
    pub fn checked(
        file: impl Into<PathBuf>,
        metadata: &BuildMetadata,
        available: Option<String>,
        command: Option<String>,
    ) -> Self {
        let available = available.unwrap_or_default();
        // No command without an upgrade target
        let command = if available.is_empty() {
            String::new()
        } else {
            command.unwrap_or_default()
        };

        Self {
            file: file.into(),
            installed: metadata.installed_version.clone(),
            available,
            main_module: metadata.module_path.clone(),
            main_package: metadata.package_path.clone(),
            command,
            error: None,
        }
    }

    /// Creates a failed result
    pub fn failed(file: impl Into<PathBuf>, error: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            installed: String::new(),
            available: String::new(),
            main_module: String::new(),
            main_package: String::new(),
            command: String::new(),
            error: Some(error.into()),
        }
    }

    /// Creates a failed result that still names the binary's module
    pub fn failed_for(
        file: impl Into<PathBuf>,
        metadata: &BuildMetadata,
        error: impl Into<String>,
    ) -> Self {
        Self {
            main_module: metadata.module_path.clone(),
            main_package: metadata.package_path.clone(),
            ..Self::failed(file, error)
        }
    }

    /// Returns true if this result carries an error
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Returns true if a strictly newer valid version is available
    pub fn is_upgradeable(&self) -> bool {
        self.status() == UpgradeStatus::Upgradeable
    }

    /// Classifies the result
    pub fn status(&self) -> UpgradeStatus {
        if self.error.is_some() {
            return UpgradeStatus::Failed;
        }
        if !version::is_valid(&self.installed) {
            return UpgradeStatus::Indeterminate;
        }
        if self.available.is_empty() {
            return UpgradeStatus::NoVersions;
        }
        if !version::is_valid(&self.available) {
            return UpgradeStatus::Indeterminate;
        }
        match version::compare(&self.installed, &self.available) {
            Ordering::Less => UpgradeStatus::Upgradeable,
            _ => UpgradeStatus::UpToDate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(installed: &str) -> BuildMetadata {
        BuildMetadata::new("example.com/tool", installed, "example.com/tool/cmd/tool")
    }

    #[test]
    fn test_checked_upgradeable() {
        let result = CheckResult::checked(
            "/home/u/go/bin/tool",
            &meta("v1.0.0"),
            Some("v1.2.0".to_string()),
            Some("go install example.com/tool/cmd/tool@v1.2.0".to_string()),
        );
        assert_eq!(result.installed, "v1.0.0");
        assert_eq!(result.available, "v1.2.0");
        assert_eq!(result.main_module, "example.com/tool");
        assert_eq!(result.main_package, "example.com/tool/cmd/tool");
        assert!(!result.command.is_empty());
        assert!(result.is_upgradeable());
        assert!(!result.is_error());
    }

    #[test]
    fn test_checked_up_to_date() {
        let result = CheckResult::checked("/bin/tool", &meta("v1.0.0"), Some("v1.0.0".into()), None);
        assert_eq!(result.status(), UpgradeStatus::UpToDate);
    }

    #[test]
    fn test_checked_newer_than_proxy() {
        let result = CheckResult::checked("/bin/tool", &meta("v1.3.0"), Some("v1.2.0".into()), None);
        assert_eq!(result.status(), UpgradeStatus::UpToDate);
    }

    #[test]
    fn test_checked_without_versions_has_no_command() {
        let result = CheckResult::checked(
            "/bin/tool",
            &meta("v1.0.0"),
            None,
            Some("go install example.com/tool/cmd/tool@".to_string()),
        );
        assert!(result.available.is_empty());
        assert!(result.command.is_empty());
        assert_eq!(result.status(), UpgradeStatus::NoVersions);
    }

    #[test]
    fn test_devel_build_is_indeterminate() {
        let result = CheckResult::checked("/bin/tool", &meta("(devel)"), Some("v2.0.0".into()), None);
        assert_eq!(result.status(), UpgradeStatus::Indeterminate);
        assert!(!result.is_upgradeable());
    }

    #[test]
    fn test_failed_leaves_versions_empty() {
        let result = CheckResult::failed("/bin/x", "reading /bin/x: not a Go executable");
        assert!(result.is_error());
        assert!(result.installed.is_empty());
        assert!(result.available.is_empty());
        assert!(result.command.is_empty());
        assert_eq!(result.status(), UpgradeStatus::Failed);
    }

    #[test]
    fn test_failed_for_keeps_module_identity() {
        let result = CheckResult::failed_for("/bin/tool", &meta("v1.0.0"), "listing versions failed");
        assert_eq!(result.main_module, "example.com/tool");
        assert!(result.installed.is_empty());
        assert_eq!(result.error.as_deref(), Some("listing versions failed"));
    }
}
