//! Suggested `go install` commands
//!
//! The command must reproduce the binary under its current name and
//! directory, even when it was renamed after installation. Paths are quoted
//! for a POSIX shell.

use shell_escape::unix::escape;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Directories used when deriving install commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallDirs {
    /// Where a plain `go install` puts binaries
    pub default_bin_dir: PathBuf,
    /// Scratch directory for installs that must be renamed afterwards
    pub temp_dir: PathBuf,
}

impl InstallDirs {
    /// Create install directories
    pub fn new(default_bin_dir: impl Into<PathBuf>, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            default_bin_dir: default_bin_dir.into(),
            temp_dir: temp_dir.into(),
        }
    }

    /// Resolve the default bin dir the way the go command does
    ///
    /// `GOBIN` wins, then the first `GOPATH` entry plus `bin`, then
    /// `$HOME/go/bin`.
    pub fn resolve(
        gobin: Option<&str>,
        gopath: Option<&str>,
        home: Option<&Path>,
        temp_dir: impl Into<PathBuf>,
    ) -> Self {
        let default_bin_dir = match gobin.filter(|s| !s.is_empty()) {
            Some(gobin) => PathBuf::from(gobin),
            None => {
                let gopath = gopath
                    .filter(|s| !s.is_empty())
                    .and_then(|s| std::env::split_paths(s).next())
                    .unwrap_or_else(|| home.unwrap_or(Path::new("")).join("go"));
                gopath.join("bin")
            }
        };

        Self::new(default_bin_dir, temp_dir)
    }
}

/// Last element of a slash-separated package path
fn package_base(pkg: &str) -> &str {
    pkg.trim_end_matches('/').rsplit('/').next().unwrap_or(pkg)
}

/// Quote a path for interpolation into a shell command
fn quote_path(path: &Path) -> String {
    escape(Cow::Borrowed(path.to_string_lossy().as_ref())).into_owned()
}

/// Shell command that installs `pkg@version` as `dest`
pub fn command_for(pkg: &str, version: &str, dest: &Path, dirs: &InstallDirs) -> String {
    let dest_dir = dest.parent().unwrap_or(Path::new(""));
    let dest_file = dest
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let pkg_base = package_base(pkg);

    if dest_file == pkg_base {
        if dest_dir == dirs.default_bin_dir {
            return format!("go install {}@{}", pkg, version);
        }
        return format!(
            "GOBIN={} go install {}@{}",
            quote_path(dest_dir),
            pkg,
            version
        );
    }

    let tmp_file = dirs.temp_dir.join(pkg_base);
    format!(
        "GOBIN={} go install {}@{} && mv {} {}",
        quote_path(&dirs.temp_dir),
        pkg,
        version,
        quote_path(&tmp_file),
        quote_path(dest)
    )
}
