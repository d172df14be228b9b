//! Run configuration resolved once at startup
//!
//! Flags and environment variables are folded into an immutable [`Config`]
//! before any path is processed, so invalid combinations fail early and the
//! pipeline never reads the environment itself.

use crate::cli::CliArgs;
use crate::error::ConfigError;
use crate::install::InstallDirs;
use crate::output::OutputMode;
use crate::registry::GO_PROXY_URL;
use std::path::PathBuf;
use tracing::warn;

/// Snapshot of the environment variables goup consults
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// `GOPROXY`
    pub goproxy: Option<String>,
    /// `GOBIN`
    pub gobin: Option<String>,
    /// `GOPATH`
    pub gopath: Option<String>,
    /// The user's home directory
    pub home: Option<PathBuf>,
    /// The OS temp directory
    pub temp_dir: PathBuf,
}

impl Environment {
    /// Read the current process environment
    pub fn from_process() -> Self {
        Self {
            goproxy: std::env::var("GOPROXY").ok(),
            gobin: std::env::var("GOBIN").ok(),
            gopath: std::env::var("GOPATH").ok(),
            home: dirs::home_dir(),
            temp_dir: std::env::temp_dir(),
        }
    }

    /// Proxy URL implied by `GOPROXY`
    ///
    /// Only the first entry of the `,`/`|` separated list is used. The
    /// keywords `direct` and `off` name no proxy, so the public proxy is
    /// used instead.
    pub fn proxy_url(&self) -> String {
        let first = self
            .goproxy
            .as_deref()
            .and_then(|list| list.split([',', '|']).next())
            .map(str::trim)
            .unwrap_or("");

        match first {
            "" => GO_PROXY_URL.to_string(),
            "direct" | "off" => {
                warn!(
                    "GOPROXY starts with '{}', querying {} instead",
                    first, GO_PROXY_URL
                );
                GO_PROXY_URL.to_string()
            }
            url => url.to_string(),
        }
    }
}

/// Immutable configuration for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// How results are rendered
    pub output_mode: OutputMode,
    /// Show results without an upgrade
    pub show_all: bool,
    /// Show per-file errors
    pub show_errors: bool,
    /// Consider prerelease versions
    pub include_prerelease: bool,
    /// Only show upgradeable binaries
    pub upgradeable_only: bool,
    /// Module proxy base URL
    pub registry_url: String,
    /// Max proxy queries per second
    pub max_queries_per_second: f64,
    /// Directories for install command derivation
    pub install_dirs: InstallDirs,
    /// Show a progress spinner
    pub show_progress: bool,
}

impl Config {
    /// Validate flags and resolve defaults from the environment
    pub fn resolve(args: &CliArgs, env: &Environment) -> Result<Self, ConfigError> {
        if args.all && args.cmd {
            return Err(ConfigError::conflicting("cannot specify both --all and --cmd"));
        }
        if args.cmd && args.json {
            return Err(ConfigError::conflicting("cannot specify both --cmd and --json"));
        }
        if args.all && args.upgradeable {
            return Err(ConfigError::conflicting(
                "cannot specify both --all and --upgradeable",
            ));
        }
        if args.json && args.upgradeable {
            return Err(ConfigError::conflicting(
                "cannot specify both --json and --upgradeable",
            ));
        }
        if !args.rate.is_finite() || args.rate <= 0.0 {
            return Err(ConfigError::invalid_value(
                "rate",
                args.rate.to_string(),
                "must be a positive number",
            ));
        }

        let output_mode = if args.json {
            OutputMode::Json
        } else if args.cmd {
            OutputMode::Command
        } else {
            OutputMode::Plain
        };

        let registry_url = match args.proxy.as_deref().map(str::trim) {
            Some("") => {
                return Err(ConfigError::invalid_value("proxy", "", "must not be empty"));
            }
            Some(url) => url.to_string(),
            None => env.proxy_url(),
        };

        let install_dirs = InstallDirs::resolve(
            env.gobin.as_deref(),
            env.gopath.as_deref(),
            env.home.as_deref(),
            env.temp_dir.clone(),
        );

        Ok(Self {
            output_mode,
            show_all: args.all,
            show_errors: args.errs,
            include_prerelease: args.pre,
            upgradeable_only: args.upgradeable,
            registry_url,
            max_queries_per_second: args.rate,
            install_dirs,
            show_progress: !args.quiet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["goup"];
        argv.extend_from_slice(extra);
        argv.push("/bin");
        CliArgs::parse_from(argv)
    }

    fn env() -> Environment {
        Environment {
            goproxy: None,
            gobin: None,
            gopath: None,
            home: Some(PathBuf::from("/home/u")),
            temp_dir: PathBuf::from("/tmp"),
        }
    }

    #[test]
    fn test_resolve_defaults() {
        let config = Config::resolve(&args(&[]), &env()).unwrap();
        assert_eq!(config.output_mode, OutputMode::Plain);
        assert!(!config.show_all);
        assert!(config.show_errors);
        assert!(config.include_prerelease);
        assert!(!config.upgradeable_only);
        assert_eq!(config.registry_url, GO_PROXY_URL);
        assert_eq!(config.max_queries_per_second, 2.0);
        assert_eq!(
            config.install_dirs,
            InstallDirs::new("/home/u/go/bin", "/tmp")
        );
        assert!(config.show_progress);
    }

    #[test]
    fn test_resolve_output_modes() {
        let config = Config::resolve(&args(&["--json"]), &env()).unwrap();
        assert_eq!(config.output_mode, OutputMode::Json);

        let config = Config::resolve(&args(&["--cmd"]), &env()).unwrap();
        assert_eq!(config.output_mode, OutputMode::Command);

        let config = Config::resolve(&args(&["--json", "--all"]), &env()).unwrap();
        assert_eq!(config.output_mode, OutputMode::Json);
        assert!(config.show_all);
    }

    #[test]
    fn test_resolve_rejects_all_with_cmd() {
        let err = Config::resolve(&args(&["--all", "--cmd"]), &env()).unwrap_err();
        assert!(matches!(err, ConfigError::ConflictingOptions { .. }));
        assert!(err.to_string().contains("--all and --cmd"));
    }

    #[test]
    fn test_resolve_rejects_cmd_with_json() {
        let err = Config::resolve(&args(&["--cmd", "--json"]), &env()).unwrap_err();
        assert!(err.to_string().contains("--cmd and --json"));
    }

    #[test]
    fn test_resolve_rejects_all_with_upgradeable() {
        let err = Config::resolve(&args(&["--all", "-u"]), &env()).unwrap_err();
        assert!(matches!(err, ConfigError::ConflictingOptions { .. }));
    }

    #[test]
    fn test_resolve_rejects_json_with_upgradeable() {
        let err = Config::resolve(&args(&["--json", "-u"]), &env()).unwrap_err();
        assert!(matches!(err, ConfigError::ConflictingOptions { .. }));
        assert!(err.to_string().contains("--json and --upgradeable"));
    }

    #[test]
    fn test_resolve_upgradeable_with_cmd() {
        let config = Config::resolve(&args(&["--cmd", "-u"]), &env()).unwrap();
        assert_eq!(config.output_mode, OutputMode::Command);
        assert!(config.upgradeable_only);
    }

    #[test]
    fn test_resolve_accepts_tiny_rate() {
        let config = Config::resolve(&args(&["--rate", "1e-20"]), &env()).unwrap();
        assert_eq!(config.max_queries_per_second, 1e-20);
    }

    #[test]
    fn test_resolve_rejects_bad_rate() {
        assert!(Config::resolve(&args(&["--rate", "0"]), &env()).is_err());
        assert!(Config::resolve(&args(&["--rate", "inf"]), &env()).is_err());
        assert!(Config::resolve(&args(&["--rate", "NaN"]), &env()).is_err());
    }

    #[test]
    fn test_resolve_proxy_flag_wins() {
        let env = Environment {
            goproxy: Some("https://corp.example".to_string()),
            ..env()
        };
        let config = Config::resolve(&args(&["--proxy", "https://flag.example"]), &env).unwrap();
        assert_eq!(config.registry_url, "https://flag.example");
    }

    #[test]
    fn test_resolve_rejects_empty_proxy() {
        assert!(Config::resolve(&args(&["--proxy", ""]), &env()).is_err());
    }

    #[test]
    fn test_resolve_quiet_disables_progress() {
        let config = Config::resolve(&args(&["-q"]), &env()).unwrap();
        assert!(!config.show_progress);
    }

    #[test]
    fn test_proxy_url_first_entry() {
        let env = Environment {
            goproxy: Some("https://corp.example,https://proxy.golang.org,direct".to_string()),
            ..env()
        };
        assert_eq!(env.proxy_url(), "https://corp.example");

        let env = Environment {
            goproxy: Some("https://a.example|https://b.example".to_string()),
            ..env
        };
        assert_eq!(env.proxy_url(), "https://a.example");
    }

    #[test]
    fn test_proxy_url_keywords_fall_back() {
        let env = Environment {
            goproxy: Some("direct".to_string()),
            ..env()
        };
        assert_eq!(env.proxy_url(), GO_PROXY_URL);

        let env = Environment {
            goproxy: Some("off".to_string()),
            ..env
        };
        assert_eq!(env.proxy_url(), GO_PROXY_URL);
    }

    #[test]
    fn test_proxy_url_unset() {
        assert_eq!(env().proxy_url(), GO_PROXY_URL);
        let env = Environment {
            goproxy: Some(String::new()),
            ..env()
        };
        assert_eq!(env.proxy_url(), GO_PROXY_URL);
    }

    #[test]
    fn test_install_dirs_from_environment() {
        let env = Environment {
            gobin: Some("/opt/bin".to_string()),
            ..env()
        };
        let config = Config::resolve(&args(&[]), &env).unwrap();
        assert_eq!(config.install_dirs.default_bin_dir, PathBuf::from("/opt/bin"));
    }
}
