//! CLI argument parsing module for goup

use crate::registry::DEFAULT_RATE;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Report Go binaries that have newer versions on the module proxy
#[derive(Parser, Debug, Clone)]
#[command(
    name = "goup",
    version,
    about = "Report installed Go binaries that can be upgraded"
)]
pub struct CliArgs {
    /// Go binaries, or directories whose entries are Go binaries
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    // Filtering options
    /// Show all files, not only those with an upgrade available
    #[arg(long)]
    pub all: bool,

    /// Only show upgradeable binaries, hiding errors (not with --all or --json)
    #[arg(short = 'u', long = "upgradeable")]
    pub upgradeable: bool,

    /// Show per-file errors (use --errs=false to disable)
    #[arg(
        long,
        action = ArgAction::Set,
        default_value_t = true,
        default_missing_value = "true",
        num_args = 0..=1,
        require_equals = true
    )]
    pub errs: bool,

    /// Include prerelease versions (use --pre=false to disable)
    #[arg(
        long,
        action = ArgAction::Set,
        default_value_t = true,
        default_missing_value = "true",
        num_args = 0..=1,
        require_equals = true
    )]
    pub pre: bool,

    // Output options
    /// Emit output as shell commands
    #[arg(long)]
    pub cmd: bool,

    /// Emit output as JSON
    #[arg(long)]
    pub json: bool,

    // Proxy options
    /// Max queries per second to the proxy
    #[arg(long, default_value_t = DEFAULT_RATE)]
    pub rate: f64,

    /// Go module proxy URL (default: first GOPROXY entry, else https://proxy.golang.org)
    #[arg(long)]
    pub proxy: Option<String>,

    // General options
    /// Do not show a progress spinner
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}
