//! Check orchestrator coordinating the whole run
//!
//! This module provides:
//! - Path expansion: files, and the immediate entries of directories
//! - The per-file pipeline: extract → list versions → filter → sort → pick latest
//! - Rendering of each result as soon as it is produced
//! - Error handling with partial continuation

use crate::buildinfo::{GoBuildInfoReader, MetadataExtractor};
use crate::config::Config;
use crate::domain::{CheckResult, RunSummary};
use crate::error::{RegistryError, ScanError};
use crate::install::command_for;
use crate::output::Renderer;
use crate::progress::Progress;
use crate::registry::{GoProxyClient, HttpClient, RateLimiter, RegistryClient};
use crate::version;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Orchestrator for checking binaries against the module proxy
pub struct Orchestrator {
    /// Run configuration
    config: Config,
    /// Build info reader
    extractor: Box<dyn MetadataExtractor>,
    /// Version source
    registry: Box<dyn RegistryClient>,
    /// Suppression policy and formatter
    renderer: Renderer,
    /// Run-wide cancellation
    cancel: CancellationToken,
}

impl Orchestrator {
    /// Create an orchestrator talking to the configured Go proxy
    pub fn new(config: Config, cancel: CancellationToken) -> Result<Self, RegistryError> {
        let limiter = Arc::new(RateLimiter::new(config.max_queries_per_second));
        let client = HttpClient::new(limiter, cancel.clone())?;
        let registry = GoProxyClient::new(&config.registry_url, client);

        Ok(Self::with_parts(
            config,
            Box::new(GoBuildInfoReader::new()),
            Box::new(registry),
            cancel,
        ))
    }

    /// Create an orchestrator with custom collaborators (for testing)
    pub fn with_parts(
        config: Config,
        extractor: Box<dyn MetadataExtractor>,
        registry: Box<dyn RegistryClient>,
        cancel: CancellationToken,
    ) -> Self {
        let renderer = Renderer::from_config(&config);
        Self {
            config,
            extractor,
            registry,
            renderer,
            cancel,
        }
    }

    /// Check every path, rendering results to `out`/`err` as they complete
    ///
    /// Only unreadable top-level paths and cancellation abort the run;
    /// everything that goes wrong with a single file ends up in its result.
    pub async fn run(
        &self,
        paths: &[PathBuf],
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<RunSummary, ScanError> {
        let mut progress = Progress::new(self.config.show_progress);
        let mut summary = RunSummary::new();

        for path in paths {
            for file in candidates(path)? {
                if self.cancel.is_cancelled() {
                    return Err(ScanError::Cancelled);
                }

                progress.checking(&file);
                let result = self.check_file(&file).await;
                if self.cancel.is_cancelled() {
                    return Err(ScanError::Cancelled);
                }

                summary.record(&result);
                progress.inc();

                if let Err(e) = progress.suspend(|| self.renderer.render(&result, out, err)) {
                    warn!(file = %file.display(), error = %e, "failed to write output");
                }
            }
        }

        progress.finish_and_clear();
        Ok(summary)
    }

    /// Run the pipeline for one file
    pub async fn check_file(&self, file: &Path) -> CheckResult {
        debug!(file = %file.display(), "checking");

        let metadata = match self.extractor.extract(file) {
            Ok(metadata) => metadata,
            Err(e) => {
                return CheckResult::failed(file, format!("reading {}: {}", file.display(), e));
            }
        };

        let versions = match self.registry.list_versions(&metadata.module_path).await {
            Ok(versions) => versions,
            Err(e) => {
                return CheckResult::failed_for(
                    file,
                    &metadata,
                    format!("listing versions for {}: {}", metadata.module_path, e),
                );
            }
        };

        let mut versions = self.filter_versions(versions);
        version::sort(&mut versions);
        let available = versions.pop();
        let command = available.as_deref().map(|available| {
            let dest = std::path::absolute(file).unwrap_or_else(|_| file.to_path_buf());
            command_for(
                &metadata.package_path,
                available,
                &dest,
                &self.config.install_dirs,
            )
        });

        CheckResult::checked(file, &metadata, available, command)
    }

    /// Drop invalid versions, and prereleases unless they are included
    fn filter_versions(&self, mut versions: Vec<String>) -> Vec<String> {
        versions.retain(|v| {
            if !version::is_valid(v) {
                debug!(version = %v, "ignoring invalid version");
                return false;
            }
            self.config.include_prerelease || version::prerelease(v).is_empty()
        });
        versions
    }
}

/// Expand a top-level path into candidate files
///
/// A directory contributes each immediate entry, sorted by name; nested
/// directories are not descended into.
pub fn candidates(path: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let metadata = std::fs::metadata(path).map_err(|e| ScanError::stat(path, e))?;
    if !metadata.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut entries = std::fs::read_dir(path)
        .and_then(|entries| {
            entries
                .map(|entry| entry.map(|e| e.path()))
                .collect::<Result<Vec<_>, _>>()
        })
        .map_err(|e| ScanError::read_dir(path, e))?;
    entries.sort();
    Ok(entries)
}
