//! Module proxy access for fetching published versions
//!
//! This module provides:
//! - A token bucket rate limiter shared across the run
//! - HTTP client shared foundation with retry logic
//! - Go Module Proxy client

mod client;
mod go_proxy;
mod rate_limit;

pub use client::{Fetched, HttpClient};
pub use go_proxy::{GoProxyClient, GO_PROXY_URL};
pub use rate_limit::{Clock, RateLimiter, SystemClock, DEFAULT_RATE};

use crate::error::RegistryError;
use async_trait::async_trait;

/// Source of published versions for a module
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// List every published version of a module
    ///
    /// A module that was never published yields an empty list.
    async fn list_versions(&self, module: &str) -> Result<Vec<String>, RegistryError>;
}
