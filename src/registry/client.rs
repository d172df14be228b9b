//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - A run-wide token bucket every attempt must pass through
//! - Exponential backoff retry logic (max 3 retries)
//! - Cancellation of waits and in-flight requests

use crate::error::RegistryError;
use crate::registry::RateLimiter;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Default timeout for HTTP requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("goup/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_DELAY_MS: u64 = 100;

/// Outcome of a GET whose status the caller wants to inspect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    /// 2xx with the response body
    Body(String),
    /// 404 or 410
    Missing,
}

/// Rate-limited HTTP client wrapper with retry logic
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    limiter: Arc<RateLimiter>,
    cancel: CancellationToken,
    max_retries: u32,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new(limiter: Arc<RateLimiter>, cancel: CancellationToken) -> Result<Self, RegistryError> {
        Self::with_config(limiter, cancel, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(
        limiter: Arc<RateLimiter>,
        cancel: CancellationToken,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                RegistryError::network_error(
                    "",
                    "HTTP client",
                    format!("failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            client,
            limiter,
            cancel,
            max_retries: MAX_RETRIES,
        })
    }

    /// Set the maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sleep for a backoff delay unless the run is cancelled
    async fn backoff(&self, delay_ms: u64) -> Result<(), RegistryError> {
        tokio::select! {
            _ = self.cancel.cancelled() => Err(RegistryError::Cancelled),
            _ = tokio::time::sleep(Duration::from_millis(delay_ms)) => Ok(()),
        }
    }

    /// Perform a rate-limited GET with retry logic and error context
    ///
    /// 404 and 410 are reported as [`Fetched::Missing`] instead of an error.
    pub async fn get_text(
        &self,
        url: &str,
        module: &str,
        registry: &str,
    ) -> Result<Fetched, RegistryError> {
        let mut last_error = None;
        let mut delay = BASE_DELAY_MS;

        for attempt in 0..=self.max_retries {
            self.limiter.acquire(&self.cancel).await?;
            debug!(url, attempt, "GET");

            let sent = tokio::select! {
                _ = self.cancel.cancelled() => return Err(RegistryError::Cancelled),
                sent = self.client.get(url).send() => sent,
            };

            match sent {
                Ok(response) => {
                    let status = response.status();

                    // Check for rate limiting
                    if status == StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(RegistryError::rate_limit_exceeded(registry));

                        if attempt < self.max_retries {
                            warn!(url, attempt, "rate limited by {}, retrying", registry);
                            self.backoff(delay).await?;
                            delay *= 2;
                            continue;
                        }
                        break;
                    }

                    if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
                        return Ok(Fetched::Missing);
                    }

                    if !status.is_success() {
                        return Err(RegistryError::network_error(
                            module,
                            registry,
                            format!("HTTP {}", status),
                        ));
                    }

                    let body = tokio::select! {
                        _ = self.cancel.cancelled() => return Err(RegistryError::Cancelled),
                        body = response.text() => body,
                    };
                    return body.map(Fetched::Body).map_err(|e| {
                        RegistryError::invalid_response(
                            module,
                            registry,
                            format!("failed to read response body: {}", e),
                        )
                    });
                }
                Err(e) => {
                    if e.is_timeout() {
                        last_error = Some(RegistryError::timeout(module, registry));
                    } else {
                        last_error = Some(RegistryError::network_error(
                            module,
                            registry,
                            e.to_string(),
                        ));
                    }

                    if attempt < self.max_retries {
                        warn!(url, attempt, error = %e, "request failed, retrying");
                        self.backoff(delay).await?;
                        delay *= 2;
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| RegistryError::network_error(module, registry, "unknown error")))
    }
}
