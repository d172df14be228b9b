//! Token bucket rate limiter shared by every proxy request
//!
//! The bucket holds at most `burst` tokens and refills at `rate` tokens per
//! second. A caller that finds the bucket empty takes a reservation (the
//! balance goes negative) and sleeps until its token has been earned, so
//! concurrent callers queue up behind each other without busy waiting.

use crate::error::RegistryError;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Default maximum queries per second
pub const DEFAULT_RATE: f64 = 2.0;

/// Bucket size: one request may proceed immediately
const DEFAULT_BURST: f64 = 1.0;

/// Time source for the limiter
#[async_trait]
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> Instant;

    /// Suspend for the given duration
    async fn sleep(&self, duration: Duration);
}

/// Wall clock backed by tokio timers
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    last: Instant,
}

/// Token bucket limiter with an injectable clock
pub struct RateLimiter {
    rate: f64,
    burst: f64,
    clock: Arc<dyn Clock>,
    bucket: Mutex<Bucket>,
}

impl RateLimiter {
    /// Create a limiter allowing `rate` requests per second on the system clock
    pub fn new(rate: f64) -> Self {
        Self::with_clock(rate, Arc::new(SystemClock))
    }

    /// Create a limiter on a custom clock
    pub fn with_clock(rate: f64, clock: Arc<dyn Clock>) -> Self {
        let now = clock.now();
        Self {
            rate,
            burst: DEFAULT_BURST,
            clock,
            bucket: Mutex::new(Bucket {
                tokens: DEFAULT_BURST,
                last: now,
            }),
        }
    }

    /// Take one token, returning how long the caller must wait for it
    fn reserve(&self) -> Duration {
        let now = self.clock.now();
        let mut bucket = self.bucket.lock().unwrap_or_else(PoisonError::into_inner);

        // Never move backwards: a stale `now` earns nothing
        if now > bucket.last {
            let elapsed = now.duration_since(bucket.last).as_secs_f64();
            bucket.tokens = (bucket.tokens + elapsed * self.rate).min(self.burst);
            bucket.last = now;
        }

        bucket.tokens -= 1.0;
        if bucket.tokens >= 0.0 {
            Duration::ZERO
        } else {
            // Tiny rates can ask for waits longer than a Duration holds
            Duration::try_from_secs_f64(-bucket.tokens / self.rate).unwrap_or(Duration::MAX)
        }
    }

    /// Return an unused reservation
    fn release(&self) {
        let mut bucket = self.bucket.lock().unwrap_or_else(PoisonError::into_inner);
        bucket.tokens = (bucket.tokens + 1.0).min(self.burst);
    }

    /// Wait until a request may proceed
    ///
    /// Returns [`RegistryError::Cancelled`] without consuming a token if
    /// `cancel` fires first.
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<(), RegistryError> {
        if cancel.is_cancelled() {
            return Err(RegistryError::Cancelled);
        }

        let wait = self.reserve();
        if wait.is_zero() {
            return Ok(());
        }

        debug!(wait_ms = wait.as_millis() as u64, "rate limiter delaying request");
        tokio::select! {
            _ = cancel.cancelled() => {
                self.release();
                Err(RegistryError::Cancelled)
            }
            _ = self.clock.sleep(wait) => Ok(()),
        }
    }
}
