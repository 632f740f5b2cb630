// ABOUTME: Token-bucket rate limiter shared by all concurrent fetch tasks of one client
// ABOUTME: Delays callers to a steady request rate with burst allowance and a bounded wait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::debug;
use wellness_core::constants::defaults;
use wellness_core::errors::{ProviderError, ProviderResult};

/// Rate limiter settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimiterConfig {
    /// Sustained rate in requests per minute
    pub requests_per_minute: u32,
    /// Slots available immediately after idling
    pub burst: u32,
    /// Longest a caller may be delayed before giving up
    pub max_wait: Duration,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: defaults::REQUESTS_PER_MINUTE,
            burst: defaults::BURST_CAPACITY,
            max_wait: Duration::from_secs(defaults::RATE_LIMIT_MAX_WAIT_SECS),
        }
    }
}

#[derive(Debug)]
struct Bucket {
    /// Available slots; negative when callers hold reservations
    tokens: f64,
    last_refill: Instant,
}

/// Token bucket with reservation semantics.
///
/// Each `acquire` takes one slot immediately, possibly driving the balance
/// negative, and then sleeps for the deficit. Waiters are therefore served in
/// the order they reserved and requests are delayed, never dropped.
#[derive(Debug)]
pub struct RateLimiter {
    provider: String,
    per_second: f64,
    capacity: f64,
    max_wait: Duration,
    bucket: Mutex<Bucket>,
}

impl RateLimiter {
    /// Create a limiter that starts with a full burst
    #[must_use]
    pub fn new(provider: impl Into<String>, config: RateLimiterConfig) -> Self {
        let capacity = f64::from(config.burst.max(1));
        Self {
            provider: provider.into(),
            per_second: f64::from(config.requests_per_minute.max(1)) / 60.0,
            capacity,
            max_wait: config.max_wait,
            bucket: Mutex::new(Bucket {
                tokens: capacity,
                last_refill: Instant::now(),
            }),
        }
    }

    /// Wait for a request slot.
    ///
    /// # Errors
    ///
    /// Returns `RateLimiterTimeout` when the slot would not be available
    /// within the configured `max_wait`. The reservation is released.
    pub async fn acquire(&self) -> ProviderResult<()> {
        let wait = {
            let mut bucket = self.bucket.lock().await;
            self.refill(&mut bucket);
            bucket.tokens -= 1.0;
            if bucket.tokens >= 0.0 {
                return Ok(());
            }
            let wait = Duration::from_secs_f64(-bucket.tokens / self.per_second);
            if wait > self.max_wait {
                bucket.tokens += 1.0;
                return Err(ProviderError::RateLimiterTimeout {
                    provider: self.provider.clone(),
                    waited: self.max_wait,
                });
            }
            wait
        };

        debug!(provider = %self.provider, wait_ms = wait.as_millis(), "rate limiter delaying request");
        sleep(wait).await;
        Ok(())
    }

    fn refill(&self, bucket: &mut Bucket) {
        let now = Instant::now();
        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = elapsed
            .mul_add(self.per_second, bucket.tokens)
            .min(self.capacity);
        bucket.last_refill = now;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tokio::task::JoinSet;
    use tokio::time;

    use super::*;

    fn limiter(requests_per_minute: u32, burst: u32, max_wait_secs: u64) -> RateLimiter {
        RateLimiter::new(
            "whoop",
            RateLimiterConfig {
                requests_per_minute,
                burst,
                max_wait: Duration::from_secs(max_wait_secs),
            },
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_is_granted_without_delay() {
        let limiter = limiter(60, 3, 10);
        let start = Instant::now();
        for _ in 0..3 {
            limiter.acquire().await.unwrap();
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_requests_beyond_burst_are_delayed() {
        let limiter = limiter(60, 1, 10);
        let start = Instant::now();
        limiter.acquire().await.unwrap();
        limiter.acquire().await.unwrap();
        limiter.acquire().await.unwrap();
        // One slot per second after the burst
        assert!(start.elapsed() >= Duration::from_secs(2));
        assert!(start.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_beyond_max_fails() {
        let limiter = limiter(1, 1, 5);
        limiter.acquire().await.unwrap();
        let err = limiter.acquire().await.unwrap_err();
        assert!(matches!(err, ProviderError::RateLimiterTimeout { .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_releases_reservation() {
        let limiter = limiter(60, 1, 0);
        limiter.acquire().await.unwrap();
        assert!(limiter.acquire().await.is_err());
        time::advance(Duration::from_secs(1)).await;

        let start = Instant::now();
        limiter.acquire().await.unwrap();
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_are_spaced_by_reservation() {
        let limiter = Arc::new(limiter(60, 2, 10));
        let start = Instant::now();

        let mut tasks = JoinSet::new();
        for _ in 0..6 {
            let limiter = Arc::clone(&limiter);
            tasks.spawn(async move {
                limiter.acquire().await.unwrap();
                start.elapsed().as_secs()
            });
        }
        let mut finished = Vec::new();
        while let Some(result) = tasks.join_next().await {
            finished.push(result.unwrap());
        }
        finished.sort_unstable();

        // Two burst slots, then one slot per second in reservation order
        assert_eq!(finished, vec![0, 0, 1, 2, 3, 4]);
        assert_eq!(start.elapsed().as_secs(), 4);
    }
}
