//! Client-side request throttling
//!
//! Uses the governor crate for token bucket rate limiting. Throttling only
//! delays requests; nothing is ever retried.

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Configuration for rate limiting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimiterConfig {
    /// Maximum number of requests per second
    pub requests_per_second: NonZeroU32,
    /// Burst size (max tokens in bucket)
    pub burst_size: NonZeroU32,
}

impl RateLimiterConfig {
    /// Create a config; zero values are rejected
    pub fn new(requests_per_second: u32, burst_size: u32) -> Option<Self> {
        Some(Self {
            requests_per_second: NonZeroU32::new(requests_per_second)?,
            burst_size: NonZeroU32::new(burst_size)?,
        })
    }

    /// A limit of `rps` requests per second with an equal burst
    pub fn per_second(rps: u32) -> Option<Self> {
        Self::new(rps, rps)
    }
}

/// Token bucket rate limiter shared by every request on a connection
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given config
    pub fn new(config: &RateLimiterConfig) -> Self {
        let quota = Quota::per_second(config.requests_per_second).allow_burst(config.burst_size);

        Self {
            limiter: Arc::new(Governor::direct(quota)),
        }
    }

    /// Wait until a request can be made
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }

    /// Try to acquire a permit, returning immediately
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").finish()
    }
}

#[cfg(test)]
mod rate_limit_tests {
    use super::*;

    #[test]
    fn test_rate_limiter_config_rejects_zero() {
        assert!(RateLimiterConfig::per_second(0).is_none());
        assert!(RateLimiterConfig::new(5, 0).is_none());

        let config = RateLimiterConfig::per_second(20).unwrap();
        assert_eq!(config.requests_per_second.get(), 20);
        assert_eq!(config.burst_size.get(), 20);
    }

    #[tokio::test]
    async fn test_rate_limiter_allows_burst_then_blocks() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(1, 3).unwrap());

        for _ in 0..3 {
            assert!(limiter.try_acquire());
        }
        assert!(!limiter.try_acquire());
    }

    #[tokio::test]
    async fn test_rate_limiter_wait() {
        let limiter = RateLimiter::new(&RateLimiterConfig::per_second(100).unwrap());
        limiter.wait().await;
    }
}
