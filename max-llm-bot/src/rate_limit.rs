//! Bot-wide limit on LLM requests per minute.

use std::num::NonZeroU32;

use anyhow::Result;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};

/// Direct (unkeyed) limiter: a burst of `per_minute` requests, replenished evenly over a minute.
pub struct LlmRateLimiter {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    per_minute: u32,
}

impl LlmRateLimiter {
    pub fn per_minute(per_minute: u32) -> Result<Self> {
        let quota = NonZeroU32::new(per_minute)
            .ok_or_else(|| anyhow::anyhow!("rate limit must be at least 1 request per minute"))?;
        Ok(Self {
            limiter: RateLimiter::direct(Quota::per_minute(quota)),
            per_minute,
        })
    }

    /// Takes one permit; false when the quota is exhausted. Never waits.
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }

    pub fn quota_per_minute(&self) -> u32 {
        self.per_minute
    }
}
