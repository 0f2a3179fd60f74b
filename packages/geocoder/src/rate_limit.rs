//! Minimum-interval rate limiter for external lookups.
//!
//! Nominatim's public instance allows one request per second. The limiter
//! hands out one permit at a time and spaces permits at least
//! `min_interval` apart. The first permit is also delayed by one full
//! interval.

use std::time::Duration;

use tokio::time::Instant;

/// Spaces successive permits at least `min_interval` apart.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_permit: Option<Instant>,
}

impl RateLimiter {
    /// Creates a limiter. A zero interval disables waiting.
    #[must_use]
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_permit: None,
        }
    }

    /// Creates a limiter from a millisecond interval.
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// The configured interval.
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waits until the next request may be sent.
    pub async fn acquire(&mut self) {
        let now = Instant::now();
        let ready_at = self
            .last_permit
            .map_or(now + self.min_interval, |last| last + self.min_interval);

        if ready_at > now {
            log::trace!("Rate limiter waiting {:?}", ready_at - now);
            tokio::time::sleep_until(ready_at).await;
        }

        self.last_permit = Some(Instant::now());
    }
}
