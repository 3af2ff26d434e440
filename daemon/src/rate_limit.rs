use governor::{clock, state::InMemoryState, state::NotKeyed, Quota, RateLimiter};
use std::num::NonZeroU32;

/// Rate limiter for outbound transliteration dispatches.
/// Uses a token bucket algorithm via governor crate.
///
/// A skipped dispatch is not an error: the trailing word simply stays in
/// source script and further edits re-trigger it.
pub struct DispatchRateLimiter {
    /// The underlying rate limiter from governor
    limiter: RateLimiter<NotKeyed, InMemoryState, clock::DefaultClock>,
    /// Whether rate limiting is enabled
    enabled: bool,
}

impl DispatchRateLimiter {
    /// Create a new rate limiter with the specified configuration.
    ///
    /// # Arguments
    /// * `requests_per_second` - Maximum sustained rate of dispatches (e.g., 5)
    /// * `burst_capacity` - Maximum burst of dispatches (e.g., 10)
    /// * `enabled` - Whether rate limiting is enabled
    ///
    /// # Panics
    /// Panics if `requests_per_second` or `burst_capacity` is 0
    pub fn new(requests_per_second: u32, burst_capacity: u32, enabled: bool) -> Self {
        let quota = Quota::per_second(Self::non_zero(requests_per_second))
            .allow_burst(Self::non_zero(burst_capacity));

        Self {
            limiter: RateLimiter::direct(quota),
            enabled,
        }
    }

    /// Check if a dispatch is allowed to proceed.
    ///
    /// This is an immediate check that does not wait for tokens to become
    /// available; a rate-limited dispatch is skipped, never queued.
    pub fn check(&self) -> bool {
        if !self.enabled {
            return true;
        }

        self.limiter.check().is_ok()
    }

    /// Convert u32 to NonZeroU32, panicking if value is 0.
    fn non_zero(value: u32) -> NonZeroU32 {
        NonZeroU32::new(value).expect("requests_per_second and burst_capacity must be non-zero")
    }
}
