//! # Rate Limiter Stage
//!
//! Bounds how quickly the shaped output may change. Every call moves the
//! output toward the target by at most `rate_limit * elapsed` units, where
//! `elapsed` is the time since the previous call. This is the last stage of
//! the pipeline, so the bound holds for whatever the earlier stages emit,
//! including an instant full reversal.
//!
//! Timestamps are seconds on a monotonic clock. A timestamp earlier than the
//! latest one seen is treated as zero elapsed time and does not move the
//! limiter's clock back.

/// Slew-rate limiter for a single axis.
///
/// # Examples
///
/// ```
/// use stick_shaper::shaping::RateLimiter;
///
/// let mut limiter = RateLimiter::new(1.0, 0.0);
///
/// // Target jumps to 1.0, but only half a second has passed
/// assert_eq!(limiter.calculate(1.0, 0.5), 0.5);
/// assert_eq!(limiter.calculate(1.0, 1.5), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimiter {
    /// Maximum output change per second.
    rate_limit: f64,
    previous_output: f64,
    last_update: f64,
}

impl RateLimiter {
    /// Creates a limiter at rest (`previous_output = 0.0`).
    ///
    /// # Arguments
    ///
    /// * `rate_limit` - Maximum output change per second, finite and positive
    /// * `now` - Construction timestamp in seconds
    #[must_use]
    pub fn new(rate_limit: f64, now: f64) -> Self {
        Self {
            rate_limit,
            previous_output: 0.0,
            last_update: now,
        }
    }

    /// Returns the configured rate limit.
    #[must_use]
    pub fn rate_limit(&self) -> f64 {
        self.rate_limit
    }

    /// Returns the last emitted output.
    #[must_use]
    pub fn previous_output(&self) -> f64 {
        self.previous_output
    }

    /// Returns the latest timestamp seen so far.
    #[must_use]
    pub fn last_update(&self) -> f64 {
        self.last_update
    }

    /// Moves toward `target` by no more than the rate limit allows and
    /// returns the new output.
    pub fn calculate(&mut self, target: f64, now: f64) -> f64 {
        let elapsed = (now - self.last_update).max(0.0);
        let max_delta = self.rate_limit * elapsed;

        // NaN targets pass through clamp unchanged
        let delta = (target - self.previous_output).clamp(-max_delta, max_delta);

        self.previous_output += delta;
        // Latest timestamp wins; a rewound clock adds no elapsed time later
        self.last_update = self.last_update.max(now);
        self.previous_output
    }
}
