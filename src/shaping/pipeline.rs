//! # Axis Pipeline
//!
//! Composes the shaping stages for one stick axis:
//!
//! ```text
//! raw ──► deadzone ──► curve ──► trigger gain ──► rate limit ──► output
//! ```
//!
//! The order is fixed. The deadzone runs first so the curve only ever sees
//! genuine post-deadzone signal. The gain follows the curve so the triggers
//! scale the shaped response rather than raw stick travel. Rate limiting
//! runs last so nothing can undo its bound.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use stick_shaper::shaping::{AxisPipeline, ResponseCurve, ShapingConfig, TriggerReading};
//!
//! let config = Arc::new(ShapingConfig::new(
//!     0.1,                                   // deadzone
//!     ResponseCurve::new(3.0, 0.0, 1.0, 0.0), // pure cubic
//!     1.0,                                   // left trigger multiplier
//!     1.0,                                   // right trigger multiplier
//!     1.0,                                   // rate limit (units/s)
//! )?);
//!
//! let mut pipeline = AxisPipeline::new(config, 0.0);
//! let triggers = TriggerReading::released();
//!
//! assert_eq!(pipeline.sample(1.0, triggers, 0.5), 0.5);
//! assert_eq!(pipeline.sample(1.0, triggers, 1.5), 1.0);
//! # Ok::<(), stick_shaper::error::ShaperError>(())
//! ```

use std::sync::Arc;

use tracing::debug;

use super::curve::ResponseCurve;
use super::deadzone::apply_deadzone;
use super::gain::apply_gain;
use super::rate_limiter::RateLimiter;
use crate::error::{Result, ShaperError};

/// Immutable shaping parameters shared by the two axes of one stick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapingConfig {
    deadzone: f64,
    curve: ResponseCurve,
    left_trigger_multiplier: f64,
    right_trigger_multiplier: f64,
    rate_limit: f64,
}

impl ShapingConfig {
    /// Creates a validated shaping configuration.
    ///
    /// # Arguments
    ///
    /// * `deadzone` - Deadzone half-width, `0.0 <= deadzone < 1.0`
    /// * `curve` - Response curve applied after the deadzone
    /// * `left_trigger_multiplier` - Gain at full left trigger, finite
    /// * `right_trigger_multiplier` - Gain at full right trigger, finite
    /// * `rate_limit` - Maximum output change per second, finite and `> 0`
    ///
    /// # Errors
    ///
    /// Returns [`ShaperError::InvalidShaping`] if any parameter is out of range.
    pub fn new(
        deadzone: f64,
        curve: ResponseCurve,
        left_trigger_multiplier: f64,
        right_trigger_multiplier: f64,
        rate_limit: f64,
    ) -> Result<Self> {
        if !(0.0..1.0).contains(&deadzone) {
            return Err(ShaperError::InvalidShaping(format!(
                "deadzone must be in [0.0, 1.0), got {}",
                deadzone
            )));
        }

        for (name, value) in [
            ("left_trigger_multiplier", left_trigger_multiplier),
            ("right_trigger_multiplier", right_trigger_multiplier),
        ] {
            if !value.is_finite() {
                return Err(ShaperError::InvalidShaping(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }

        if !rate_limit.is_finite() || rate_limit <= 0.0 {
            return Err(ShaperError::InvalidShaping(format!(
                "rate_limit must be finite and greater than 0, got {}",
                rate_limit
            )));
        }

        Ok(Self {
            deadzone,
            curve,
            left_trigger_multiplier,
            right_trigger_multiplier,
            rate_limit,
        })
    }

    /// Returns the deadzone half-width.
    #[must_use]
    pub fn deadzone(&self) -> f64 {
        self.deadzone
    }

    /// Returns the response curve.
    #[must_use]
    pub fn curve(&self) -> &ResponseCurve {
        &self.curve
    }

    /// Returns the gain applied at full left trigger.
    #[must_use]
    pub fn left_trigger_multiplier(&self) -> f64 {
        self.left_trigger_multiplier
    }

    /// Returns the gain applied at full right trigger.
    #[must_use]
    pub fn right_trigger_multiplier(&self) -> f64 {
        self.right_trigger_multiplier
    }

    /// Returns the maximum output change per second.
    #[must_use]
    pub fn rate_limit(&self) -> f64 {
        self.rate_limit
    }

    /// Runs deadzone, curve and gain, without rate limiting.
    ///
    /// # Examples
    ///
    /// ```
    /// use stick_shaper::shaping::{ResponseCurve, ShapingConfig, TriggerReading};
    ///
    /// let config = ShapingConfig::new(0.1, ResponseCurve::linear(), 0.5, 1.0, 3.0)?;
    ///
    /// assert_eq!(config.shape(0.05, TriggerReading::released()), 0.0);
    /// assert_eq!(config.shape(1.0, TriggerReading::new(1.0, 0.0)), 0.5);
    /// # Ok::<(), stick_shaper::error::ShaperError>(())
    /// ```
    #[must_use]
    pub fn shape(&self, raw: f64, triggers: TriggerReading) -> f64 {
        let deadzoned = apply_deadzone(raw, self.deadzone);
        let curved = self.curve.apply(deadzoned);
        apply_gain(
            curved,
            triggers.left,
            triggers.right,
            self.left_trigger_multiplier,
            self.right_trigger_multiplier,
        )
    }
}

/// Trigger positions read once per control cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TriggerReading {
    /// Left trigger, 0.0 released to 1.0 fully pressed.
    pub left: f64,
    /// Right trigger, 0.0 released to 1.0 fully pressed.
    pub right: f64,
}

impl TriggerReading {
    /// Creates a trigger reading.
    #[must_use]
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    /// Both triggers released.
    #[must_use]
    pub fn released() -> Self {
        Self::default()
    }
}

/// Full shaping pipeline for a single axis.
///
/// Holds the stick group's shared [`ShapingConfig`] and its own
/// [`RateLimiter`]. The limiter state is never reset; build a new pipeline
/// to start again from rest.
#[derive(Debug, Clone)]
pub struct AxisPipeline {
    config: Arc<ShapingConfig>,
    limiter: RateLimiter,
}

impl AxisPipeline {
    /// Creates a pipeline at rest, constructed at timestamp `now` (seconds).
    #[must_use]
    pub fn new(config: Arc<ShapingConfig>, now: f64) -> Self {
        let limiter = RateLimiter::new(config.rate_limit(), now);
        debug!(
            deadzone = config.deadzone(),
            rate_limit = config.rate_limit(),
            "Axis pipeline created"
        );
        Self { config, limiter }
    }

    /// Returns the shared shaping configuration.
    #[must_use]
    pub fn config(&self) -> &ShapingConfig {
        &self.config
    }

    /// Returns the last emitted output.
    #[must_use]
    pub fn last_output(&self) -> f64 {
        self.limiter.previous_output()
    }

    /// Shapes one raw sample and returns the rate-limited output.
    ///
    /// # Arguments
    ///
    /// * `raw` - Raw stick value (-1.0 to 1.0)
    /// * `triggers` - Trigger positions for this control cycle
    /// * `now` - Monotonic timestamp in seconds
    pub fn sample(&mut self, raw: f64, triggers: TriggerReading, now: f64) -> f64 {
        let target = self.config.shape(raw, triggers);
        self.limiter.calculate(target, now)
    }
}
