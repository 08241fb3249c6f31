//! # Shaped Controller
//!
//! Wraps an [`InputSource`] with four [`AxisPipeline`]s, one per stick axis.
//! The two axes of each stick share that stick's [`ShapingConfig`]; every
//! axis keeps its own rate limiter.
//!
//! ## Usage
//!
//! ```
//! use stick_shaper::controller::{InputSource, RawFrame, ReplaySource, ShapedController};
//! use stick_shaper::shaping::{ResponseCurve, ShapingConfig};
//!
//! let config = ShapingConfig::new(0.1, ResponseCurve::linear(), 0.5, 1.0, 2.0)?;
//! let source = ReplaySource::new(vec![RawFrame { left_y: 1.0, ..RawFrame::default() }]);
//!
//! let mut controller = ShapedController::new(source, config, config, 0.0);
//! controller.source_mut().poll()?;
//!
//! let sticks = controller.sample(0.25);
//! assert_eq!(sticks.left_y, 0.5);
//! assert_eq!(sticks.right_x, 0.0);
//! # Ok::<(), stick_shaper::error::ShaperError>(())
//! ```

use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use super::input::{Axis, InputSource, StickGroup, Trigger};
use crate::shaping::{AxisPipeline, ShapingConfig, TriggerReading};

/// Shaped output of all four axes for one control cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ShapedSticks {
    /// Shaped left stick X.
    pub left_x: f64,
    /// Shaped left stick Y.
    pub left_y: f64,
    /// Shaped right stick X.
    pub right_x: f64,
    /// Shaped right stick Y.
    pub right_y: f64,
}

/// An input source with per-axis shaping applied.
#[derive(Debug)]
pub struct ShapedController<S> {
    source: S,
    left_x: AxisPipeline,
    left_y: AxisPipeline,
    right_x: AxisPipeline,
    right_y: AxisPipeline,
}

impl<S: InputSource> ShapedController<S> {
    /// Creates a shaped controller at rest.
    ///
    /// # Arguments
    ///
    /// * `source` - Raw input provider
    /// * `left_stick` - Shaping shared by the left stick's X and Y axes
    /// * `right_stick` - Shaping shared by the right stick's X and Y axes
    /// * `now` - Construction timestamp in seconds on the control clock
    #[must_use]
    pub fn new(source: S, left_stick: ShapingConfig, right_stick: ShapingConfig, now: f64) -> Self {
        let left = Arc::new(left_stick);
        let right = Arc::new(right_stick);
        debug!(
            left_rate_limit = left.rate_limit(),
            right_rate_limit = right.rate_limit(),
            "Shaped controller created"
        );

        Self {
            source,
            left_x: AxisPipeline::new(Arc::clone(&left), now),
            left_y: AxisPipeline::new(left, now),
            right_x: AxisPipeline::new(Arc::clone(&right), now),
            right_y: AxisPipeline::new(right, now),
        }
    }

    /// Returns the wrapped input source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the wrapped input source mutably, e.g. to poll it.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Returns the shaping configuration of a stick.
    #[must_use]
    pub fn shaping(&self, group: StickGroup) -> &ShapingConfig {
        match group {
            StickGroup::Left => self.left_x.config(),
            StickGroup::Right => self.right_x.config(),
        }
    }

    /// Reads both triggers from the source.
    #[must_use]
    pub fn triggers(&self) -> TriggerReading {
        TriggerReading::new(
            self.source.trigger_axis(Trigger::Left),
            self.source.trigger_axis(Trigger::Right),
        )
    }

    /// Samples a single axis at `now`, reading the triggers fresh.
    pub fn axis(&mut self, axis: Axis, now: f64) -> f64 {
        let triggers = self.triggers();
        self.sample_axis(axis, triggers, now)
    }

    /// Shaped left stick X at `now`.
    pub fn left_x(&mut self, now: f64) -> f64 {
        self.axis(Axis::LeftX, now)
    }

    /// Shaped left stick Y at `now`.
    pub fn left_y(&mut self, now: f64) -> f64 {
        self.axis(Axis::LeftY, now)
    }

    /// Shaped right stick X at `now`.
    pub fn right_x(&mut self, now: f64) -> f64 {
        self.axis(Axis::RightX, now)
    }

    /// Shaped right stick Y at `now`.
    pub fn right_y(&mut self, now: f64) -> f64 {
        self.axis(Axis::RightY, now)
    }

    /// Samples all four axes with one trigger reading and one timestamp.
    pub fn sample(&mut self, now: f64) -> ShapedSticks {
        let triggers = self.triggers();
        ShapedSticks {
            left_x: self.sample_axis(Axis::LeftX, triggers, now),
            left_y: self.sample_axis(Axis::LeftY, triggers, now),
            right_x: self.sample_axis(Axis::RightX, triggers, now),
            right_y: self.sample_axis(Axis::RightY, triggers, now),
        }
    }

    fn sample_axis(&mut self, axis: Axis, triggers: TriggerReading, now: f64) -> f64 {
        let raw = self.source.raw_axis(axis);
        let pipeline = match axis {
            Axis::LeftX => &mut self.left_x,
            Axis::LeftY => &mut self.left_y,
            Axis::RightX => &mut self.right_x,
            Axis::RightY => &mut self.right_y,
        };
        pipeline.sample(raw, triggers, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::input::MockInputSource;
    use crate::shaping::ResponseCurve;
    use mockall::predicate::eq;

    fn linear(left_mult: f64, right_mult: f64, rate_limit: f64) -> ShapingConfig {
        ShapingConfig::new(0.0, ResponseCurve::linear(), left_mult, right_mult, rate_limit).unwrap()
    }

    fn mock_with(axes: [f64; 4], left_trigger: f64, right_trigger: f64) -> MockInputSource {
        let mut source = MockInputSource::new();
        source
            .expect_raw_axis()
            .returning(move |axis| match axis {
                Axis::LeftX => axes[0],
                Axis::LeftY => axes[1],
                Axis::RightX => axes[2],
                Axis::RightY => axes[3],
            });
        source
            .expect_trigger_axis()
            .with(eq(Trigger::Left))
            .returning(move |_| left_trigger);
        source
            .expect_trigger_axis()
            .with(eq(Trigger::Right))
            .returning(move |_| right_trigger);
        source
    }

    fn build(
        source: MockInputSource,
        left_stick: ShapingConfig,
        right_stick: ShapingConfig,
    ) -> ShapedController<MockInputSource> {
        ShapedController::new(source, left_stick, right_stick, 0.0)
    }

    // ==================== Sampling Tests ====================

    #[test]
    fn test_sample_all_axes() {
        let source = mock_with([0.2, -0.4, 0.6, -0.8], 0.0, 0.0);
        let mut controller = build(source, linear(1.0, 1.0, 100.0), linear(1.0, 1.0, 100.0));

        let sticks = controller.sample(1.0);
        assert!((sticks.left_x - 0.2).abs() < 1e-12);
        assert!((sticks.left_y - (-0.4)).abs() < 1e-12);
        assert!((sticks.right_x - 0.6).abs() < 1e-12);
        assert!((sticks.right_y - (-0.8)).abs() < 1e-12);
    }

    #[test]
    fn test_each_axis_has_own_rate_limiter() {
        let source = mock_with([1.0, 1.0, 1.0, 1.0], 0.0, 0.0);
        let mut controller = build(source, linear(1.0, 1.0, 1.0), linear(1.0, 1.0, 1.0));

        // Sampling one axis must not consume another axis's elapsed time
        assert_eq!(controller.left_x(0.5), 0.5);
        assert_eq!(controller.left_y(0.5), 0.5);
        assert_eq!(controller.right_x(0.5), 0.5);
        assert_eq!(controller.right_y(0.5), 0.5);
    }

    #[test]
    fn test_stick_groups_use_their_own_config() {
        let source = mock_with([1.0, 1.0, 1.0, 1.0], 0.0, 0.0);
        let mut controller = build(source, linear(1.0, 1.0, 1.0), linear(1.0, 1.0, 4.0));

        let sticks = controller.sample(0.1);
        assert!((sticks.left_x - 0.1).abs() < 1e-12);
        assert!((sticks.left_y - 0.1).abs() < 1e-12);
        assert!((sticks.right_x - 0.4).abs() < 1e-12);
        assert!((sticks.right_y - 0.4).abs() < 1e-12);

        assert_eq!(controller.shaping(StickGroup::Left).rate_limit(), 1.0);
        assert_eq!(controller.shaping(StickGroup::Right).rate_limit(), 4.0);
    }

    #[test]
    fn test_triggers_apply_per_stick_multipliers() {
        // Left trigger fully pressed, right released
        let source = mock_with([0.5, 0.5, 0.5, 0.5], 1.0, 0.0);
        let mut controller = build(source, linear(0.5, 1.0, 100.0), linear(0.25, 1.0, 100.0));

        let sticks = controller.sample(1.0);
        assert!((sticks.left_x - 0.25).abs() < 1e-12);
        assert!((sticks.right_y - 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_triggers_read_once_per_sample() {
        let mut source = MockInputSource::new();
        source.expect_raw_axis().times(4).returning(|_| 0.0);
        source
            .expect_trigger_axis()
            .with(eq(Trigger::Left))
            .times(1)
            .returning(|_| 0.0);
        source
            .expect_trigger_axis()
            .with(eq(Trigger::Right))
            .times(1)
            .returning(|_| 0.0);

        let mut controller = build(source, linear(1.0, 1.0, 1.0), linear(1.0, 1.0, 1.0));
        let _ = controller.sample(0.02);
    }

    #[test]
    fn test_trigger_snapshot() {
        let source = mock_with([0.0; 4], 0.3, 0.9);
        let controller = build(source, linear(1.0, 1.0, 1.0), linear(1.0, 1.0, 1.0));
        assert_eq!(controller.triggers(), TriggerReading::new(0.3, 0.9));
    }

    #[test]
    fn test_saturated_input_ramps_from_rest() {
        let source = mock_with([-1.0, 0.0, 0.0, 0.0], 0.0, 0.0);
        let mut controller = build(source, linear(1.0, 1.0, 2.0), linear(1.0, 1.0, 2.0));

        assert!((controller.left_x(0.1) - (-0.2)).abs() < 1e-12);
        assert!((controller.left_x(0.2) - (-0.4)).abs() < 1e-12);
    }
}
