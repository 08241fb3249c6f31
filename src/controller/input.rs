//! # Input Source Abstraction
//!
//! The shaping core never talks to a device directly. It reads through an
//! [`InputSource`], which exposes the four stick axes and the two analog
//! triggers as normalized values. Sources are polled once per control cycle.

use crate::error::Result;

/// Stick axes of a dual-stick controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left stick, horizontal.
    LeftX,
    /// Left stick, vertical.
    LeftY,
    /// Right stick, horizontal.
    RightX,
    /// Right stick, vertical.
    RightY,
}

impl Axis {
    /// All four axes in sampling order.
    pub const ALL: [Axis; 4] = [Axis::LeftX, Axis::LeftY, Axis::RightX, Axis::RightY];

    /// Returns the stick this axis belongs to.
    ///
    /// # Examples
    ///
    /// ```
    /// use stick_shaper::controller::{Axis, StickGroup};
    ///
    /// assert_eq!(Axis::LeftY.group(), StickGroup::Left);
    /// assert_eq!(Axis::RightX.group(), StickGroup::Right);
    /// ```
    #[must_use]
    pub fn group(self) -> StickGroup {
        match self {
            Axis::LeftX | Axis::LeftY => StickGroup::Left,
            Axis::RightX | Axis::RightY => StickGroup::Right,
        }
    }
}

/// Analog triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Left trigger (L2 / LT).
    Left,
    /// Right trigger (R2 / RT).
    Right,
}

/// The two sticks; each shares one shaping configuration across its axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StickGroup {
    /// Left stick.
    Left,
    /// Right stick.
    Right,
}

/// Result of polling an input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStatus {
    /// Fresh readings are available.
    Ready,
    /// The source has no more readings; the control loop should stop.
    Exhausted,
}

/// A polled source of raw controller readings.
///
/// Implementations must keep stick values within `-1.0..=1.0` and trigger
/// values within `0.0..=1.0`; the shaping stages do not clamp.
#[cfg_attr(test, mockall::automock)]
pub trait InputSource {
    /// Latches the next set of readings.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying source failed to produce a reading.
    fn poll(&mut self) -> Result<SourceStatus>;

    /// Current raw value of a stick axis (-1.0 to 1.0).
    fn raw_axis(&self, axis: Axis) -> f64;

    /// Current raw value of a trigger (0.0 released to 1.0 fully pressed).
    fn trigger_axis(&self, trigger: Trigger) -> f64;
}
