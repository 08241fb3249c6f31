//! # Trigger Gain Stage
//!
//! Scales the curved stick value by two trigger-driven factors. Each trigger
//! position (0.0 released, 1.0 fully pressed) is interpolated between `1.0`
//! and its configured multiplier, so a released trigger has no effect and a
//! fully pressed trigger applies the whole multiplier. A multiplier above
//! 1.0 acts as a boost, one below 1.0 as a precision mode. Both factors
//! multiply together, so pressing both triggers stacks their effects.

use super::remap::remap;

/// Converts a trigger position into a gain factor in `[1.0, multiplier]`.
///
/// # Examples
///
/// ```
/// use stick_shaper::shaping::trigger_factor;
///
/// assert_eq!(trigger_factor(0.0, 0.5), 1.0);
/// assert_eq!(trigger_factor(1.0, 0.5), 0.5);
/// ```
#[inline]
#[must_use]
pub fn trigger_factor(trigger: f64, multiplier: f64) -> f64 {
    remap(trigger, 0.0, 1.0, 1.0, multiplier)
}

/// Applies both trigger gains to a curved stick value.
///
/// # Arguments
///
/// * `value` - Curved stick value
/// * `left_trigger` - Left trigger position (0.0 to 1.0)
/// * `right_trigger` - Right trigger position (0.0 to 1.0)
/// * `left_multiplier` - Gain applied at full left trigger
/// * `right_multiplier` - Gain applied at full right trigger
///
/// # Examples
///
/// ```
/// use stick_shaper::shaping::apply_gain;
///
/// // Triggers at rest leave the value untouched
/// assert_eq!(apply_gain(0.8, 0.0, 0.0, 0.5, 2.0), 0.8);
///
/// // Both fully pressed stack multiplicatively
/// assert!((apply_gain(0.8, 1.0, 1.0, 0.5, 2.0) - 0.8).abs() < 1e-12);
/// ```
#[must_use]
pub fn apply_gain(
    value: f64,
    left_trigger: f64,
    right_trigger: f64,
    left_multiplier: f64,
    right_multiplier: f64,
) -> f64 {
    let left_factor = trigger_factor(left_trigger, left_multiplier);
    let right_factor = trigger_factor(right_trigger, right_multiplier);
    value * left_factor * right_factor
}
