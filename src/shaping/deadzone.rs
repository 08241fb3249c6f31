//! # Deadzone Stage
//!
//! Eliminates small stick movements near center to prevent drift. Values
//! within the deadzone become exactly `0.0`; values outside are stretched so
//! the surviving range `(deadzone, 1]` covers `(0, 1]` again. There is no
//! jump at the deadzone edge: an input just past the threshold produces an
//! output just above zero.

use super::remap::remap;

/// Applies a symmetric deadzone to a normalized stick value.
///
/// Input is expected to be pre-clamped to `-1.0..=1.0` by the input source;
/// this stage does not clamp.
///
/// # Arguments
///
/// * `value` - Normalized stick value (-1.0 to 1.0)
/// * `deadzone` - Deadzone half-width, `0.0 <= deadzone < 1.0`
///
/// # Examples
///
/// ```
/// use stick_shaper::shaping::apply_deadzone;
///
/// assert_eq!(apply_deadzone(0.05, 0.1), 0.0);
/// assert_eq!(apply_deadzone(1.0, 0.1), 1.0);
/// assert_eq!(apply_deadzone(-1.0, 0.1), -1.0);
/// ```
#[must_use]
pub fn apply_deadzone(value: f64, deadzone: f64) -> f64 {
    if value.abs() <= deadzone {
        return 0.0;
    }

    let sign = value.signum();
    remap(value, sign * deadzone, sign, 0.0, sign)
}
