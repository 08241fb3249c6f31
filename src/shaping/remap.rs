//! # Range Remapping
//!
//! Linear mapping of a value from one range onto another. Used by the
//! deadzone stage to stretch the surviving stick range back to full scale,
//! and by the gain stage to turn a trigger position into a multiplier.

/// Linearly maps `value` from the range `[low1, high1]` onto `[low2, high2]`.
///
/// Values outside the source range are extrapolated, not clamped.
///
/// # Panics
///
/// Panics if `high1 == low1`. A zero-width source range can only come from a
/// programming error, never from live stick data.
///
/// # Examples
///
/// ```
/// use stick_shaper::shaping::remap;
///
/// assert_eq!(remap(0.5, 0.0, 1.0, 0.0, 10.0), 5.0);
/// assert_eq!(remap(-1.0, -1.0, 1.0, 0.0, 100.0), 0.0);
/// ```
#[must_use]
pub fn remap(value: f64, low1: f64, high1: f64, low2: f64, high2: f64) -> f64 {
    let source_size = high1 - low1;
    assert!(
        source_size != 0.0,
        "cannot remap from a zero-width range [{}, {}]",
        low1,
        high1
    );

    let fraction = (value - low1) / source_size;
    low2 + (high2 - low2) * fraction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remap_midpoint() {
        assert_eq!(remap(0.5, 0.0, 1.0, 0.0, 10.0), 5.0);
    }

    #[test]
    fn test_remap_lower_bound() {
        assert_eq!(remap(-1.0, -1.0, 1.0, 0.0, 100.0), 0.0);
    }

    #[test]
    fn test_remap_upper_bound() {
        assert_eq!(remap(1.0, -1.0, 1.0, 0.0, 100.0), 100.0);
    }

    #[test]
    fn test_remap_inverted_destination() {
        // Destination ranges may run high to low
        assert_eq!(remap(0.25, 0.0, 1.0, 1.0, 0.0), 0.75);
    }

    #[test]
    fn test_remap_negative_ranges() {
        // Negative half of the deadzone stretch: [-0.1, -1] onto [0, -1]
        let result = remap(-0.55, -0.1, -1.0, 0.0, -1.0);
        assert!((result - (-0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_remap_extrapolates() {
        assert_eq!(remap(2.0, 0.0, 1.0, 0.0, 10.0), 20.0);
    }

    #[test]
    #[should_panic(expected = "zero-width range")]
    fn test_remap_degenerate_source_panics() {
        let _ = remap(0.5, 1.0, 1.0, 0.0, 10.0);
    }
}
