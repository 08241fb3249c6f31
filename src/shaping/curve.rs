//! # Response Curve Stage
//!
//! Two-term weighted-power curve:
//!
//! `output = coefficient1 * input^exponent1 + coefficient2 * input^exponent2`
//!
//! Blending a low-order term with a high-order term gives fine control near
//! center and an aggressive response near full deflection. With
//! `exponent1 = 3, coefficient1 = 0.7, exponent2 = 1, coefficient2 = 0.3`
//! the curve still maps `[-1, 1]` onto `[-1, 1]`. Keeping the coefficients
//! in that shape is up to whoever writes the configuration.
//!
//! Odd exponents keep the curve odd-symmetric (`f(-x) == -f(x)`). Even
//! exponents lose the sign of the input; they are allowed but reported.
//! Fractional exponents of negative inputs yield NaN, which propagates.

use tracing::warn;

/// Two-term weighted-power response curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseCurve {
    exponent1: f64,
    exponent2: f64,
    coefficient1: f64,
    coefficient2: f64,
}

impl Default for ResponseCurve {
    /// Linear response.
    fn default() -> Self {
        Self::linear()
    }
}

impl ResponseCurve {
    /// Creates a new curve from two exponent/coefficient pairs.
    ///
    /// Logs a warning when either exponent is even or not an integer. The
    /// curve is still built with the values as given.
    ///
    /// # Examples
    ///
    /// ```
    /// use stick_shaper::shaping::ResponseCurve;
    ///
    /// let curve = ResponseCurve::new(3.0, 1.0, 0.7, 0.3);
    /// assert!((curve.apply(1.0) - 1.0).abs() < 1e-12);
    /// assert!((curve.apply(-0.5) + curve.apply(0.5)).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn new(exponent1: f64, exponent2: f64, coefficient1: f64, coefficient2: f64) -> Self {
        let curve = Self {
            exponent1,
            exponent2,
            coefficient1,
            coefficient2,
        };

        if !curve.is_odd_symmetric() {
            warn!(
                exponent1,
                exponent2,
                "Exponents of joystick curve aren't odd, response will not be symmetric"
            );
        }

        curve
    }

    /// Identity curve: `1.0 * x^1 + 0.0 * x^1`.
    #[must_use]
    pub fn linear() -> Self {
        Self {
            exponent1: 1.0,
            exponent2: 1.0,
            coefficient1: 1.0,
            coefficient2: 0.0,
        }
    }

    /// Returns the first exponent.
    #[must_use]
    pub fn exponent1(&self) -> f64 {
        self.exponent1
    }

    /// Returns the second exponent.
    #[must_use]
    pub fn exponent2(&self) -> f64 {
        self.exponent2
    }

    /// Returns the weight of the first term.
    #[must_use]
    pub fn coefficient1(&self) -> f64 {
        self.coefficient1
    }

    /// Returns the weight of the second term.
    #[must_use]
    pub fn coefficient2(&self) -> f64 {
        self.coefficient2
    }

    /// Returns `true` when both exponents are odd integers.
    #[must_use]
    pub fn is_odd_symmetric(&self) -> bool {
        is_odd_integer(self.exponent1) && is_odd_integer(self.exponent2)
    }

    /// Evaluates the curve at `value`.
    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        let term1 = self.coefficient1 * value.powf(self.exponent1);
        let term2 = self.coefficient2 * value.powf(self.exponent2);
        term1 + term2
    }
}

#[inline]
fn is_odd_integer(exponent: f64) -> bool {
    exponent.fract() == 0.0 && exponent % 2.0 != 0.0
}
