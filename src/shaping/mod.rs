//! # Shaping Module
//!
//! Per-axis input shaping for dual-stick controllers.
//!
//! This module handles:
//! - Linear range remapping
//! - Deadzones that rescale the surviving range to full scale
//! - Two-term weighted-power response curves
//! - Trigger-driven gain (precision and boost modes)
//! - Slew-rate limiting of the final output
//! - Composing the stages into one pipeline per axis

pub mod curve;
pub mod deadzone;
pub mod gain;
pub mod pipeline;
pub mod rate_limiter;
pub mod remap;

pub use curve::ResponseCurve;
pub use deadzone::apply_deadzone;
pub use gain::{apply_gain, trigger_factor};
pub use pipeline::{AxisPipeline, ShapingConfig, TriggerReading};
pub use rate_limiter::RateLimiter;
pub use remap::remap;
