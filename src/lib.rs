//! # Stick Shaper Library
//!
//! Shapes raw dual-stick joystick input for real-time control of a physical
//! actuator such as a drivetrain.
//!
//! Every axis sample runs through deadzone remapping, a two-term response
//! curve, trigger-driven gain and slew-rate limiting, in that order. The
//! rate limit is applied last, so it always holds.

pub mod config;
pub mod control_loop;
pub mod controller;
pub mod error;
pub mod shaping;

#[cfg(test)]
pub(crate) mod log_capture;
