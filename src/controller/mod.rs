//! # Controller Module
//!
//! Dual-stick controller input with shaping applied.
//!
//! This module handles:
//! - Abstracting raw stick and trigger readings behind [`InputSource`]
//! - Replaying recorded input from JSON Lines scripts
//! - Running one shaping pipeline per stick axis

pub mod input;
pub mod replay;
pub mod shaped;

pub use input::{Axis, InputSource, SourceStatus, StickGroup, Trigger};
pub use replay::{RawFrame, ReplaySource};
pub use shaped::{ShapedController, ShapedSticks};
