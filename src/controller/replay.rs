//! # Replay Input Source
//!
//! A scripted [`InputSource`] that plays back recorded controller frames
//! from a JSON Lines file, one frame per control cycle. Useful for bench
//! testing a shaping configuration without hardware attached.
//!
//! ## Format
//!
//! Each non-blank line is one [`RawFrame`]. Missing fields default to `0.0`:
//!
//! ```text
//! {"left_y": 0.0}
//! {"left_y": 1.0, "right_trigger": 0.5}
//! {"left_x": -0.4, "left_y": 1.0, "left_trigger": 1.0}
//! ```
//!
//! Stick values are clamped to `-1.0..=1.0` and triggers to `0.0..=1.0`
//! when loaded, so the shaping stages always see in-range input.

use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

use super::input::{Axis, InputSource, SourceStatus, Trigger};
use crate::error::{Result, ShaperError};

/// One recorded controller reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawFrame {
    /// Left stick X (-1.0 to 1.0).
    pub left_x: f64,
    /// Left stick Y (-1.0 to 1.0).
    pub left_y: f64,
    /// Right stick X (-1.0 to 1.0).
    pub right_x: f64,
    /// Right stick Y (-1.0 to 1.0).
    pub right_y: f64,
    /// Left trigger (0.0 to 1.0).
    pub left_trigger: f64,
    /// Right trigger (0.0 to 1.0).
    pub right_trigger: f64,
}

impl RawFrame {
    /// Returns a copy with every value clamped to its valid range.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            left_x: self.left_x.clamp(-1.0, 1.0),
            left_y: self.left_y.clamp(-1.0, 1.0),
            right_x: self.right_x.clamp(-1.0, 1.0),
            right_y: self.right_y.clamp(-1.0, 1.0),
            left_trigger: self.left_trigger.clamp(0.0, 1.0),
            right_trigger: self.right_trigger.clamp(0.0, 1.0),
        }
    }
}

/// Plays back a fixed sequence of [`RawFrame`]s.
///
/// Before the first [`poll`](InputSource::poll) every reading is at rest.
/// Each poll latches the next frame; once all frames are consumed the source
/// reports [`SourceStatus::Exhausted`] and keeps returning the last frame.
///
/// # Examples
///
/// ```
/// use stick_shaper::controller::{Axis, InputSource, ReplaySource, SourceStatus};
///
/// let script = "{\"left_x\": 0.5}\n{\"left_x\": 2.0}\n";
/// let mut source = ReplaySource::from_reader(script.as_bytes())?;
///
/// assert_eq!(source.poll()?, SourceStatus::Ready);
/// assert_eq!(source.raw_axis(Axis::LeftX), 0.5);
///
/// assert_eq!(source.poll()?, SourceStatus::Ready);
/// assert_eq!(source.raw_axis(Axis::LeftX), 1.0); // clamped
///
/// assert_eq!(source.poll()?, SourceStatus::Exhausted);
/// # Ok::<(), stick_shaper::error::ShaperError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ReplaySource {
    frames: Vec<RawFrame>,
    next: usize,
    current: RawFrame,
}

impl ReplaySource {
    /// Creates a replay source from in-memory frames.
    #[must_use]
    pub fn new(frames: Vec<RawFrame>) -> Self {
        Self {
            frames: frames.into_iter().map(RawFrame::clamped).collect(),
            next: 0,
            current: RawFrame::default(),
        }
    }

    /// Loads a replay script from a JSON Lines file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or a line is not a valid frame.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let source = Self::from_reader(BufReader::new(file))?;
        info!(
            "Loaded {} replay frames from {}",
            source.len(),
            path.display()
        );
        Ok(source)
    }

    /// Parses a replay script from any buffered reader.
    ///
    /// # Errors
    ///
    /// Returns [`ShaperError::Input`] naming the offending line if a frame
    /// cannot be parsed, or [`ShaperError::Io`] if reading fails.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut frames = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let frame: RawFrame = serde_json::from_str(trimmed).map_err(|e| {
                ShaperError::Input(format!("line {}: {}", index + 1, e))
            })?;
            frames.push(frame);
        }

        debug!("Parsed {} replay frames", frames.len());
        Ok(Self::new(frames))
    }

    /// Number of frames in the script.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if the script has no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The currently latched frame.
    #[must_use]
    pub fn current(&self) -> &RawFrame {
        &self.current
    }
}

impl InputSource for ReplaySource {
    fn poll(&mut self) -> Result<SourceStatus> {
        match self.frames.get(self.next) {
            Some(frame) => {
                self.current = *frame;
                self.next += 1;
                Ok(SourceStatus::Ready)
            }
            None => Ok(SourceStatus::Exhausted),
        }
    }

    fn raw_axis(&self, axis: Axis) -> f64 {
        match axis {
            Axis::LeftX => self.current.left_x,
            Axis::LeftY => self.current.left_y,
            Axis::RightX => self.current.right_x,
            Axis::RightY => self.current.right_y,
        }
    }

    fn trigger_axis(&self, trigger: Trigger) -> f64 {
        match trigger {
            Trigger::Left => self.current.left_trigger,
            Trigger::Right => self.current.right_trigger,
        }
    }
}
