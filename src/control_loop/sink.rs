//! # Sample Sinks
//!
//! Consumers of the shaped output, one [`ShapedRecord`] per control cycle.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::controller::ShapedSticks;
use crate::error::Result;

/// Shaped output of one control cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapedRecord {
    /// Control cycle counter, starting at 1.
    pub tick: u64,
    /// Seconds since the control loop started (monotonic).
    pub elapsed_s: f64,
    /// Wall-clock time the record was produced.
    pub recorded_at: DateTime<Utc>,
    /// The four shaped axis values.
    #[serde(flatten)]
    pub sticks: ShapedSticks,
}

impl ShapedRecord {
    /// Creates a record stamped with the current wall-clock time.
    #[must_use]
    pub fn new(tick: u64, elapsed_s: f64, sticks: ShapedSticks) -> Self {
        Self {
            tick,
            elapsed_s,
            recorded_at: Utc::now(),
            sticks,
        }
    }
}

/// Receives shaped records from the control loop.
#[cfg_attr(test, mockall::automock)]
pub trait SampleSink {
    /// Handles one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record could not be delivered.
    fn publish(&mut self, record: &ShapedRecord) -> Result<()>;
}

/// Writes records as JSON Lines.
///
/// # Examples
///
/// ```
/// use stick_shaper::control_loop::{JsonlSink, SampleSink, ShapedRecord};
/// use stick_shaper::controller::ShapedSticks;
///
/// let mut sink = JsonlSink::new(Vec::new());
/// sink.publish(&ShapedRecord::new(1, 0.02, ShapedSticks::default()))?;
///
/// let output = String::from_utf8(sink.into_inner()).unwrap();
/// assert!(output.starts_with("{\"tick\":1,"));
/// assert!(output.ends_with('\n'));
/// # Ok::<(), stick_shaper::error::ShaperError>(())
/// ```
#[derive(Debug)]
pub struct JsonlSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonlSink<W> {
    /// Creates a sink writing to `writer`.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SampleSink for JsonlSink<W> {
    fn publish(&mut self, record: &ShapedRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
