//! # Control Loop Module
//!
//! Drives a [`ShapedController`] at a fixed period.
//!
//! This module handles:
//! - Ticking at the configured control period
//! - Reading one monotonic timestamp per cycle, shared by all four axes
//! - Polling the input source and sampling the shaped sticks
//! - Handing each cycle's output to a [`SampleSink`]
//! - Stopping when the source is exhausted or on shutdown

pub mod sink;

pub use sink::{JsonlSink, SampleSink, ShapedRecord};

use std::future::Future;
use tokio::time::{interval, Duration, Instant};
use tracing::{debug, info};

use crate::controller::{InputSource, ShapedController, SourceStatus};
use crate::error::Result;

/// Fixed-period driver for a shaped controller.
///
/// Timestamps handed to the controller are seconds since the loop was
/// created, so the controller should be constructed with `now = 0.0`
/// immediately before the loop.
#[derive(Debug)]
pub struct ControlLoop<S, K> {
    controller: ShapedController<S>,
    sink: K,
    period: Duration,
    status_interval_ticks: u64,
    tick: u64,
    started: Instant,
}

impl<S: InputSource, K: SampleSink> ControlLoop<S, K> {
    /// Creates a control loop; its clock starts now.
    ///
    /// # Arguments
    ///
    /// * `controller` - Shaped controller constructed at `now = 0.0`
    /// * `sink` - Consumer of each cycle's output
    /// * `period` - Control cycle period
    /// * `status_interval_ticks` - Cycles between status log lines
    #[must_use]
    pub fn new(
        controller: ShapedController<S>,
        sink: K,
        period: Duration,
        status_interval_ticks: u64,
    ) -> Self {
        Self {
            controller,
            sink,
            period,
            status_interval_ticks: status_interval_ticks.max(1),
            tick: 0,
            started: Instant::now(),
        }
    }

    /// Number of cycles completed so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Seconds elapsed on the loop clock.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// Returns the driven controller.
    #[must_use]
    pub fn controller(&self) -> &ShapedController<S> {
        &self.controller
    }

    /// Returns the sink.
    #[must_use]
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Runs one control cycle at timestamp `now` (seconds).
    ///
    /// Polls the source, samples all four axes and publishes the record.
    /// Nothing is sampled or published once the source is exhausted.
    ///
    /// # Errors
    ///
    /// Returns error if polling the source or publishing the record fails.
    pub fn step(&mut self, now: f64) -> Result<SourceStatus> {
        if self.controller.source_mut().poll()? == SourceStatus::Exhausted {
            return Ok(SourceStatus::Exhausted);
        }

        let sticks = self.controller.sample(now);
        self.tick += 1;
        self.sink.publish(&ShapedRecord::new(self.tick, now, sticks))?;

        if self.tick % self.status_interval_ticks == 0 {
            info!(
                "Completed {} cycles ({:.1}s): left=({:.3}, {:.3}) right=({:.3}, {:.3})",
                self.tick, now, sticks.left_x, sticks.left_y, sticks.right_x, sticks.right_y
            );
        }

        Ok(SourceStatus::Ready)
    }

    /// Ticks at the configured period until the source is exhausted or
    /// `shutdown` resolves. Returns the number of cycles completed.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`step`](Self::step).
    pub async fn run_until<F: Future>(&mut self, shutdown: F) -> Result<u64> {
        let mut ticker = interval(self.period);
        tokio::pin!(shutdown);

        info!("Starting control loop at {}ms period", self.period.as_millis());

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let now = self.elapsed();
                    if self.step(now)? == SourceStatus::Exhausted {
                        info!("Input source exhausted after {} cycles", self.tick);
                        break;
                    }
                }

                _ = &mut shutdown => {
                    info!("Shutdown requested after {} cycles", self.tick);
                    break;
                }
            }
        }

        debug!("Control loop stopped at {:.3}s", self.elapsed());
        Ok(self.tick)
    }
}

#[cfg(test)]
mod tests {
    use super::sink::MockSampleSink;
    use super::*;
    use crate::controller::input::MockInputSource;
    use crate::controller::{RawFrame, ReplaySource};
    use crate::error::ShaperError;
    use crate::shaping::{ResponseCurve, ShapingConfig};

    fn step_config() -> ShapingConfig {
        ShapingConfig::new(0.1, ResponseCurve::new(3.0, 0.0, 1.0, 0.0), 1.0, 1.0, 1.0).unwrap()
    }

    fn replay(frames: usize) -> ReplaySource {
        ReplaySource::new(vec![
            RawFrame {
                left_y: 1.0,
                ..RawFrame::default()
            };
            frames
        ])
    }

    fn build<S: InputSource>(source: S) -> ControlLoop<S, JsonlSink<Vec<u8>>> {
        let controller = ShapedController::new(source, step_config(), step_config(), 0.0);
        ControlLoop::new(controller, JsonlSink::new(Vec::new()), Duration::from_millis(1), 1000)
    }

    // ==================== Step Tests ====================

    #[test]
    fn test_step_publishes_record() {
        let mut control_loop = build(replay(2));

        assert_eq!(control_loop.step(0.5).unwrap(), SourceStatus::Ready);
        assert_eq!(control_loop.step(1.5).unwrap(), SourceStatus::Ready);
        assert_eq!(control_loop.ticks(), 2);

        let output = String::from_utf8(control_loop.sink.into_inner()).unwrap();
        let records: Vec<serde_json::Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["tick"], 1);
        assert_eq!(records[0]["left_y"], 0.5);
        assert_eq!(records[1]["tick"], 2);
        assert_eq!(records[1]["left_y"], 1.0);
        assert_eq!(records[1]["elapsed_s"], 1.5);
    }

    #[test]
    fn test_step_stops_when_exhausted() {
        let mut control_loop = build(replay(1));

        assert_eq!(control_loop.step(0.1).unwrap(), SourceStatus::Ready);
        assert_eq!(control_loop.step(0.2).unwrap(), SourceStatus::Exhausted);
        assert_eq!(control_loop.ticks(), 1);
    }

    #[test]
    fn test_step_skips_publish_when_exhausted() {
        let mut source = MockInputSource::new();
        source
            .expect_poll()
            .times(1)
            .returning(|| Ok(SourceStatus::Exhausted));

        let mut sink = MockSampleSink::new();
        sink.expect_publish().never();

        let controller = ShapedController::new(source, step_config(), step_config(), 0.0);
        let mut control_loop = ControlLoop::new(controller, sink, Duration::from_millis(20), 10);
        assert_eq!(control_loop.step(0.02).unwrap(), SourceStatus::Exhausted);
    }

    #[test]
    fn test_step_propagates_source_error() {
        let mut source = MockInputSource::new();
        source
            .expect_poll()
            .returning(|| Err(ShaperError::Input("device unplugged".to_string())));

        let mut control_loop = build(source);
        assert!(matches!(
            control_loop.step(0.02),
            Err(ShaperError::Input(_))
        ));
        assert_eq!(control_loop.ticks(), 0);
    }

    #[test]
    fn test_step_propagates_sink_error() {
        let mut sink = MockSampleSink::new();
        sink.expect_publish()
            .times(1)
            .returning(|_| Err(ShaperError::Input("sink closed".to_string())));

        let controller = ShapedController::new(replay(3), step_config(), step_config(), 0.0);
        let mut control_loop = ControlLoop::new(controller, sink, Duration::from_millis(20), 10);
        assert!(control_loop.step(0.02).is_err());
    }

    #[test]
    fn test_step_hands_records_to_sink_in_order() {
        let mut sink = MockSampleSink::new();
        let mut sequence = mockall::Sequence::new();
        for expected in 1..=3u64 {
            sink.expect_publish()
                .withf(move |record| record.tick == expected)
                .times(1)
                .in_sequence(&mut sequence)
                .returning(|_| Ok(()));
        }

        let controller = ShapedController::new(replay(3), step_config(), step_config(), 0.0);
        let mut control_loop = ControlLoop::new(controller, sink, Duration::from_millis(20), 2);
        for tick in 1..=3 {
            control_loop.step(tick as f64 * 0.02).unwrap();
        }
    }

    // ==================== Run Tests ====================

    #[test]
    fn test_run_until_source_exhausted() {
        let mut control_loop = build(replay(5));

        let ticks =
            tokio_test::block_on(control_loop.run_until(std::future::pending::<()>())).unwrap();
        assert_eq!(ticks, 5);

        let output = String::from_utf8(control_loop.sink.into_inner()).unwrap();
        let outputs: Vec<f64> = output
            .lines()
            .map(|line| {
                let record: serde_json::Value = serde_json::from_str(line).unwrap();
                record["left_y"].as_f64().unwrap()
            })
            .collect();

        assert_eq!(outputs.len(), 5);
        // Ramping up from rest, never past the target
        for pair in outputs.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        assert!(outputs.iter().all(|&value| (0.0..=1.0).contains(&value)));
    }

    #[test]
    fn test_run_until_shutdown() {
        let controller = ShapedController::new(replay(10), step_config(), step_config(), 0.0);
        // Only the immediate first tick can fire before shutdown
        let mut control_loop = ControlLoop::new(
            controller,
            JsonlSink::new(Vec::new()),
            Duration::from_secs(3600),
            1000,
        );

        let ticks = tokio_test::block_on(control_loop.run_until(async {})).unwrap();
        assert!(ticks <= 1);
    }
}
