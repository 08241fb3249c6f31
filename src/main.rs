//! # Stick Shaper
//!
//! Replays recorded dual-stick controller input through the shaping
//! pipeline at a fixed control period and prints the shaped output.
//!
//! Shaped records go to stdout as JSON Lines; logs go to stderr (and to a
//! daily rolling file when `logging.log_dir` is set).

use anyhow::{Context, Result};
use std::env;
use std::io;
use tokio::time::Duration;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use stick_shaper::config::{Config, LoggingConfig};
use stick_shaper::control_loop::{ControlLoop, JsonlSink};
use stick_shaper::controller::{ReplaySource, ShapedController};

/// Configuration file used when no path is given on the command line
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// File name prefix for rolling log files
const LOG_FILE_PREFIX: &str = "stick-shaper.log";

/// Main entry point for Stick Shaper
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Load configuration (first argument, or `config/default.toml`)
///    - Set up logging with tracing subscriber
///    - Load the replay script and build the left/right stick shaping
///
/// 2. **Main Loop**
///    - Poll the replay source once per control period
///    - Sample all four shaped axes with one shared timestamp
///    - Write one JSON line per cycle to stdout
///
/// 3. **Shutdown**
///    - Stop when the replay is exhausted or on Ctrl+C
///    - Log total cycle count
///
/// # Errors
///
/// Returns error if:
/// - The configuration cannot be loaded or is invalid
/// - The replay script cannot be read or parsed
/// - Writing shaped output fails
///
/// # Examples
///
/// ```bash
/// cargo run --release -- config/default.toml > shaped.jsonl
/// ```
#[tokio::main]
async fn main() -> Result<()> {
    let config_path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load configuration from {}", config_path))?;

    let _log_guard = init_logging(&config.logging)?;

    info!("Stick Shaper v{} starting...", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded from {}", config_path);

    let source = ReplaySource::load(&config.input.replay_path)
        .with_context(|| format!("failed to load replay from {}", config.input.replay_path))?;

    let (left_stick, right_stick) = config.sticks()?;
    let controller = ShapedController::new(source, left_stick, right_stick, 0.0);
    let mut control_loop = ControlLoop::new(
        controller,
        JsonlSink::new(io::stdout()),
        Duration::from_millis(config.control_loop.period_ms),
        config.control_loop.status_interval_ticks,
    );

    info!("Press Ctrl+C to exit");
    let ticks = control_loop.run_until(tokio::signal::ctrl_c()).await?;
    info!("Total cycles: {}", ticks);

    Ok(())
}

/// Installs the tracing subscriber.
///
/// `RUST_LOG` directives take precedence over the configured level. The
/// returned guard must be held until exit so buffered file logs are flushed.
fn init_logging(logging: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let level: tracing::Level = logging
        .level
        .parse()
        .with_context(|| format!("invalid log level {}", logging.level))?;

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let (file_layer, guard) = match &logging.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_path_exists() {
        assert!(std::path::Path::new(DEFAULT_CONFIG_PATH).exists());
    }

    #[test]
    fn test_bundled_config_and_replay_load() {
        let config = Config::load(DEFAULT_CONFIG_PATH).unwrap();
        let source = ReplaySource::load(&config.input.replay_path).unwrap();
        assert!(!source.is_empty());

        assert!(config.sticks().is_ok());
    }

    #[test]
    fn test_period_calculation() {
        let config = Config::load(DEFAULT_CONFIG_PATH).unwrap();
        let period = Duration::from_millis(config.control_loop.period_ms);
        assert_eq!(period, Duration::from_millis(20), "Period should be 20ms (50Hz)");
    }
}
