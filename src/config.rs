//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, ShaperError};
use crate::shaping::{ResponseCurve, ShapingConfig};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub shaping: ShapingSettings,
    pub control_loop: ControlLoopConfig,
    pub input: InputConfig,
    pub logging: LoggingConfig,
}

/// Shaping parameters for both sticks
#[derive(Debug, Deserialize, Clone)]
pub struct ShapingSettings {
    #[serde(default = "default_deadzone")]
    pub deadzone: f64,

    #[serde(default = "default_rate_limit")]
    pub rate_limit_left: f64,

    #[serde(default = "default_rate_limit")]
    pub rate_limit_right: f64,

    #[serde(default = "default_exponent1")]
    pub exponent1: f64,

    #[serde(default = "default_exponent2")]
    pub exponent2: f64,

    #[serde(default = "default_coefficient1")]
    pub coefficient1: f64,

    #[serde(default = "default_coefficient2")]
    pub coefficient2: f64,

    #[serde(default = "default_left_trigger_multiplier")]
    pub left_trigger_left_stick_multiplier: f64,

    #[serde(default = "default_right_trigger_multiplier")]
    pub right_trigger_left_stick_multiplier: f64,

    #[serde(default = "default_left_trigger_multiplier")]
    pub left_trigger_right_stick_multiplier: f64,

    #[serde(default = "default_right_trigger_multiplier")]
    pub right_trigger_right_stick_multiplier: f64,
}

/// Control loop timing configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ControlLoopConfig {
    #[serde(default = "default_period_ms")]
    pub period_ms: u64,

    #[serde(default = "default_status_interval_ticks")]
    pub status_interval_ticks: u64,
}

/// Input source configuration
#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    #[serde(default = "default_replay_path")]
    pub replay_path: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub log_dir: Option<String>,
}

// Default value functions
fn default_deadzone() -> f64 { 0.1 }
fn default_rate_limit() -> f64 { 3.0 }
fn default_exponent1() -> f64 { 3.0 }
fn default_exponent2() -> f64 { 1.0 }
fn default_coefficient1() -> f64 { 0.7 }
fn default_coefficient2() -> f64 { 0.3 }
fn default_left_trigger_multiplier() -> f64 { 0.5 }
fn default_right_trigger_multiplier() -> f64 { 1.0 }

fn default_period_ms() -> u64 { 20 }
fn default_status_interval_ticks() -> u64 { 250 }

fn default_replay_path() -> String { "demos/step_response.jsonl".to_string() }

fn default_log_level() -> String { "info".to_string() }

/// Log levels accepted by `logging.level`
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use stick_shaper::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from a TOML string
    ///
    /// # Examples
    ///
    /// ```
    /// use stick_shaper::config::Config;
    ///
    /// let config = Config::from_toml_str(
    ///     "[shaping]\ndeadzone = 0.05\n[control_loop]\n[input]\n[logging]\n",
    /// )?;
    /// assert_eq!(config.shaping.deadzone, 0.05);
    /// assert_eq!(config.control_loop.period_ms, 20);
    /// # Ok::<(), stick_shaper::error::ShaperError>(())
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Shaping for the left and right sticks, in that order
    ///
    /// Both sticks share one response curve, built once, so a curve
    /// anomaly is reported once per configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the combined parameters are invalid
    ///
    /// # Examples
    ///
    /// ```
    /// use stick_shaper::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// let (left, right) = config.sticks()?;
    /// assert_eq!(left.curve(), right.curve());
    /// # Ok::<(), stick_shaper::error::ShaperError>(())
    /// ```
    pub fn sticks(&self) -> Result<(ShapingConfig, ShapingConfig)> {
        let s = &self.shaping;
        let curve = ResponseCurve::new(s.exponent1, s.exponent2, s.coefficient1, s.coefficient2);

        let left = ShapingConfig::new(
            s.deadzone,
            curve,
            s.left_trigger_left_stick_multiplier,
            s.right_trigger_left_stick_multiplier,
            s.rate_limit_left,
        )?;
        let right = ShapingConfig::new(
            s.deadzone,
            curve,
            s.left_trigger_right_stick_multiplier,
            s.right_trigger_right_stick_multiplier,
            s.rate_limit_right,
        )?;

        Ok((left, right))
    }

    /// Validate configuration values
    ///
    /// # Returns
    ///
    /// * `Result<()>` - Ok if valid, Err if invalid
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        // Validate deadzone
        if !(0.0..1.0).contains(&self.shaping.deadzone) {
            return Err(ShaperError::Config(toml::de::Error::custom(
                "deadzone must be at least 0.0 and less than 1.0",
            )));
        }

        // Validate rate limits
        for (name, value) in [
            ("rate_limit_left", self.shaping.rate_limit_left),
            ("rate_limit_right", self.shaping.rate_limit_right),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ShaperError::Config(toml::de::Error::custom(format!(
                    "{} must be a finite value greater than 0",
                    name
                ))));
            }
        }

        // Validate curve and trigger parameters
        for (name, value) in [
            ("exponent1", self.shaping.exponent1),
            ("exponent2", self.shaping.exponent2),
            ("coefficient1", self.shaping.coefficient1),
            ("coefficient2", self.shaping.coefficient2),
            (
                "left_trigger_left_stick_multiplier",
                self.shaping.left_trigger_left_stick_multiplier,
            ),
            (
                "right_trigger_left_stick_multiplier",
                self.shaping.right_trigger_left_stick_multiplier,
            ),
            (
                "left_trigger_right_stick_multiplier",
                self.shaping.left_trigger_right_stick_multiplier,
            ),
            (
                "right_trigger_right_stick_multiplier",
                self.shaping.right_trigger_right_stick_multiplier,
            ),
        ] {
            if !value.is_finite() {
                return Err(ShaperError::Config(toml::de::Error::custom(format!(
                    "{} must be a finite number",
                    name
                ))));
            }
        }

        // Validate timing fields
        if self.control_loop.period_ms == 0 || self.control_loop.period_ms > 1000 {
            return Err(ShaperError::Config(toml::de::Error::custom(
                "period_ms must be between 1 and 1000",
            )));
        }

        if self.control_loop.status_interval_ticks == 0 {
            return Err(ShaperError::Config(toml::de::Error::custom(
                "status_interval_ticks must be greater than 0",
            )));
        }

        // Validate input
        if self.input.replay_path.is_empty() {
            return Err(ShaperError::Config(toml::de::Error::custom(
                "replay_path cannot be empty",
            )));
        }

        // Validate logging
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ShaperError::Config(toml::de::Error::custom(
                "log level must be one of: trace, debug, info, warn, error",
            )));
        }

        if matches!(&self.logging.log_dir, Some(dir) if dir.is_empty()) {
            return Err(ShaperError::Config(toml::de::Error::custom(
                "log_dir cannot be empty when set",
            )));
        }

        Ok(())
    }
}
