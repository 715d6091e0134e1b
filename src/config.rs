//! Layered runtime settings.
//!
//! Sources are merged in increasing priority:
//!
//! 1. Built-in defaults ([`Settings::default`])
//! 2. An optional TOML file (`--config pingwatch.toml`)
//! 3. Environment variables prefixed with `PINGWATCH_` (e.g. `PINGWATCH_INTERVAL=1`)
//! 4. Command-line flags
//!
//! ```toml
//! host = "1.1.1.1"
//! interval = 1.0
//! ymax = 100.0
//! yticks = 5
//! capacity = 300
//! alert_threshold = 5
//! log_file = "/tmp/pingwatch.log"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::data::duration::seconds;
use crate::data::failure::DEFAULT_ALERT_THRESHOLD;
use crate::data::window::DEFAULT_CAPACITY;
use crate::error::ConfigError;

pub const DEFAULT_HOST: &str = "8.8.8.8";
pub const DEFAULT_INTERVAL_SECS: f64 = 3.0;
pub const DEFAULT_Y_MAX: f64 = 200.0;
pub const DEFAULT_Y_TICKS: usize = 6;
/// Longest accepted ping interval: one day.
pub const MAX_INTERVAL_SECS: f64 = 86_400.0;

/// Environment variable prefix.
const ENV_PREFIX: &str = "PINGWATCH";

/// Resolved settings for one monitoring session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Host name or address to ping.
    pub host: String,
    /// Seconds between probes.
    pub interval: f64,
    /// Reference upper bound of the Y axis, in milliseconds.
    pub ymax: f64,
    /// Desired number of Y axis ticks.
    pub yticks: usize,
    /// Number of samples kept on the graph.
    pub capacity: usize,
    /// Consecutive failures before the connection is reported lost.
    pub alert_threshold: u32,
    /// Write diagnostics to this file. Logging is off when unset.
    pub log_file: Option<PathBuf>,
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            interval: DEFAULT_INTERVAL_SECS,
            ymax: DEFAULT_Y_MAX,
            yticks: DEFAULT_Y_TICKS,
            capacity: DEFAULT_CAPACITY,
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

/// Values given on the command line. `None` leaves lower layers untouched.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub interval: Option<f64>,
    pub ymax: Option<f64>,
    pub yticks: Option<usize>,
    pub capacity: Option<usize>,
    pub alert_threshold: Option<u32>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl Settings {
    /// Merge all configuration layers and validate the result.
    pub fn load(file: Option<&Path>, overrides: Overrides) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Settings::default())?);

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .set_override_option("host", overrides.host)?
            .set_override_option("interval", overrides.interval)?
            .set_override_option("ymax", overrides.ymax)?
            .set_override_option("yticks", overrides.yticks.map(|v| v as i64))?
            .set_override_option("capacity", overrides.capacity.map(|v| v as i64))?
            .set_override_option("alert_threshold", overrides.alert_threshold.map(i64::from))?
            .set_override_option(
                "log_file",
                overrides.log_file.map(|p| p.to_string_lossy().into_owned()),
            )?
            .set_override_option("log_level", overrides.log_level)?;

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check every setting is within its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(ConfigError::invalid("host", "must not be empty"));
        }
        // Would otherwise be read as a ping option.
        if host.starts_with('-') {
            return Err(ConfigError::invalid(
                "host",
                format!("'{}' is not a host name or address", host),
            ));
        }
        if !(self.interval.is_finite() && self.interval > 0.0) {
            return Err(ConfigError::invalid(
                "interval",
                format!("ping interval ({}s) must be greater than zero", self.interval),
            ));
        }
        if self.interval > MAX_INTERVAL_SECS {
            return Err(ConfigError::invalid(
                "interval",
                format!(
                    "ping interval ({}s) must not exceed {}s",
                    self.interval, MAX_INTERVAL_SECS
                ),
            ));
        }
        if !(self.ymax.is_finite() && self.ymax > 0.0) {
            return Err(ConfigError::invalid(
                "ymax",
                format!("graph Y-max ({}ms) must be greater than zero", self.ymax),
            ));
        }
        if self.yticks < 2 {
            return Err(ConfigError::invalid(
                "yticks",
                format!("number of Y-axis ticks ({}) must be at least 2", self.yticks),
            ));
        }
        if self.capacity == 0 {
            return Err(ConfigError::invalid("capacity", "must be at least 1"));
        }
        if self.alert_threshold == 0 {
            return Err(ConfigError::invalid("alert_threshold", "must be at least 1"));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        seconds(self.interval)
    }
}
