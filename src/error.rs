//! Error types.

use std::io;

use thiserror::Error;

/// Invalid configuration, reported before the monitor starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A setting is outside its allowed range.
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    /// The configuration sources could not be loaded or merged.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Setup-level probe failure. Per-sample failures are `Sample::Failed` instead.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The measurement tool is missing or cannot be executed.
    #[error("'{program}' command not available: {source}. Please ensure it is installed and in your PATH")]
    Unavailable {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The probe's runtime could not be created.
    #[error("failed to start probe runtime: {0}")]
    Runtime(#[source] io::Error),
}

/// Failure while drawing a frame. The monitor recovers from these.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("drawing failed: {0}")]
    Backend(#[from] io::Error),

    #[error("nothing to draw into: {0}")]
    Layout(String),
}

/// Errors that end the monitor loop.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error(transparent)]
    Probe(#[from] ProbeError),

    /// The canvas could not recover from a render error.
    #[error("terminal unusable: {0}")]
    Terminal(#[source] RenderError),

    /// Waiting for the next tick failed (e.g. reading terminal events).
    #[error("shutdown signal failed: {0}")]
    Signal(#[source] io::Error),
}
