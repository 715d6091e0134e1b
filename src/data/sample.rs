//! A single latency measurement outcome.

use std::fmt;

/// One probe result: either a round-trip time or a failure.
///
/// A failed sample never carries a value, and a sample with a value is
/// never a failure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    /// Round-trip time in milliseconds.
    Latency(f64),
    /// The probe did not produce a usable measurement.
    Failed,
}

impl Sample {
    /// Returns the latency in milliseconds, or `None` for a failure.
    pub fn value(&self) -> Option<f64> {
        match self {
            Sample::Latency(ms) => Some(*ms),
            Sample::Failed => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Sample::Failed)
    }

    /// Value contributed to the plotted line (failures sit on the baseline).
    pub fn plot_value(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }
}

impl From<Option<f64>> for Sample {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(ms) => Sample::Latency(ms),
            None => Sample::Failed,
        }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sample::Latency(ms) => write!(f, "{:.2} ms", ms),
            Sample::Failed => f.write_str("PING FAILED"),
        }
    }
}
