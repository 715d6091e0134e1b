//! Rolling statistics over the sample window.

use serde::Serialize;

use super::sample::Sample;
use super::window::SlidingWindow;

/// Snapshot of the statistics panel, recomputed from the window every tick.
///
/// `average`, `min` and `max` consider successful samples only and are
/// `None` when the window holds no successful sample.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Stats {
    /// Latest sample; `None` before the first measurement.
    #[serde(serialize_with = "serialize_current")]
    pub current: Option<Sample>,
    pub average: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Ticks elapsed times the configured interval.
    pub elapsed_secs: f64,
    pub consecutive_failures: u32,
}

impl Stats {
    pub fn compute(window: &SlidingWindow, elapsed_secs: f64, consecutive_failures: u32) -> Self {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min: Option<f64> = None;
        let mut max: Option<f64> = None;

        for ms in window.latencies() {
            count += 1;
            sum += ms;
            min = Some(min.map_or(ms, |m| m.min(ms)));
            max = Some(max.map_or(ms, |m| m.max(ms)));
        }

        let average = (count > 0).then(|| sum / count as f64);

        Self {
            current: window.latest(),
            average,
            min,
            max,
            elapsed_secs,
            consecutive_failures,
        }
    }
}

/// Format an optional latency for the statistics panel.
pub fn format_latency(value: Option<f64>) -> String {
    value
        .map(|ms| format!("{:.2} ms", ms))
        .unwrap_or_else(|| "N/A".to_string())
}

fn serialize_current<S>(current: &Option<Sample>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match current {
        Some(Sample::Latency(ms)) => serializer.serialize_f64(*ms),
        Some(Sample::Failed) => serializer.serialize_str("failed"),
        None => serializer.serialize_none(),
    }
}
