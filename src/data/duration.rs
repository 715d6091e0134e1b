use std::time::Duration;

use anyhow::{bail, Result};

/// Suffix to seconds multiplier (order matters: longer suffixes first)
const UNITS: &[(&str, f64)] = &[
    ("ms", 0.001),
    ("s", 1.0),
    ("m", 60.0),
];

/// Parse an interval like "2.5", "500ms", "1.5s" or "1m" into seconds.
///
/// A bare number is taken as seconds.
pub fn parse_interval(s: &str) -> Result<f64> {
    let s = s.trim();

    if let Ok(secs) = s.parse::<f64>() {
        return Ok(secs);
    }

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: f64 = val_str.trim().parse()?;
            return Ok(val * multiplier);
        }
    }

    bail!("Unknown interval format: {}", s)
}

/// Convert seconds into a `Duration`.
///
/// Negative and NaN inputs give zero; values too large to represent saturate
/// at `Duration::MAX`.
pub fn seconds(secs: f64) -> Duration {
    match Duration::try_from_secs_f64(secs) {
        Ok(duration) => duration,
        Err(_) if secs > 0.0 => Duration::MAX,
        Err(_) => Duration::ZERO,
    }
}

/// Format monitoring time as "1h 2m 3s", "2m 3s" or "3s".
pub fn format_elapsed(total_secs: f64) -> String {
    let total = total_secs.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}
