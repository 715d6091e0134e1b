//! Latency probe abstraction.
//!
//! The monitor only needs one operation from a probe: take a single
//! measurement against a host within a bounded time. [`PingProbe`] does this
//! by running the system `ping` utility.

mod ping;

pub use ping::{parse_ping_output, PingProbe};

use std::fmt::Debug;
use std::time::Duration;

use crate::config::MAX_INTERVAL_SECS;
use crate::data::duration::seconds;
use crate::data::Sample;
use crate::error::ProbeError;

/// Time limits for a single measurement attempt.
///
/// `deadline` is always strictly greater than `attempt`, so the tool gets to
/// time out on its own first and a hung tool is still cut off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTimeout {
    /// How long the tool itself waits for a reply.
    pub attempt: Duration,
    /// Hard limit after which the measurement is abandoned.
    pub deadline: Duration,
}

impl ProbeTimeout {
    /// Derive limits from the sampling interval (in seconds).
    ///
    /// The attempt timeout is the whole number of seconds in the interval
    /// (at least 1); the deadline is one second past the interval (at least 2).
    /// Intervals beyond [`MAX_INTERVAL_SECS`] are treated as that maximum.
    pub fn for_interval(interval_secs: f64) -> Self {
        let interval_secs = interval_secs.min(MAX_INTERVAL_SECS);
        let attempt = interval_secs.floor().max(1.0);
        let deadline = (interval_secs + 1.0).max(2.0).max(attempt + 1.0);
        Self {
            attempt: seconds(attempt),
            deadline: seconds(deadline),
        }
    }
}

/// Something that can measure round-trip latency to a host.
///
/// Implementations must return within `timeout.deadline`. Ordinary
/// measurement failures (timeouts, unreachable hosts, unparseable output)
/// are reported as [`Sample::Failed`]; an `Err` means the probe can never
/// work and the monitor should stop.
pub trait LatencyProbe: Debug {
    fn measure(&mut self, host: &str, timeout: ProbeTimeout) -> Result<Sample, ProbeError>;

    /// Short description for the statistics panel and logs.
    fn description(&self) -> &str;
}
