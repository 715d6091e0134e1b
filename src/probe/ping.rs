//! Probe backed by the system `ping` utility.

use std::io;
use std::process::Stdio;
use std::sync::LazyLock;

use regex::Regex;
use tokio::process::Command;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, warn};

use super::{LatencyProbe, ProbeTimeout};
use crate::data::Sample;
use crate::error::ProbeError;

/// Runs `ping -c 1 -W <secs> <host>` once per measurement.
///
/// The child process is driven on a private current-thread runtime so the
/// caller stays synchronous while still getting a hard deadline; the child
/// is killed if the deadline passes.
#[derive(Debug)]
pub struct PingProbe {
    program: String,
    description: String,
    runtime: Runtime,
}

impl PingProbe {
    /// Probe using `ping` from `PATH`.
    pub fn new() -> Result<Self, ProbeError> {
        Self::with_program("ping")
    }

    /// Probe using a specific ping-compatible executable.
    pub fn with_program(program: impl Into<String>) -> Result<Self, ProbeError> {
        let program = program.into();
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProbeError::Runtime)?;
        let description = format!("{} (1 packet)", program);
        Ok(Self {
            program,
            description,
            runtime,
        })
    }

    fn command(&self, host: &str, timeout: ProbeTimeout) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("-c")
            .arg("1")
            .arg("-W")
            .arg(timeout.attempt.as_secs().max(1).to_string())
            .arg(host)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        command
    }
}

impl LatencyProbe for PingProbe {
    fn measure(&mut self, host: &str, timeout: ProbeTimeout) -> Result<Sample, ProbeError> {
        let mut command = self.command(host, timeout);
        let result = self
            .runtime
            .block_on(async { tokio::time::timeout(timeout.deadline, command.output()).await });

        let output = match result {
            Err(_) => {
                debug!(host, deadline = ?timeout.deadline, "ping exceeded deadline");
                return Ok(Sample::Failed);
            }
            Ok(Err(e)) if is_unavailable(&e) => {
                return Err(ProbeError::Unavailable {
                    program: self.program.clone(),
                    source: e,
                });
            }
            Ok(Err(e)) => {
                warn!(host, error = %e, "ping could not be run");
                return Ok(Sample::Failed);
            }
            Ok(Ok(output)) => output,
        };

        if !output.status.success() {
            debug!(host, status = ?output.status.code(), "ping reported failure");
            return Ok(Sample::Failed);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let sample = Sample::from(parse_ping_output(&stdout));
        if sample.is_failed() {
            debug!(host, "ping succeeded but reported no round-trip time");
        }
        Ok(sample)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

fn is_unavailable(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
    )
}

/// Round-trip time as printed by `ping`: `time=12.3 ms`, `TIME=9.8ms` or `time<1ms`.
static ROUND_TRIP: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)time[=<]([0-9.]+)\s*ms").ok());

/// Extract the round-trip time in milliseconds from ping output.
pub fn parse_ping_output(output: &str) -> Option<f64> {
    let pattern = ROUND_TRIP.as_ref()?;
    pattern
        .captures_iter(output)
        .find_map(|caps| caps.get(1)?.as_str().parse::<f64>().ok())
}
