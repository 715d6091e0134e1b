//! Consecutive-failure tracking and the connection status banner.
//!
//! ```text
//!            fail (n < threshold)          fail (n >= threshold)
//!  Normal ─────────────────────▶ Warning(n) ─────────────────────▶ Alert(n)
//!    ▲  ◀──── success: "normalized" ───┘                              │
//!    └─────────────────── success: "restored" ────────────────────────┘
//! ```
//!
//! While in `Alert` the banner stays up and only its failure count moves.

use super::sample::Sample;

/// Consecutive failures that raise an alert, unless configured otherwise.
pub const DEFAULT_ALERT_THRESHOLD: u32 = 3;

/// Connection state derived from the sequence of samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureState {
    Normal,
    Warning(u32),
    Alert(u32),
}

impl FailureState {
    /// Current run of consecutive failures.
    pub fn failures(&self) -> u32 {
        match self {
            FailureState::Normal => 0,
            FailureState::Warning(n) | FailureState::Alert(n) => *n,
        }
    }
}

/// Severity of the status banner, used to pick its style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    None,
    Warning,
    Alert,
    Info,
}

/// One-cycle notice shown after the connection recovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Recovered from an alert.
    Restored(u32),
    /// Recovered from a handful of failures below the alert threshold.
    Normalized(u32),
}

/// Banner text to display above the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    /// Alerts and notices are underlined with a dashed rule.
    pub fn underlined(&self) -> bool {
        matches!(self.kind, StatusKind::Alert | StatusKind::Info)
    }
}

/// Drives [`FailureState`] from the latest sample.
#[derive(Debug, Clone)]
pub struct FailureTracker {
    state: FailureState,
    notice: Option<Recovery>,
    threshold: u32,
}

impl Default for FailureTracker {
    fn default() -> Self {
        Self::new(DEFAULT_ALERT_THRESHOLD)
    }
}

impl FailureTracker {
    /// Create a tracker in the `Normal` state. A threshold of 0 is treated as 1.
    pub fn new(threshold: u32) -> Self {
        Self {
            state: FailureState::Normal,
            notice: None,
            threshold: threshold.max(1),
        }
    }

    /// Apply the latest sample and return the new state.
    pub fn update(&mut self, sample: &Sample) -> FailureState {
        self.state = match (sample.is_failed(), self.state) {
            (true, FailureState::Alert(n)) => FailureState::Alert(n + 1),
            (true, previous) => {
                let n = previous.failures() + 1;
                self.notice = None;
                if n >= self.threshold {
                    FailureState::Alert(n)
                } else {
                    FailureState::Warning(n)
                }
            }
            (false, FailureState::Alert(n)) => {
                self.notice = Some(Recovery::Restored(n));
                FailureState::Normal
            }
            (false, FailureState::Warning(n)) => {
                self.notice = Some(Recovery::Normalized(n));
                FailureState::Normal
            }
            (false, FailureState::Normal) => {
                self.notice = None;
                FailureState::Normal
            }
        };
        self.state
    }

    pub fn state(&self) -> FailureState {
        self.state
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.state.failures()
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn kind(&self) -> StatusKind {
        match (self.state, self.notice) {
            (FailureState::Alert(_), _) => StatusKind::Alert,
            (FailureState::Warning(_), _) => StatusKind::Warning,
            (FailureState::Normal, Some(_)) => StatusKind::Info,
            (FailureState::Normal, None) => StatusKind::None,
        }
    }

    /// Banner for the current state. The alert count is always the live one.
    pub fn message(&self, host: &str) -> Option<StatusMessage> {
        let text = match (self.state, self.notice) {
            (FailureState::Alert(n), _) => {
                format!("!!! ALERT: Connection to {} LOST ({} failures) !!!", host, n)
            }
            (FailureState::Warning(n), _) => {
                format!("Warning: Ping to {} failed ({}x)", host, n)
            }
            (FailureState::Normal, Some(Recovery::Restored(n))) => format!(
                "INFO: Connection to {} restored after {}",
                host,
                pluralize_failures(n)
            ),
            (FailureState::Normal, Some(Recovery::Normalized(n))) => format!(
                "INFO: Ping to {} normalized after {}",
                host,
                pluralize_failures(n)
            ),
            (FailureState::Normal, None) => return None,
        };
        Some(StatusMessage {
            kind: self.kind(),
            text,
        })
    }
}

fn pluralize_failures(n: u32) -> String {
    if n == 1 {
        "1 failure".to_string()
    } else {
        format!("{} failures", n)
    }
}
