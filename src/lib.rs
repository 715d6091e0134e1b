//! # pingwatch
//!
//! Live terminal graph of round-trip latency to a network host.
//!
//! Every tick the monitor pings the host once, appends the result to a
//! bounded window of recent samples, updates the connection status and
//! redraws a chart with rolling statistics.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        MonitorLoop                           │
//! │  ┌─────────┐   ┌───────────────┐   ┌─────────┐   ┌─────────┐ │
//! │  │  probe  │──▶│     data      │──▶│  plan   │──▶│   ui    │ │
//! │  │ (ping)  │   │ window/stats/ │   │(geometry)   │(Canvas) │ │
//! │  └─────────┘   │ failure state │   └─────────┘   └─────────┘ │
//! │                └───────────────┘                             │
//! │       ▲                                                      │
//! │  ┌─────────┐                                                 │
//! │  │ events  │◀── q / Esc / Ctrl+C / e / resize                │
//! │  └─────────┘                                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`probe`]**: [`LatencyProbe`] trait and the `ping`-based [`PingProbe`]
//! - **[`data`]**: [`Sample`], [`SlidingWindow`], [`FailureTracker`] and [`Stats`]
//! - **[`plan`]**: [`RenderPlanner`] maps the window onto plot coordinates
//! - **[`ui`]**: [`Canvas`] trait, ratatui rendering and terminal guard
//! - **[`monitor`]**: [`MonitorLoop`] ties it all together on a fixed interval
//! - **[`config`]**: layered [`Settings`] (defaults, file, environment, flags)
//!
//! ## Usage
//!
//! ```bash
//! # Ping 8.8.8.8 every 3 seconds
//! pingwatch
//!
//! # Ping a specific host every half second with a 100ms reference scale
//! pingwatch 1.1.1.1 --interval 500ms --ymax 100
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use pingwatch::{KeyboardControls, MonitorLoop, PingProbe, Settings, TerminalCanvas, TerminalGuard, Theme};
//!
//! # fn main() -> anyhow::Result<()> {
//! let settings = Settings::default();
//! let probe = PingProbe::new()?;
//! let theme = Theme::auto_detect();
//! let (_guard, terminal) = TerminalGuard::acquire()?;
//! let mut monitor = MonitorLoop::new(&settings, probe, TerminalCanvas::new(terminal, theme))?;
//! monitor.run(&mut KeyboardControls)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod export;
pub mod monitor;
pub mod plan;
pub mod probe;
pub mod ui;

// Re-export main types for convenience
pub use config::{Overrides, Settings};
pub use data::{FailureState, FailureTracker, Sample, SlidingWindow, StatusKind, StatusMessage, Stats};
pub use error::{ConfigError, MonitorError, ProbeError, RenderError};
pub use events::{Command, Controls, KeyboardControls};
pub use monitor::{MonitorLoop, TickReport};
pub use plan::{RenderPlan, RenderPlanner, TerminalSize};
pub use probe::{LatencyProbe, PingProbe, ProbeTimeout};
pub use ui::{Canvas, Scene, TerminalCanvas, TerminalGuard, Theme};
