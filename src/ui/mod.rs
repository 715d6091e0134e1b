//! Terminal UI rendering using ratatui.
//!
//! ## Submodules
//!
//! - [`canvas`]: The [`Canvas`] trait and its ratatui-backed implementation
//! - [`common`]: Status banner and status bar
//! - [`graph`]: Latency chart drawn from a [`RenderPlan`](crate::plan::RenderPlan)
//! - [`stats`]: Statistics panel
//! - [`terminal`]: Raw mode / alternate screen guard
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Screen Layout
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Status banner (common::render_status)│
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Graph (graph::render)                │
//! │   latency line + failure markers     │
//! ├──────────────────────────────────────┤
//! │ Statistics (stats::render)           │
//! ├──────────────────────────────────────┤
//! │ Status bar (common::render_status_bar)│
//! └──────────────────────────────────────┘
//! ```

pub mod canvas;
pub mod common;
pub mod graph;
pub mod stats;
pub mod terminal;
pub mod theme;

pub use canvas::{Canvas, Scene, SessionInfo, TerminalCanvas};
pub use terminal::TerminalGuard;
pub use theme::Theme;

use ratatui::layout::{Constraint, Layout};
use ratatui::Frame;

use crate::plan::{FOOTER_LINES, SPACER_LINES, STATS_LINES, STATUS_LINES};

/// Draw a complete frame.
pub fn render(frame: &mut Frame, scene: &Scene<'_>, theme: &Theme) {
    let [status, spacer, graph, stats, footer] = Layout::vertical([
        Constraint::Length(STATUS_LINES),
        Constraint::Length(SPACER_LINES),
        Constraint::Length(scene.plan.height),
        Constraint::Length(STATS_LINES),
        Constraint::Length(FOOTER_LINES),
    ])
    .areas(frame.area());

    common::render_status(frame, scene.status, theme, status);
    common::render_warning(frame, scene.plan.undersized.as_deref(), theme, spacer);
    graph::render(frame, scene.plan, theme, graph);
    stats::render(frame, scene, theme, stats);
    common::render_status_bar(frame, scene, theme, footer);
}
