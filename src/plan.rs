//! Geometry of the latency graph.
//!
//! [`RenderPlanner::plan`] turns the sample window and the terminal size into
//! a [`RenderPlan`]: plotted values, failure markers, axis bounds, ticks and
//! plot dimensions. It performs no drawing, so the geometry can be checked
//! without a terminal.
//!
//! ```text
//! ┌──────────────────────────────┐  ─┐
//! │ status banner (3 lines)      │   │
//! │                              │   │ PLOT_OVERHEAD
//! ├──────────────────────────────┤  ─┘
//! │ graph (width x height)       │
//! ├──────────────────────────────┤  ─┐
//! │ statistics panel             │   │ PLOT_OVERHEAD
//! │ status bar                   │   │
//! └──────────────────────────────┘  ─┘
//! ```

use std::collections::BTreeSet;

use crate::data::SlidingWindow;

/// Lines reserved for the status banner.
pub const STATUS_LINES: u16 = 3;
/// Blank line between the banner and the graph.
pub const SPACER_LINES: u16 = 1;
/// Bordered statistics panel: ten rows plus top and bottom border.
pub const STATS_LINES: u16 = 12;
/// Status bar at the bottom of the screen.
pub const FOOTER_LINES: u16 = 1;
/// Terminal rows not available to the graph.
pub const PLOT_OVERHEAD: u16 = STATUS_LINES + SPACER_LINES + STATS_LINES + FOOTER_LINES;
/// Columns not available to the graph.
pub const PLOT_MARGIN: u16 = 2;

pub const MIN_PLOT_WIDTH: u16 = 20;
pub const MIN_PLOT_HEIGHT: u16 = 5;

/// Smallest Y axis upper bound, in milliseconds.
pub const MIN_Y_UPPER: f64 = 10.0;
/// Headroom above the largest observed latency.
const Y_HEADROOM: f64 = 1.1;

/// Terminal dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub cols: u16,
    pub rows: u16,
}

/// Everything needed to draw one frame of the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    /// One value per window slot, oldest first. Failures plot as 0.
    pub series_y: Vec<f64>,
    /// Window indices whose sample failed, drawn as markers at y = 0.
    pub failure_marker_x: BTreeSet<usize>,
    /// Upper bound of the Y axis (lower bound is always 0).
    pub y_upper: f64,
    /// Y axis tick values, ascending.
    pub y_ticks: Vec<f64>,
    /// Plot width in cells.
    pub width: u16,
    /// Plot height in cells.
    pub height: u16,
    /// Set when the terminal is smaller than the minimum plot area.
    pub undersized: Option<String>,
}

impl RenderPlan {
    /// True before the first sample arrives.
    pub fn is_empty(&self) -> bool {
        self.series_y.is_empty()
    }

    /// X axis upper bound: the last slot index (at least 1 so the axis has width).
    pub fn x_upper(&self) -> f64 {
        (self.series_y.len().saturating_sub(1)).max(1) as f64
    }

    /// Points of the latency line.
    pub fn line_points(&self) -> Vec<(f64, f64)> {
        self.series_y
            .iter()
            .enumerate()
            .map(|(x, y)| (x as f64, *y))
            .collect()
    }

    /// Points of the failure markers.
    pub fn marker_points(&self) -> Vec<(f64, f64)> {
        self.failure_marker_x.iter().map(|x| (*x as f64, 0.0)).collect()
    }
}

/// Computes [`RenderPlan`]s for a fixed axis configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderPlanner {
    y_max: f64,
    y_ticks: usize,
}

impl RenderPlanner {
    /// `y_max` is the reference Y axis bound; `y_ticks` the desired tick count (at least 2).
    pub fn new(y_max: f64, y_ticks: usize) -> Self {
        Self {
            y_max,
            y_ticks: y_ticks.max(2),
        }
    }

    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    pub fn plan(&self, window: &SlidingWindow, terminal: TerminalSize) -> RenderPlan {
        let series_y: Vec<f64> = window.samples().map(|s| s.plot_value()).collect();
        let failure_marker_x: BTreeSet<usize> = window
            .samples()
            .enumerate()
            .filter(|(_, s)| s.is_failed())
            .map(|(i, _)| i)
            .collect();

        let y_upper = self.y_upper(window);
        let y_ticks = ticks(y_upper, self.y_ticks);
        let (width, height, undersized) = plot_area(terminal);

        RenderPlan {
            series_y,
            failure_marker_x,
            y_upper,
            y_ticks,
            width,
            height,
            undersized,
        }
    }

    fn y_upper(&self, window: &SlidingWindow) -> f64 {
        let max_observed = window.latencies().filter(|ms| *ms > 0.0).fold(0.0, f64::max);
        let upper = if max_observed > 0.0 {
            self.y_max.max(max_observed * Y_HEADROOM)
        } else {
            self.y_max
        };
        upper.max(MIN_Y_UPPER)
    }
}

/// Evenly spaced ticks from 0 to `upper`.
///
/// When the spacing is not a whole number the ticks are rounded to integers,
/// deduplicated and sorted instead.
fn ticks(upper: f64, count: usize) -> Vec<f64> {
    let step = upper / (count - 1) as f64;
    let evenly: Vec<f64> = (0..count).map(|i| i as f64 * step).collect();

    if (step - step.round()).abs() < 1e-9 {
        return evenly;
    }

    let mut rounded: Vec<f64> = evenly.into_iter().map(f64::round).collect();
    rounded.sort_by(f64::total_cmp);
    rounded.dedup();
    rounded
}

fn plot_area(terminal: TerminalSize) -> (u16, u16, Option<String>) {
    let available_width = terminal.cols.saturating_sub(PLOT_MARGIN);
    let available_height = terminal.rows.saturating_sub(PLOT_OVERHEAD);

    let width = available_width.max(MIN_PLOT_WIDTH);
    let height = available_height.max(MIN_PLOT_HEIGHT);

    let undersized = (available_width < MIN_PLOT_WIDTH || available_height < MIN_PLOT_HEIGHT)
        .then(|| {
            format!(
                "WARNING: Plot area is too small (w:{}, h:{}, need {}x{}). Graph might not display well.",
                available_width, available_height, MIN_PLOT_WIDTH, MIN_PLOT_HEIGHT
            )
        });

    (width, height, undersized)
}
