//! Latency chart.
//!
//! The latency line is drawn in braille; failures are overlaid as separate
//! markers on the baseline so they never read as a near-zero latency.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::Line,
    widgets::{Axis, Block, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use super::Theme;
use crate::plan::RenderPlan;

pub const TITLE: &str = "Real-time Internet Latency";
pub const Y_LABEL: &str = "(ms)";
pub const X_HINT: &str = "(Press q or Ctrl+C to exit)";
pub const WAITING: &str = "Waiting for first ping data...";

/// Render the chart described by `plan` into `area`.
pub fn render(frame: &mut Frame, plan: &RenderPlan, theme: &Theme, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    if plan.is_empty() {
        frame.render_widget(Paragraph::new(WAITING), area);
        return;
    }

    let area = Rect {
        width: plan.width.min(area.width),
        ..area
    };

    let line_points = plan.line_points();
    let marker_points = plan.marker_points();

    let mut datasets = vec![Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme.latency))
        .data(&line_points)];
    if !marker_points.is_empty() {
        datasets.push(
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(theme.failure).add_modifier(Modifier::BOLD))
                .data(&marker_points),
        );
    }

    let axis_style = Style::default().fg(theme.axis);
    let y_labels: Vec<Line> = plan.y_ticks.iter().map(|t| Line::from(format!("{:.0}", t))).collect();

    let chart = Chart::new(datasets)
        .block(Block::default().title(Line::styled(TITLE, theme.header).alignment(Alignment::Center)))
        .x_axis(
            Axis::default()
                .title(X_HINT)
                .style(axis_style)
                .bounds([0.0, plan.x_upper()]),
        )
        .y_axis(
            Axis::default()
                .title(Y_LABEL)
                .style(axis_style)
                .bounds([0.0, plan.y_upper])
                .labels(y_labels),
        )
        .legend_position(None);

    frame.render_widget(chart, area);
}
