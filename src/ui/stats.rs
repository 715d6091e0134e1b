//! Statistics panel.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{Scene, Theme};
use crate::data::duration::format_elapsed;
use crate::data::stats::format_latency;
use crate::data::Sample;

/// Render host, configuration and rolling statistics.
pub fn render(frame: &mut Frame, scene: &Scene<'_>, theme: &Theme, area: Rect) {
    let stats = scene.stats;
    let session = &scene.session;

    let current = match stats.current {
        Some(sample @ Sample::Latency(_)) => Span::raw(sample.to_string()),
        Some(Sample::Failed) => Span::styled(
            Sample::Failed.to_string(),
            Style::default().fg(theme.failure).add_modifier(Modifier::BOLD),
        ),
        None => Span::styled("-", Style::default().add_modifier(Modifier::DIM)),
    };

    let failures_style = if stats.consecutive_failures > 0 {
        Style::default().fg(theme.warning)
    } else {
        Style::default()
    };

    let lines = vec![
        Line::from(format!("Monitoring Host: {}", session.host)),
        Line::from(format!("Probe: {}", session.probe)),
        Line::from(format!("Ping Interval: {:.1}s", session.interval_secs)),
        Line::from(format!("Graph Y-Max Ref: {:.0}ms", session.y_max)),
        Line::from(vec![Span::raw("Current Latency: "), current]),
        Line::from(format!("Average (valid pings): {}", format_latency(stats.average))),
        Line::from(format!("Minimum (valid pings): {}", format_latency(stats.min))),
        Line::from(format!("Maximum (valid pings): {}", format_latency(stats.max))),
        Line::from(format!("Monitoring Time: {}", format_elapsed(stats.elapsed_secs))),
        Line::from(Span::styled(
            format!("Consecutive Failures: {}", stats.consecutive_failures),
            failures_style,
        )),
    ];

    let block = Block::default()
        .title(Span::styled(" Statistics ", theme.header))
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.axis));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
