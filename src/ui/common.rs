//! Common UI components: status banner, size warning and status bar.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use super::{Scene, Theme};
use crate::data::StatusMessage;

/// Render the connection status banner.
///
/// Alerts and recovery notices get a dashed rule underneath.
pub fn render_status(frame: &mut Frame, status: Option<&StatusMessage>, theme: &Theme, area: Rect) {
    let Some(status) = status else {
        return;
    };

    let style = theme.status_style(status.kind);
    let mut lines = vec![Line::styled(status.text.clone(), style)];
    if status.underlined() {
        lines.push(Line::styled("-".repeat(status.text.chars().count()), style));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Render the "plot area too small" warning, if any.
pub fn render_warning(frame: &mut Frame, warning: Option<&str>, theme: &Theme, area: Rect) {
    if let Some(warning) = warning {
        let paragraph = Paragraph::new(warning).style(Style::default().fg(theme.warning));
        frame.render_widget(paragraph, area);
    }
}

/// Render the status bar at the bottom.
///
/// Shows a transient notice when one is active, otherwise window fill and controls.
pub fn render_status_bar(frame: &mut Frame, scene: &Scene<'_>, theme: &Theme, area: Rect) {
    if let Some(msg) = scene.notice {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = format!(
        " {}/{} samples | e:export r:redraw q:quit",
        scene.session.samples, scene.session.capacity
    );
    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}
