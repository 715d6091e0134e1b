//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::StatusKind;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Color of the latency line.
    pub latency: Color,
    /// Color of failure markers on the baseline.
    pub failure: Color,
    /// Color for the warning banner.
    pub warning: Color,
    /// Color for the alert banner.
    pub alert: Color,
    /// Color for recovery notices.
    pub info: Color,
    /// Accent color for transient notices in the status bar.
    pub highlight: Color,
    /// Color for axes and borders.
    pub axis: Color,
    /// Style for panel titles.
    pub header: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            latency: Color::Cyan,
            failure: Color::Red,
            warning: Color::Yellow,
            alert: Color::Red,
            info: Color::Green,
            highlight: Color::Cyan,
            axis: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            latency: Color::Blue,
            failure: Color::Red,
            warning: Color::Yellow,
            alert: Color::Red,
            info: Color::Green,
            highlight: Color::Blue,
            axis: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for a status banner
    pub fn status_style(&self, kind: StatusKind) -> Style {
        match kind {
            StatusKind::None => Style::default(),
            StatusKind::Warning => Style::default().fg(self.warning),
            StatusKind::Alert => Style::default().fg(self.alert).add_modifier(Modifier::BOLD),
            StatusKind::Info => Style::default().fg(self.info),
        }
    }
}
