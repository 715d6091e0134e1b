//! Drawing surface abstraction.

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Terminal;

use super::{render, Theme};
use crate::data::{Stats, StatusMessage};
use crate::error::RenderError;
use crate::plan::{RenderPlan, TerminalSize};

/// Fixed facts about the session shown in the statistics panel.
#[derive(Debug, Clone, Copy)]
pub struct SessionInfo<'a> {
    pub host: &'a str,
    pub probe: &'a str,
    pub interval_secs: f64,
    pub y_max: f64,
    pub samples: usize,
    pub capacity: usize,
}

/// Everything drawn in one frame.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub plan: &'a RenderPlan,
    pub stats: &'a Stats,
    pub status: Option<&'a StatusMessage>,
    pub session: SessionInfo<'a>,
    /// Transient message for the status bar.
    pub notice: Option<&'a str>,
}

/// A surface that shows one [`Scene`] per tick.
pub trait Canvas {
    /// Current size of the drawing area.
    fn size(&self) -> Result<TerminalSize, RenderError>;

    /// Replace the whole screen with `scene`.
    fn draw(&mut self, scene: &Scene<'_>) -> Result<(), RenderError>;

    /// Clear the screen and show a warning after a failed draw.
    fn recover(&mut self, error: &RenderError) -> Result<(), RenderError>;
}

/// [`Canvas`] backed by a ratatui terminal.
pub struct TerminalCanvas<B: Backend> {
    terminal: Terminal<B>,
    theme: Theme,
}

impl<B: Backend> std::fmt::Debug for TerminalCanvas<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalCanvas").field("theme", &self.theme).finish_non_exhaustive()
    }
}

impl<B: Backend> TerminalCanvas<B> {
    pub fn new(terminal: Terminal<B>, theme: Theme) -> Self {
        Self { terminal, theme }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

impl<B: Backend> Canvas for TerminalCanvas<B> {
    fn size(&self) -> Result<TerminalSize, RenderError> {
        let size = self.terminal.size()?;
        Ok(TerminalSize {
            cols: size.width,
            rows: size.height,
        })
    }

    fn draw(&mut self, scene: &Scene<'_>) -> Result<(), RenderError> {
        let theme = &self.theme;
        self.terminal.draw(|frame| render(frame, scene, theme))?;
        Ok(())
    }

    fn recover(&mut self, error: &RenderError) -> Result<(), RenderError> {
        self.terminal.clear()?;
        let message = format!("ERROR during rendering: {}", error);
        self.terminal.draw(|frame| {
            let area = frame.area();
            if area.width == 0 || area.height == 0 {
                return;
            }
            let warning = Paragraph::new(message)
                .style(Style::default().fg(Color::Yellow))
                .wrap(Wrap { trim: true });
            frame.render_widget(warning, Rect::new(0, 0, area.width, area.height.min(3)));
        })?;
        Ok(())
    }
}
