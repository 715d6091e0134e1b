use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Requests the monitor handles between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Stop monitoring and exit cleanly.
    Quit,
    /// Write the current window and statistics to a JSON file.
    Export,
    /// Redraw immediately (e.g. after a resize).
    Redraw,
}

/// Source of commands between ticks.
pub trait Controls {
    /// Wait up to `timeout` for the next command.
    ///
    /// Returns `Ok(None)` when nothing arrived in time.
    fn next_command(&mut self, timeout: Duration) -> io::Result<Option<Command>>;
}

/// Reads commands from terminal key events.
///
/// In raw mode Ctrl+C arrives as a key press rather than a signal, so it is
/// handled here alongside `q` and `Esc`.
#[derive(Debug, Default)]
pub struct KeyboardControls;

impl Controls for KeyboardControls {
    fn next_command(&mut self, timeout: Duration) -> io::Result<Option<Command>> {
        match poll_event(timeout)? {
            Some(Event::Key(key)) => Ok(handle_key_event(key)),
            Some(Event::Resize(_, _)) => Ok(Some(Command::Redraw)),
            _ => Ok(None),
        }
    }
}

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Map a key press to a command
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('e') => Some(Command::Export),
        KeyCode::Char('r') => Some(Command::Redraw),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(
            handle_key_event(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Command::Quit)
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Command::Quit)
        );
    }

    #[test]
    fn test_plain_c_does_not_quit() {
        assert_eq!(handle_key_event(press(KeyCode::Char('c'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_export_and_redraw_keys() {
        assert_eq!(
            handle_key_event(press(KeyCode::Char('e'), KeyModifiers::NONE)),
            Some(Command::Export)
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Char('r'), KeyModifiers::NONE)),
            Some(Command::Redraw)
        );
    }

    #[test]
    fn test_key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key_event(release), None);
    }
}
