use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::app::Result;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self) -> Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(AppEvent::Key(key));
                }
            }
        }
        Ok(AppEvent::Tick)
    }
}

/// Actions available while browsing the inventory list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    NextPage,
    PrevPage,
    OpenItem,
    AddItem,
    DeleteItem,
    Export,
    None,
}

/// Keys understood by the editor popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    Close,
    NextField,
    PrevField,
    Submit,
    Generate,
    RequestDelete,
    Backspace,
    Input(char),
    Ignore,
}

impl From<KeyEvent> for EditorKey {
    fn from(key: KeyEvent) -> Self {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => EditorKey::Close,
            KeyCode::Tab | KeyCode::Down => EditorKey::NextField,
            KeyCode::BackTab | KeyCode::Up => EditorKey::PrevField,
            KeyCode::Enter => EditorKey::Submit,
            KeyCode::Backspace => EditorKey::Backspace,
            KeyCode::Char('g') if ctrl => EditorKey::Generate,
            KeyCode::Char('d') if ctrl => EditorKey::RequestDelete,
            KeyCode::Char('c') if ctrl => EditorKey::Close,
            KeyCode::Char(_) if ctrl => EditorKey::Ignore,
            KeyCode::Char(c) => EditorKey::Input(c),
            _ => EditorKey::Ignore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> EditorKey {
        EditorKey::from(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_editor_keys() {
        assert_eq!(key(KeyCode::Esc, KeyModifiers::NONE), EditorKey::Close);
        assert_eq!(key(KeyCode::Tab, KeyModifiers::NONE), EditorKey::NextField);
        assert_eq!(key(KeyCode::BackTab, KeyModifiers::SHIFT), EditorKey::PrevField);
        assert_eq!(key(KeyCode::Char('g'), KeyModifiers::CONTROL), EditorKey::Generate);
        assert_eq!(key(KeyCode::Char('d'), KeyModifiers::CONTROL), EditorKey::RequestDelete);
        assert_eq!(key(KeyCode::Char('x'), KeyModifiers::CONTROL), EditorKey::Ignore);
    }

    #[test]
    fn test_plain_characters_are_input() {
        assert_eq!(key(KeyCode::Char('g'), KeyModifiers::NONE), EditorKey::Input('g'));
        assert_eq!(key(KeyCode::Char('S'), KeyModifiers::SHIFT), EditorKey::Input('S'));
        assert_eq!(key(KeyCode::Char(' '), KeyModifiers::NONE), EditorKey::Input(' '));
    }
}
