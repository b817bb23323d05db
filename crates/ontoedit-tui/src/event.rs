//! Translating crossterm events for the completer

use crossterm::event::{
    KeyCode as CtKeyCode, KeyEvent, KeyEventKind, KeyModifiers as CtKeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use ontoedit_completion::{KeyCode, KeyInput, KeyModifiers, KeyPhase};
use std::time::{Duration, Instant};

/// Maximum delay between the two clicks of a double-click
pub const DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(400);

/// Convert a crossterm key event into the completer's key model
pub fn key_input(event: &KeyEvent) -> KeyInput {
    let code = match event.code {
        CtKeyCode::Char(c) => KeyCode::Char(c),
        CtKeyCode::Tab => KeyCode::Tab,
        CtKeyCode::Enter => KeyCode::Enter,
        CtKeyCode::Esc => KeyCode::Esc,
        CtKeyCode::Up => KeyCode::Up,
        CtKeyCode::Down => KeyCode::Down,
        CtKeyCode::Left => KeyCode::Left,
        CtKeyCode::Right => KeyCode::Right,
        CtKeyCode::Backspace => KeyCode::Backspace,
        CtKeyCode::Delete => KeyCode::Delete,
        // Some terminals send Ctrl+Space as NUL
        CtKeyCode::Null => KeyCode::Char(' '),
        _ => KeyCode::Other,
    };

    let mut modifiers = KeyModifiers {
        shift: event.modifiers.contains(CtKeyModifiers::SHIFT),
        ctrl: event.modifiers.contains(CtKeyModifiers::CONTROL),
        alt: event.modifiers.contains(CtKeyModifiers::ALT),
    };
    if event.code == CtKeyCode::Null {
        modifiers.ctrl = true;
    }

    let phase = match event.kind {
        KeyEventKind::Release => KeyPhase::Release,
        KeyEventKind::Press | KeyEventKind::Repeat => KeyPhase::Press,
    };

    KeyInput {
        code,
        modifiers,
        phase,
    }
}

/// Detects double-clicks from a stream of left-button presses
#[derive(Debug, Default)]
pub struct ClickTracker {
    last: Option<(u16, u16, Instant)>,
}

impl ClickTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a mouse event; returns the cell of a completed double-click
    pub fn on_mouse(&mut self, event: &MouseEvent) -> Option<(u16, u16)> {
        self.on_mouse_at(event, Instant::now())
    }

    pub fn on_mouse_at(&mut self, event: &MouseEvent, now: Instant) -> Option<(u16, u16)> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }

        let cell = (event.column, event.row);
        match self.last.take() {
            Some((x, y, at)) if (x, y) == cell && now.duration_since(at) <= DOUBLE_CLICK_INTERVAL => {
                Some(cell)
            }
            _ => {
                self.last = Some((cell.0, cell.1, now));
                None
            }
        }
    }
}
