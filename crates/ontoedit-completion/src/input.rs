//! Keyboard bindings for the completer
//!
//! Hosts translate their toolkit's key events into [`KeyInput`] and forward them, press and
//! release alike, to [`InputDispatcher::dispatch`]. A consumed event must not reach the text
//! component.

use crate::controller::{CompletionController, Outcome};
use crate::surface::TextSurface;

/// Keys the completer reacts to; everything else is `Other`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Tab,
    Enter,
    Esc,
    Up,
    Down,
    Left,
    Right,
    Backspace,
    Delete,
    Other,
}

/// Modifier keys held during the event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl KeyModifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Press,
    Release,
}

/// A key event as seen by the completer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
    pub phase: KeyPhase,
}

impl KeyInput {
    pub fn press(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
            phase: KeyPhase::Press,
        }
    }

    pub fn release(code: KeyCode) -> Self {
        Self {
            phase: KeyPhase::Release,
            ..Self::press(code)
        }
    }

    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Ctrl+Space, the explicit completion shortcut
    pub fn is_completion_shortcut(&self) -> bool {
        self.code == KeyCode::Char(' ') && self.modifiers.ctrl
    }
}

/// Result of dispatching one key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// The event must not be delivered to the text component
    pub consumed: bool,
    pub outcome: Outcome,
}

impl Dispatch {
    fn pass(outcome: Outcome) -> Self {
        Self {
            consumed: false,
            outcome,
        }
    }

    fn consume(outcome: Outcome) -> Self {
        Self {
            consumed: true,
            outcome,
        }
    }

    fn ignored() -> Self {
        Self::pass(Outcome::Nothing)
    }
}

/// Maps key events to controller actions
pub struct InputDispatcher;

impl InputDispatcher {
    pub fn dispatch<S: TextSurface>(
        controller: &mut CompletionController<S>,
        key: KeyInput,
    ) -> Dispatch {
        if !controller.is_installed() {
            return Dispatch::ignored();
        }
        match key.phase {
            KeyPhase::Press => Self::key_pressed(controller, key),
            KeyPhase::Release => Self::key_released(controller, key),
        }
    }

    fn key_pressed<S: TextSurface>(
        controller: &mut CompletionController<S>,
        key: KeyInput,
    ) -> Dispatch {
        if key.is_completion_shortcut() {
            return Dispatch::pass(controller.trigger());
        }

        let visible = controller.is_popup_visible();
        match key.code {
            KeyCode::Tab => Dispatch::consume(controller.trigger()),
            KeyCode::Esc if visible => Dispatch::consume(controller.dismiss()),
            KeyCode::Enter if visible => Dispatch::consume(controller.accept()),
            KeyCode::Down if visible => Dispatch::consume(controller.move_selection(1)),
            KeyCode::Up if visible => Dispatch::consume(controller.move_selection(-1)),
            KeyCode::Left | KeyCode::Right => Dispatch::pass(controller.dismiss()),
            _ => Dispatch::ignored(),
        }
    }

    fn key_released<S: TextSurface>(
        controller: &mut CompletionController<S>,
        key: KeyInput,
    ) -> Dispatch {
        match key.code {
            KeyCode::Up | KeyCode::Down => Dispatch::ignored(),
            _ => Dispatch::pass(controller.refresh_if_stale()),
        }
    }
}
