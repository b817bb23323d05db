//! Popup model: visibility, placement and the candidate list
//!
//! The popup is owned by a single controller. Rendering is left to the host toolkit, which
//! reads this state; the popup never takes keyboard focus.

use crate::config::{DEFAULT_MAX_ENTRIES, DEFAULT_POPUP_HEIGHT, DEFAULT_POPUP_WIDTH};
use crate::types::{Anchor, Candidate};

/// Identifier of the top-level window the popup is bound to
pub type OwnerId = u64;

/// Transient state of one visible popup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSession {
    /// Document text at the last probe; `None` until the first probe
    pub last_probed_text: Option<String>,
    pub candidates: Vec<Candidate>,
    pub selected_index: usize,
}

impl CompletionSession {
    pub fn new(last_probed_text: Option<String>) -> Self {
        Self {
            last_probed_text,
            ..Self::default()
        }
    }

    /// Whether `text` differs from what was last probed
    pub fn is_stale(&self, text: &str) -> bool {
        self.last_probed_text.as_deref() != Some(text)
    }

    pub fn selected(&self) -> Option<&Candidate> {
        self.candidates.get(self.selected_index)
    }
}

/// Size of the popup in logical units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupSize {
    pub width: u32,
    pub height: u32,
}

impl Default for PopupSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_POPUP_WIDTH,
            height: DEFAULT_POPUP_HEIGHT,
        }
    }
}

/// Floating candidate list anchored below the partial word
#[derive(Debug, Clone)]
pub struct PopupState {
    visible: bool,
    anchor: Option<Anchor>,
    size: PopupSize,
    max_entries: usize,
    owner: Option<OwnerId>,
    session: Option<CompletionSession>,
}

impl PopupState {
    pub fn new(size: PopupSize, max_entries: usize) -> Self {
        Self {
            visible: false,
            anchor: None,
            size,
            max_entries: max_entries.max(1),
            owner: None,
            session: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    pub fn size(&self) -> PopupSize {
        self.size
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn owner(&self) -> Option<OwnerId> {
        self.owner
    }

    pub fn session(&self) -> Option<&CompletionSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut CompletionSession> {
        self.session.as_mut()
    }

    /// Rows currently in the list
    pub fn candidates(&self) -> &[Candidate] {
        self.session.as_ref().map_or(&[], |s| s.candidates.as_slice())
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.session
            .as_ref()
            .filter(|s| !s.candidates.is_empty())
            .map(|s| s.selected_index)
    }

    pub fn selected(&self) -> Option<&Candidate> {
        self.session.as_ref().and_then(CompletionSession::selected)
    }

    /// Make the popup visible at `anchor`, starting a session
    ///
    /// An already visible popup keeps its position and session.
    pub fn show(&mut self, anchor: Anchor, probed_text: String) {
        if self.visible {
            return;
        }
        self.visible = true;
        self.anchor = Some(anchor);
        self.session = Some(CompletionSession::new(Some(probed_text)));
    }

    /// Replace the list with the head of `candidates` and select the first row
    pub fn populate(&mut self, mut candidates: Vec<Candidate>) {
        candidates.truncate(self.max_entries);
        let session = self.session.get_or_insert_with(CompletionSession::default);
        session.candidates = candidates;
        session.selected_index = 0;
    }

    /// Hide the popup and drop the list data
    pub fn hide(&mut self) {
        self.visible = false;
        self.anchor = None;
        self.session = None;
    }

    pub fn select_next(&mut self) {
        if let Some(session) = self.session.as_mut().filter(|s| !s.candidates.is_empty()) {
            session.selected_index = (session.selected_index + 1) % session.candidates.len();
        }
    }

    pub fn select_prev(&mut self) {
        if let Some(session) = self.session.as_mut().filter(|s| !s.candidates.is_empty()) {
            session.selected_index = session
                .selected_index
                .checked_sub(1)
                .unwrap_or(session.candidates.len() - 1);
        }
    }

    /// Select `row` if it exists
    pub fn select(&mut self, row: usize) -> bool {
        match self.session.as_mut() {
            Some(session) if row < session.candidates.len() => {
                session.selected_index = row;
                true
            }
            _ => false,
        }
    }

    /// Recreate the popup bound to a new top-level window
    ///
    /// The recreated popup starts hidden and empty.
    pub fn rebind(&mut self, owner: OwnerId) {
        *self = Self {
            owner: Some(owner),
            ..Self::new(self.size, self.max_entries)
        };
    }
}

impl Default for PopupState {
    fn default() -> Self {
        Self::new(PopupSize::default(), DEFAULT_MAX_ENTRIES)
    }
}
