//! The text component the completer is attached to
//!
//! All offsets are character offsets, matching how the partial token is located.

use crate::error::{CompletionError, CompletionResult};
use crate::types::Anchor;

/// Operations the completion controller needs from an editable text component
pub trait TextSurface {
    /// Full document text
    fn text(&self) -> String;

    /// Document length in characters
    fn char_len(&self) -> usize {
        self.text().chars().count()
    }

    /// `len` characters starting at `start`
    fn span(&self, start: usize, len: usize) -> CompletionResult<String> {
        let text = self.text();
        let total = text.chars().count();
        if start.checked_add(len).map_or(true, |end| end > total) {
            return Err(CompletionError::out_of_range(start, len));
        }
        Ok(text.chars().skip(start).take(len).collect())
    }

    fn caret(&self) -> usize;

    fn set_caret(&mut self, offset: usize) -> CompletionResult<()>;

    /// Delete `len` characters starting at `start`
    fn remove(&mut self, start: usize, len: usize) -> CompletionResult<()>;

    /// Insert `text` at `offset`; the caret ends after the inserted text
    fn insert(&mut self, offset: usize, text: &str) -> CompletionResult<()>;

    /// Screen position of the top-left corner of the character at `offset`
    fn anchor_for(&self, offset: usize) -> Option<Anchor>;

    /// Height of one line of text in screen units
    fn line_height(&self) -> i32;
}

/// Byte index of character offset `offset`, allowing the one-past-the-end position
pub(crate) fn byte_index(text: &str, offset: usize) -> Option<usize> {
    text.char_indices()
        .map(|(idx, _)| idx)
        .chain(std::iter::once(text.len()))
        .nth(offset)
}

/// Headless in-memory text surface
///
/// Lays text out on a grid of one unit per character and `line_height` units per line,
/// starting at `origin`. With no origin the surface has no screen geometry and every anchor
/// lookup fails.
#[derive(Debug, Clone)]
pub struct StringSurface {
    text: String,
    caret: usize,
    origin: Option<Anchor>,
    line_height: i32,
}

impl StringSurface {
    /// Surface holding `text` with the caret at the end
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let caret = text.chars().count();
        Self {
            text,
            caret,
            origin: Some(Anchor::default()),
            line_height: 1,
        }
    }

    pub fn with_caret(mut self, caret: usize) -> Self {
        self.caret = caret.min(self.text.chars().count());
        self
    }

    pub fn with_origin(mut self, origin: Option<Anchor>) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_line_height(mut self, line_height: i32) -> Self {
        self.line_height = line_height;
        self
    }

    /// Replace the whole document, keeping the caret in range
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.caret = self.caret.min(self.text.chars().count());
    }

    /// Insert at the caret as if typed
    pub fn type_str(&mut self, s: &str) {
        if let Some(idx) = byte_index(&self.text, self.caret) {
            self.text.insert_str(idx, s);
            self.caret += s.chars().count();
        }
    }
}

impl TextSurface for StringSurface {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn caret(&self) -> usize {
        self.caret
    }

    fn set_caret(&mut self, offset: usize) -> CompletionResult<()> {
        if offset > self.text.chars().count() {
            return Err(CompletionError::out_of_range(offset, 0));
        }
        self.caret = offset;
        Ok(())
    }

    fn remove(&mut self, start: usize, len: usize) -> CompletionResult<()> {
        let end = start
            .checked_add(len)
            .ok_or_else(|| CompletionError::out_of_range(start, len))?;
        let (from, to) = byte_index(&self.text, start)
            .zip(byte_index(&self.text, end))
            .ok_or_else(|| CompletionError::out_of_range(start, len))?;
        self.text.replace_range(from..to, "");
        if self.caret > end {
            self.caret -= len;
        } else if self.caret > start {
            self.caret = start;
        }
        Ok(())
    }

    fn insert(&mut self, offset: usize, text: &str) -> CompletionResult<()> {
        let idx = byte_index(&self.text, offset)
            .ok_or_else(|| CompletionError::out_of_range(offset, 0))?;
        self.text.insert_str(idx, text);
        self.caret = offset + text.chars().count();
        Ok(())
    }

    fn anchor_for(&self, offset: usize) -> Option<Anchor> {
        let origin = self.origin?;
        let before: String = self.text.chars().take(offset).collect();
        if before.chars().count() < offset {
            return None;
        }
        let row = before.matches('\n').count() as i32;
        let col = before.rsplit('\n').next().map_or(0, |line| line.chars().count()) as i32;
        Some(Anchor::new(origin.x + col, origin.y + row * self.line_height))
    }

    fn line_height(&self) -> i32 {
        self.line_height
    }
}
