//! Text surface over a tui-textarea editor
//!
//! Character offsets are mapped to `(row, col)` cursor positions, with each line break
//! counting as one character. Anchors are terminal cells.

use ontoedit_completion::{Anchor, CompletionError, CompletionResult, TextSurface};
use ratatui::layout::Rect;
use ratatui::widgets::Block;
use tui_textarea::{CursorMove, TextArea};
use unicode_width::UnicodeWidthStr;

/// Editable class-expression text backed by [`TextArea`]
pub struct TextAreaSurface {
    textarea: TextArea<'static>,
    /// Inner area of the editor at the last render
    viewport: Option<Rect>,
    top_row: usize,
    left_col: usize,
}

impl TextAreaSurface {
    pub fn new(text: &str) -> Self {
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        let mut textarea = TextArea::new(lines);
        textarea.move_cursor(CursorMove::Bottom);
        textarea.move_cursor(CursorMove::End);
        Self {
            textarea,
            viewport: None,
            top_row: 0,
            left_col: 0,
        }
    }

    pub fn set_block(&mut self, block: Block<'static>) {
        self.textarea.set_block(block);
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    pub fn textarea_mut(&mut self) -> &mut TextArea<'static> {
        &mut self.textarea
    }

    /// Record where the editor text was drawn and follow the cursor like the textarea does
    pub fn note_render(&mut self, inner: Rect) {
        self.viewport = Some(inner);
        let (row, col) = self.textarea.cursor();
        let height = usize::from(inner.height.max(1));
        let width = usize::from(inner.width.max(1));

        if row < self.top_row {
            self.top_row = row;
        } else if row >= self.top_row + height {
            self.top_row = row + 1 - height;
        }
        if col < self.left_col {
            self.left_col = col;
        } else if col >= self.left_col + width {
            self.left_col = col + 1 - width;
        }
    }

    /// `(row, col)` of character offset `offset`
    pub fn position_of(&self, offset: usize) -> Option<(usize, usize)> {
        let mut remaining = offset;
        for (row, line) in self.textarea.lines().iter().enumerate() {
            let len = line.chars().count();
            if remaining <= len {
                return Some((row, remaining));
            }
            remaining -= len + 1;
        }
        None
    }

    /// Character offset of `(row, col)`
    pub fn offset_of(&self, row: usize, col: usize) -> usize {
        let lines = self.textarea.lines();
        let before: usize = lines
            .iter()
            .take(row)
            .map(|line| line.chars().count() + 1)
            .sum();
        before + col
    }

    fn jump(&mut self, offset: usize) -> CompletionResult<()> {
        let (row, col) = self
            .position_of(offset)
            .ok_or_else(|| CompletionError::DocumentAccess { offset, len: 0 })?;
        let row = u16::try_from(row).map_err(|_| CompletionError::DocumentAccess { offset, len: 0 })?;
        let col = u16::try_from(col).map_err(|_| CompletionError::DocumentAccess { offset, len: 0 })?;
        self.textarea.move_cursor(CursorMove::Jump(row, col));
        Ok(())
    }
}

impl TextSurface for TextAreaSurface {
    fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    fn char_len(&self) -> usize {
        let lines = self.textarea.lines();
        lines.iter().map(|l| l.chars().count()).sum::<usize>() + lines.len().saturating_sub(1)
    }

    fn caret(&self) -> usize {
        let (row, col) = self.textarea.cursor();
        self.offset_of(row, col)
    }

    fn set_caret(&mut self, offset: usize) -> CompletionResult<()> {
        self.jump(offset)
    }

    fn remove(&mut self, start: usize, len: usize) -> CompletionResult<()> {
        if start + len > self.char_len() {
            return Err(CompletionError::DocumentAccess { offset: start, len });
        }
        self.jump(start)?;
        if len > 0 {
            self.textarea.delete_str(len);
        }
        Ok(())
    }

    fn insert(&mut self, offset: usize, text: &str) -> CompletionResult<()> {
        self.jump(offset)?;
        self.textarea.insert_str(text);
        Ok(())
    }

    fn anchor_for(&self, offset: usize) -> Option<Anchor> {
        let viewport = self.viewport?;
        let (row, col) = self.position_of(offset)?;
        let line = self.textarea.lines().get(row)?;

        let visible: String = line
            .chars()
            .skip(self.left_col)
            .take(col.saturating_sub(self.left_col))
            .collect();
        let x = i32::from(viewport.x) + visible.width() as i32;
        let y = i32::from(viewport.y) + row as i32 - self.top_row as i32;
        Some(Anchor::new(x, y))
    }

    fn line_height(&self) -> i32 {
        1
    }
}
