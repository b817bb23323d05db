//! Completion popup widget
//!
//! Renders the controller's [`PopupState`]:
//! - Top-left corner at the anchor, one line below the partial word
//! - Keyword / entity-kind tag column
//! - Selected row highlight, scrolled into view
//!
//! The popup only draws; it never takes focus. Keys keep flowing to the editor.

use ontoedit_completion::{Candidate, PopupState};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, StatefulWidget, Widget},
};

/// Popup widget configuration
#[derive(Debug, Clone)]
pub struct PopupWidgetConfig {
    /// Logical units per terminal column
    pub units_per_column: u32,
    /// Logical units per terminal row
    pub units_per_row: u32,
    pub bg_color: Color,
    pub border_color: Color,
    pub selected_bg: Color,
    pub text_color: Color,
    pub keyword_color: Color,
}

impl Default for PopupWidgetConfig {
    fn default() -> Self {
        Self {
            units_per_column: 8,
            units_per_row: 16,
            bg_color: Color::Rgb(30, 30, 46),
            border_color: Color::Rgb(88, 91, 112),
            selected_bg: Color::Rgb(49, 50, 68),
            text_color: Color::White,
            keyword_color: Color::Magenta,
        }
    }
}

/// Candidate list popup
#[derive(Debug, Clone, Default)]
pub struct CompletionPopupWidget {
    config: PopupWidgetConfig,
}

impl CompletionPopupWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PopupWidgetConfig) -> Self {
        Self { config }
    }

    /// Popup size in cells, including the border
    pub fn cell_size(&self, state: &PopupState) -> (u16, u16) {
        let size = state.size();
        let to_cells = |units: u32, per_cell: u32| -> u16 {
            let cells = units / per_cell.max(1);
            u16::try_from(cells).unwrap_or(u16::MAX).max(3)
        };
        (
            to_cells(size.width, self.config.units_per_column),
            to_cells(size.height, self.config.units_per_row),
        )
    }

    /// Where the popup is drawn within `area`, if it is visible
    pub fn popup_rect(&self, state: &PopupState, area: Rect) -> Option<Rect> {
        if !state.is_visible() {
            return None;
        }
        let anchor = state.anchor()?;
        let (width, height) = self.cell_size(state);

        let clamp = |v: i32, lo: u16, hi: u16| -> u16 {
            let v = v.clamp(i32::from(lo), i32::from(hi.max(lo)));
            u16::try_from(v).unwrap_or(lo)
        };
        let x = clamp(anchor.x, area.x, area.right().saturating_sub(1));
        let y = clamp(anchor.y, area.y, area.bottom().saturating_sub(1));

        let rect = Rect::new(x, y, width, height).intersection(area);
        (!rect.is_empty()).then_some(rect)
    }

    /// Index of the first visible row for `state` in a list `inner_height` rows tall
    pub fn scroll_offset(state: &PopupState, inner_height: u16) -> usize {
        let height = usize::from(inner_height.max(1));
        state
            .selected_index()
            .map_or(0, |selected| (selected + 1).saturating_sub(height))
    }

    /// Candidate row under the cell `(x, y)`, if any
    pub fn row_at(&self, state: &PopupState, area: Rect, x: u16, y: u16) -> Option<usize> {
        let rect = self.popup_rect(state, area)?;
        let inner = Self::block().inner(rect);
        if x < inner.x || x >= inner.right() || y < inner.y || y >= inner.bottom() {
            return None;
        }
        let row = Self::scroll_offset(state, inner.height) + usize::from(y - inner.y);
        (row < state.candidates().len()).then_some(row)
    }

    fn block() -> Block<'static> {
        Block::default().borders(Borders::ALL)
    }

    fn render_candidate<'a>(&self, candidate: &'a Candidate, selected: bool) -> ListItem<'a> {
        let (tag, tag_style) = match candidate.kind() {
            None => ("kw", Style::default().fg(self.config.keyword_color)),
            Some(kind) => (kind.tag(), Style::default().fg(Color::Cyan)),
        };

        let mut label_style = Style::default().fg(self.config.text_color);
        if candidate.is_keyword() {
            label_style = label_style.add_modifier(Modifier::BOLD);
        }

        let line = Line::from(vec![
            Span::styled(format!("{:<4}", tag), tag_style),
            Span::styled(candidate.display_label(), label_style),
        ]);

        let style = if selected {
            Style::default().bg(self.config.selected_bg)
        } else {
            Style::default()
        };
        ListItem::new(line).style(style)
    }
}

impl StatefulWidget for CompletionPopupWidget {
    type State = PopupState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let Some(popup_rect) = self.popup_rect(state, area) else {
            return;
        };

        Clear.render(popup_rect, buf);

        let block = Self::block()
            .border_style(Style::default().fg(self.config.border_color))
            .style(Style::default().bg(self.config.bg_color));
        let inner = block.inner(popup_rect);
        block.render(popup_rect, buf);

        let selected = state.selected_index();
        let items: Vec<ListItem> = state
            .candidates()
            .iter()
            .enumerate()
            .map(|(i, c)| self.render_candidate(c, Some(i) == selected))
            .collect();

        let mut list_state = ListState::default()
            .with_offset(Self::scroll_offset(state, inner.height))
            .with_selected(selected);
        StatefulWidget::render(List::new(items), inner, buf, &mut list_state);
    }
}
