//! Locating the partial token under the caret

use crate::error::{CompletionError, CompletionResult};
use crate::types::PartialToken;

/// Characters that terminate a word when scanning back from the caret
///
/// Tabs and carriage returns are not part of the standard set.
const STANDARD_DELIMITERS: [char; 10] = [' ', '\n', '[', ']', '{', '}', '(', ')', ',', '^'];

/// Set of word delimiter characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterSet {
    chars: Vec<char>,
}

impl DelimiterSet {
    /// The delimiter set used by the class-expression editor
    pub fn standard() -> Self {
        Self {
            chars: STANDARD_DELIMITERS.to_vec(),
        }
    }

    /// Extend the set with additional characters
    pub fn with_extra(mut self, extra: impl IntoIterator<Item = char>) -> Self {
        for c in extra {
            if !self.chars.contains(&c) {
                self.chars.push(c);
            }
        }
        self
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }
}

impl Default for DelimiterSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Finds the partial token that ends at the caret
#[derive(Debug, Clone, Default)]
pub struct WordBoundary {
    delimiters: DelimiterSet,
}

impl WordBoundary {
    pub fn new(delimiters: DelimiterSet) -> Self {
        Self { delimiters }
    }

    /// Locate the token `[start, caret)` in `text`
    ///
    /// Returns `Ok(None)` when the caret sits at offset 0, and an error when the caret lies
    /// beyond the end of the document.
    pub fn locate(&self, text: &str, caret: usize) -> CompletionResult<Option<PartialToken>> {
        if caret == 0 {
            return Ok(None);
        }

        let before: Vec<char> = text.chars().take(caret).collect();
        if before.len() < caret {
            return Err(CompletionError::out_of_range(caret, 0));
        }

        let start = before
            .iter()
            .rposition(|c| self.delimiters.contains(*c))
            .map(|idx| idx + 1)
            .unwrap_or(0);

        Ok(Some(PartialToken {
            start_offset: start,
            caret_offset: caret,
            text: before[start..].iter().collect(),
        }))
    }
}
