//! Ontoedit TUI
//!
//! A terminal class-expression editor built on ratatui and tui-textarea, wired to the
//! `ontoedit-completion` controller:
//!
//! - [`TextAreaSurface`]: the completer's text surface over a [`tui_textarea::TextArea`]
//! - [`CompletionPopupWidget`]: renders the candidate popup over the editor
//! - [`key_input`] / [`ClickTracker`]: crossterm events in the completer's terms
//! - [`SampleClassExpressionChecker`]: a small grammar that reports parse expectations
//! - [`Editor`] / [`TuiApp`]: the demo application

pub mod app;
pub mod error;
pub mod event;
pub mod popup_view;
pub mod sample_grammar;
pub mod surface;

pub use app::{Editor, TuiApp};
pub use error::{TuiError, TuiResult};
pub use event::{key_input, ClickTracker, DOUBLE_CLICK_INTERVAL};
pub use popup_view::{CompletionPopupWidget, PopupWidgetConfig};
pub use sample_grammar::{sample_vocabulary, SampleClassExpressionChecker};
pub use surface::TextAreaSurface;
