//! End-to-end editing sessions through the terminal editor
//!
//! Drives [`Editor`] with crossterm events and renders it to a ratatui test backend, the way
//! the binary does, and checks what lands in the document and on screen.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ontoedit_completion::{CompleterConfig, ConfigFormat, ConfigLoader, TextSurface};
use ontoedit_tui::{sample_vocabulary, Editor};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
    Event::Key(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

fn type_text(editor: &mut Editor, text: &str) {
    for c in text.chars() {
        editor.handle_event(key(KeyCode::Char(c), KeyModifiers::NONE));
    }
}

struct Session {
    editor: Editor,
    terminal: Terminal<TestBackend>,
}

impl Session {
    fn new(config: &CompleterConfig) -> Self {
        let editor = Editor::new("", sample_vocabulary(), config);
        let terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut session = Self { editor, terminal };
        session.draw();
        session
    }

    fn draw(&mut self) {
        let editor = &mut self.editor;
        self.terminal.draw(|frame| editor.draw(frame)).unwrap();
    }

    fn send(&mut self, event: Event) {
        self.editor.handle_event(event);
        self.draw();
    }

    fn text(&self) -> String {
        self.editor.controller().surface().text()
    }

    fn screen_row(&self, y: u16) -> String {
        let buffer: &Buffer = self.terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }
}

#[test]
fn build_expression_with_completion() {
    let mut s = Session::new(&CompleterConfig::default());

    type_text(&mut s.editor, "Pi");
    s.send(key(KeyCode::Tab, KeyModifiers::NONE));
    // Pizza, PizzaBase and PizzaTopping all start with "Pi"
    assert!(s.editor.controller().is_popup_visible());
    s.send(key(KeyCode::Enter, KeyModifiers::NONE));
    assert_eq!(s.text(), "Pizza");

    type_text(&mut s.editor, " and hasTo");
    s.send(key(KeyCode::Tab, KeyModifiers::NONE));
    assert_eq!(s.text(), "Pizza and hasTopping");

    type_text(&mut s.editor, " so");
    s.send(key(KeyCode::Char(' '), KeyModifiers::CONTROL));
    assert_eq!(s.text(), "Pizza and hasTopping some");

    type_text(&mut s.editor, " Moz");
    s.send(key(KeyCode::Tab, KeyModifiers::NONE));
    assert_eq!(s.text(), "Pizza and hasTopping some MozzarellaTopping");
    assert!(!s.editor.controller().is_popup_visible());
}

#[test]
fn popup_is_drawn_below_partial_word() {
    let mut s = Session::new(&CompleterConfig::default());
    type_text(&mut s.editor, "Pizza and hasTopping some M");
    s.send(key(KeyCode::Tab, KeyModifiers::NONE));

    // Editor text starts at row 2; the popup border is on row 3 and its rows follow
    let first = s.screen_row(4);
    assert!(first.contains("cls MeatTopping"), "row was {:?}", first);
    assert!(s.screen_row(5).contains("cls MozzarellaTopping"));
    assert!(s.screen_row(6).contains("cls MushroomTopping"));
    assert!(s.screen_row(23).contains("3 candidates"));
}

#[test]
fn escape_closes_popup_and_typing_continues() {
    let mut s = Session::new(&CompleterConfig::default());
    type_text(&mut s.editor, "Pizza and ");
    s.send(key(KeyCode::Tab, KeyModifiers::NONE));
    assert!(s.editor.controller().is_popup_visible());

    s.send(key(KeyCode::Esc, KeyModifiers::NONE));
    assert!(!s.editor.controller().is_popup_visible());

    type_text(&mut s.editor, "not");
    assert_eq!(s.text(), "Pizza and not");
}

#[test]
fn configured_entry_limit_caps_popup() {
    let config = ConfigLoader::load_from_string("max_entries: 2\n", ConfigFormat::Yaml).unwrap();
    let mut s = Session::new(&config);
    type_text(&mut s.editor, "Pizza and ");
    s.send(key(KeyCode::Tab, KeyModifiers::NONE));

    assert_eq!(s.editor.controller().popup().candidates().len(), 2);
}

#[test]
fn typing_away_every_match_dismisses_popup() {
    let mut s = Session::new(&CompleterConfig::default());
    type_text(&mut s.editor, "Pizza and M");
    s.send(key(KeyCode::Tab, KeyModifiers::NONE));
    assert!(s.editor.controller().is_popup_visible());

    type_text(&mut s.editor, "q");

    assert!(!s.editor.controller().is_popup_visible());
    assert_eq!(s.text(), "Pizza and Mq");
}
