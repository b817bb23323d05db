//! Demo editor application
//!
//! [`Editor`] holds the editing state and reacts to crossterm events; [`TuiApp`] owns the
//! terminal and runs the event loop around it.

use crate::error::{TuiError, TuiResult};
use crate::event::{key_input, ClickTracker};
use crate::popup_view::CompletionPopupWidget;
use crate::sample_grammar::SampleClassExpressionChecker;
use crate::surface::TextAreaSurface;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode as CtKeyCode, KeyEvent,
        KeyModifiers as CtKeyModifiers, KeyboardEnhancementFlags, MouseEvent,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ontoedit_completion::{
    CompleterConfig, CompletionController, InputDispatcher, KeyInput, KeyPhase, OwnerId, Outcome,
    ShortFormRenderer, Vocabulary, VocabularyMatcher,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::{debug, info};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const HELP: &str = "Tab/Ctrl+Space complete  Enter accept  Esc dismiss  Ctrl+Q quit";

fn editor_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(" Class expression ")
}

/// Class-expression editor with completion attached
pub struct Editor {
    controller: CompletionController<TextAreaSurface>,
    popup_widget: CompletionPopupWidget,
    clicks: ClickTracker,
    owner: OwnerId,
    /// Full frame area at the last draw
    screen: Rect,
    synthesize_release: bool,
    status: String,
    should_quit: bool,
}

impl Editor {
    pub fn new(text: &str, vocabulary: Vocabulary, config: &CompleterConfig) -> Self {
        let renderer = ShortFormRenderer;
        let checker = SampleClassExpressionChecker::new(&vocabulary, &renderer);
        let matcher = VocabularyMatcher::from_entities(vocabulary.entities, &renderer);
        info!("Loaded vocabulary with {} entities", matcher.len());

        let mut surface = TextAreaSurface::new(text);
        surface.set_block(editor_block());

        let controller = CompletionController::new(
            surface,
            Box::new(checker),
            Box::new(matcher),
            Box::new(renderer),
            config,
        );

        Self {
            controller,
            popup_widget: CompletionPopupWidget::new(),
            clicks: ClickTracker::new(),
            owner: 0,
            screen: Rect::default(),
            synthesize_release: true,
            status: String::new(),
            should_quit: false,
        }
    }

    /// Whether a release is dispatched right after every press
    ///
    /// Needed on terminals that never report key releases.
    pub fn set_synthesize_release(&mut self, synthesize: bool) {
        self.synthesize_release = synthesize;
    }

    pub fn controller(&self) -> &CompletionController<TextAreaSurface> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut CompletionController<TextAreaSurface> {
        &mut self.controller
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(&mouse),
            Event::Resize(width, height) => {
                self.screen = Rect::new(0, 0, width, height);
                self.owner += 1;
                self.controller.on_hierarchy_changed(self.owner);
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let input = key_input(&key);
        if input.phase == KeyPhase::Press
            && key.modifiers.contains(CtKeyModifiers::CONTROL)
            && matches!(key.code, CtKeyCode::Char('c') | CtKeyCode::Char('q'))
        {
            self.should_quit = true;
            return;
        }

        let dispatch = InputDispatcher::dispatch(&mut self.controller, input);
        self.note_outcome(&dispatch.outcome);
        if input.phase != KeyPhase::Press {
            return;
        }

        if !dispatch.consumed && !input.is_completion_shortcut() {
            self.controller.surface_mut().textarea_mut().input(key);
        }

        if self.synthesize_release {
            let release = KeyInput::release(input.code).with_modifiers(input.modifiers);
            let dispatch = InputDispatcher::dispatch(&mut self.controller, release);
            self.note_outcome(&dispatch.outcome);
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        let Some((x, y)) = self.clicks.on_mouse(mouse) else {
            return;
        };
        if let Some(row) = self
            .popup_widget
            .row_at(self.controller.popup(), self.screen, x, y)
        {
            let outcome = self.controller.on_double_click(row);
            self.note_outcome(&outcome);
        }
    }

    fn note_outcome(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Nothing => return,
            Outcome::Inserted { text } => self.status = format!("Inserted {}", text),
            Outcome::PopupShown | Outcome::PopupUpdated => {
                self.status = format!(
                    "{} candidates",
                    self.controller.popup().candidates().len()
                )
            }
            Outcome::PopupHidden => self.status.clear(),
        }
        debug!("Completion outcome: {:?}", outcome);
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.screen = area;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("ontoedit", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  class expression editor"),
        ]);
        frame.render_widget(Paragraph::new(title), chunks[0]);

        frame.render_widget(self.controller.surface().textarea(), chunks[1]);
        self.controller
            .surface_mut()
            .note_render(editor_block().inner(chunks[1]));

        let help = if self.status.is_empty() {
            HELP.to_string()
        } else {
            format!("{}  |  {}", self.status, HELP)
        };
        frame.render_widget(
            Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
            chunks[2],
        );

        // The widget draws from a snapshot; selection changes only come from the controller
        let mut popup = self.controller.popup().clone();
        frame.render_stateful_widget(self.popup_widget.clone(), area, &mut popup);
    }

    /// Detach completion before the editor goes away
    pub fn shutdown(&mut self) {
        self.controller.uninstall();
    }
}

/// Terminal application running an [`Editor`]
pub struct TuiApp {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    editor: Editor,
    keyboard_enhanced: bool,
}

impl TuiApp {
    /// Take over the terminal
    pub fn new(mut editor: Editor) -> TuiResult<Self> {
        enable_raw_mode()
            .map_err(|e| TuiError::terminal(format!("Failed to enable raw mode: {}", e)))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|e| {
            TuiError::terminal(format!("Failed to enter alternate screen: {}", e))
        })?;

        let keyboard_enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
        if keyboard_enhanced {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        editor.set_synthesize_release(!keyboard_enhanced);
        info!("Key release events reported: {}", keyboard_enhanced);

        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self {
            terminal,
            editor,
            keyboard_enhanced,
        })
    }

    /// Run the event loop until the user quits
    pub fn run(&mut self) -> TuiResult<()> {
        while !self.editor.should_quit() {
            self.terminal.draw(|frame| self.editor.draw(frame))?;

            if event::poll(POLL_INTERVAL)? {
                self.editor.handle_event(event::read()?);
            }
        }

        self.editor.shutdown();
        Ok(())
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}
