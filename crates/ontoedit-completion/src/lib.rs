/// Ontoedit Completion
///
/// Context-sensitive auto-completion for class-expression editors.
///
/// # Architecture
///
/// The completer never embeds a parser. To find out what may follow the caret it asks the
/// editor's expression checker to parse a deliberately corrupted prefix and reads the
/// expected kinds and keywords off the resulting parse error:
///
/// 1. **Word boundary** ([`WordBoundary`]): locate the partial word ending at the caret
/// 2. **Context probe** ([`ContextProbe`]): check `prefix + "**"` and harvest expectations
/// 3. **Candidate source** ([`CandidateSource`]): matching keywords, then matching entities
/// 4. **Controller** ([`CompletionController`]): insert a lone candidate, or drive the popup
/// 5. **Input dispatcher** ([`InputDispatcher`]): map key events to controller actions
///
/// # Collaborators
///
/// The host supplies an [`ExpressionChecker`], an [`EntityMatcher`], a [`ModelRenderer`] and a
/// [`TextSurface`]. [`VocabularyMatcher`], [`ShortFormRenderer`] and [`StringSurface`] are
/// in-memory implementations.
///
/// # Example
///
/// ```ignore
/// use ontoedit_completion::*;
///
/// let renderer = ShortFormRenderer;
/// let matcher = VocabularyMatcher::from_entities(vocabulary.entities, &renderer);
/// let mut controller = CompletionController::new(
///     StringSurface::new("Person and "),
///     Box::new(checker),
///     Box::new(matcher),
///     Box::new(renderer),
///     &CompleterConfig::default(),
/// );
///
/// let dispatch = InputDispatcher::dispatch(&mut controller, KeyInput::press(KeyCode::Tab));
/// assert!(dispatch.consumed);
/// ```
pub mod candidates;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod matcher;
pub mod popup;
pub mod probe;
pub mod surface;
pub mod types;
pub mod word;

pub use candidates::CandidateSource;
pub use config::{CompleterConfig, ConfigFormat, ConfigLoader, DEFAULT_MAX_ENTRIES};
pub use controller::{CompletionController, Outcome};
pub use error::{CompletionError, CompletionResult};
pub use input::{Dispatch, InputDispatcher, KeyCode, KeyInput, KeyModifiers, KeyPhase};
pub use matcher::{EntityMatcher, ModelRenderer, ShortFormRenderer, Vocabulary, VocabularyMatcher};
pub use popup::{CompletionSession, OwnerId, PopupSize, PopupState};
pub use probe::{CheckError, ContextProbe, ExpressionChecker, ProbeOutcome, DEFAULT_SENTINEL};
pub use surface::{StringSurface, TextSurface};
pub use types::*;
pub use word::{DelimiterSet, WordBoundary};
