//! Completion controller
//!
//! Orchestrates one completion attachment: locate the partial word, probe the grammar,
//! gather candidates, drive the popup and rewrite the document on acceptance.
//!
//! Every public operation swallows its own failures. Errors are logged and turn into
//! [`Outcome::Nothing`], so a key handler can call into the controller without any error
//! handling of its own.

use crate::candidates::CandidateSource;
use crate::config::CompleterConfig;
use crate::error::{CompletionError, CompletionResult};
use crate::matcher::{EntityMatcher, ModelRenderer};
use crate::popup::{OwnerId, PopupSize, PopupState};
use crate::probe::{ContextProbe, ExpressionChecker, ProbeOutcome};
use crate::surface::TextSurface;
use crate::types::{Anchor, Candidate, PartialToken};
use crate::word::WordBoundary;
use tracing::{debug, error, warn};

/// Visible effect of a controller operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The partial word was replaced by `text`
    Inserted { text: String },
    /// The popup opened with a fresh list
    PopupShown,
    /// The list of an open popup changed
    PopupUpdated,
    /// The popup closed without a document change
    PopupHidden,
    /// Nothing observable happened
    Nothing,
}

/// Auto-completion controller attached to a single text surface
pub struct CompletionController<S: TextSurface> {
    surface: S,
    boundary: WordBoundary,
    probe: ContextProbe,
    source: CandidateSource,
    popup: PopupState,
    dismiss_on_empty_refresh: bool,
    installed: bool,
}

impl<S: TextSurface> CompletionController<S> {
    /// Attach a controller to `surface`
    pub fn new(
        surface: S,
        checker: Box<dyn ExpressionChecker>,
        matcher: Box<dyn EntityMatcher>,
        renderer: Box<dyn ModelRenderer>,
        config: &CompleterConfig,
    ) -> Self {
        Self::from_parts(
            surface,
            ContextProbe::with_sentinel(checker, config.sentinel.clone()),
            CandidateSource::new(matcher, renderer),
            config,
        )
    }

    pub fn from_parts(
        surface: S,
        probe: ContextProbe,
        source: CandidateSource,
        config: &CompleterConfig,
    ) -> Self {
        let size = PopupSize {
            width: config.popup_width,
            height: config.popup_height,
        };
        Self {
            surface,
            boundary: WordBoundary::new(config.delimiters()),
            probe,
            source,
            popup: PopupState::new(size, config.max_entries),
            dismiss_on_empty_refresh: config.dismiss_on_empty_refresh,
            installed: true,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn popup(&self) -> &PopupState {
        &self.popup
    }

    pub fn is_popup_visible(&self) -> bool {
        self.popup.is_visible()
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }

    /// The partial word at the caret, read from the live document
    pub fn partial_token(&self) -> CompletionResult<Option<PartialToken>> {
        self.boundary
            .locate(&self.surface.text(), self.surface.caret())
    }

    /// Candidates for the partial word at the caret
    ///
    /// Returns an empty list when there is no partial word, when the document cannot be
    /// read, or when the checker gives no usable expectations.
    pub fn matches(&self) -> Vec<Candidate> {
        let token = match self.partial_token() {
            Ok(Some(token)) => token,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Cannot locate word to complete: {}", e);
                return Vec::new();
            }
        };

        let prefix = match self.surface.span(0, token.start_offset) {
            Ok(prefix) => prefix,
            Err(e) => {
                warn!("Cannot read expression prefix: {}", e);
                return Vec::new();
            }
        };

        match self.probe.probe(&prefix) {
            Ok(ProbeOutcome::Expected(expectations)) => {
                self.source.gather(&token.text, &expectations)
            }
            Ok(ProbeOutcome::ParseOk) => {
                debug!("Prefix accepts the probe sentinel; no completion context");
                Vec::new()
            }
            Err(e) => {
                error!("Completion probe failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Complete the word at the caret
    ///
    /// A single candidate is inserted directly. Several candidates open the popup, or
    /// refill it when it is already open.
    pub fn trigger(&mut self) -> Outcome {
        if !self.installed {
            return Outcome::Nothing;
        }

        let mut candidates = self.matches();
        match candidates.len() {
            0 => Outcome::Nothing,
            1 => {
                let text = candidates.remove(0).insert_text().to_string();
                let outcome = self.apply(&text);
                self.popup.hide();
                outcome
            }
            _ => self.show_candidates(candidates),
        }
    }

    fn show_candidates(&mut self, candidates: Vec<Candidate>) -> Outcome {
        let text = self.surface.text();

        if self.popup.is_visible() {
            if let Some(session) = self.popup.session_mut() {
                session.last_probed_text = Some(text);
            }
            self.popup.populate(candidates);
            return Outcome::PopupUpdated;
        }

        let Some(anchor) = self.popup_anchor() else {
            debug!("No anchor for completion popup; abandoning");
            return Outcome::Nothing;
        };

        self.popup.show(anchor, text);
        self.popup.populate(candidates);
        debug!(rows = self.popup.candidates().len(), "Completion popup shown");
        Outcome::PopupShown
    }

    /// Screen position for the popup: one line below the start of the partial word
    fn popup_anchor(&self) -> Option<Anchor> {
        let token = self.partial_token().ok().flatten()?;
        let anchor = self.surface.anchor_for(token.start_offset)?;
        Some(anchor.below(self.surface.line_height()))
    }

    /// Recompute the list of an open popup after the text changed
    pub fn refresh(&mut self) -> Outcome {
        if !self.installed || !self.popup.is_visible() {
            return Outcome::Nothing;
        }

        let text = self.surface.text();
        let candidates = self.matches();
        if let Some(session) = self.popup.session_mut() {
            session.last_probed_text = Some(text);
        }

        if candidates.is_empty() && self.dismiss_on_empty_refresh {
            self.popup.hide();
            return Outcome::PopupHidden;
        }

        self.popup.populate(candidates);
        Outcome::PopupUpdated
    }

    /// Refresh only if the document changed since the last probe
    pub fn refresh_if_stale(&mut self) -> Outcome {
        let stale = self
            .popup
            .session()
            .is_some_and(|session| session.is_stale(&self.surface.text()));
        if self.popup.is_visible() && stale {
            self.refresh()
        } else {
            Outcome::Nothing
        }
    }

    /// Replace the partial word with the selected candidate and close the popup
    pub fn accept(&mut self) -> Outcome {
        if !self.installed || !self.popup.is_visible() {
            return Outcome::Nothing;
        }

        let Some(text) = self.popup.selected().map(|c| c.insert_text().to_string()) else {
            return Outcome::Nothing;
        };

        let outcome = self.apply(&text);
        self.popup.hide();
        outcome
    }

    /// Close the popup and discard the session
    pub fn dismiss(&mut self) -> Outcome {
        if self.popup.is_visible() {
            self.popup.hide();
            debug!("Completion popup dismissed");
            Outcome::PopupHidden
        } else {
            Outcome::Nothing
        }
    }

    /// Move the popup selection by `delta` rows, wrapping at either end
    pub fn move_selection(&mut self, delta: isize) -> Outcome {
        if !self.installed || !self.popup.is_visible() || delta == 0 {
            return Outcome::Nothing;
        }

        for _ in 0..delta.unsigned_abs() {
            if delta > 0 {
                self.popup.select_next();
            } else {
                self.popup.select_prev();
            }
        }
        Outcome::PopupUpdated
    }

    /// Double-click on popup row `row`
    pub fn on_double_click(&mut self, row: usize) -> Outcome {
        if self.installed && self.popup.is_visible() && self.popup.select(row) {
            self.accept()
        } else {
            Outcome::Nothing
        }
    }

    /// The text component moved to another top-level window
    pub fn on_hierarchy_changed(&mut self, owner: OwnerId) {
        debug!(owner, "Text component reparented; recreating popup");
        self.popup.rebind(owner);
    }

    /// Replace `[token start, caret)` with `word`, leaving the caret after it
    pub fn insert_word(&mut self, word: &str) -> CompletionResult<()> {
        let token = self
            .partial_token()?
            .ok_or_else(|| CompletionError::DocumentAccess {
                offset: self.surface.caret(),
                len: 0,
            })?;

        self.surface.remove(token.start_offset, token.len())?;
        self.surface.insert(token.start_offset, word)?;
        self.surface
            .set_caret(token.start_offset + word.chars().count())
    }

    fn apply(&mut self, text: &str) -> Outcome {
        match self.insert_word(text) {
            Ok(()) => Outcome::Inserted {
                text: text.to_string(),
            },
            Err(e) => {
                error!("Failed to insert completion '{}': {}", text, e);
                Outcome::Nothing
            }
        }
    }

    /// Detach from the surface; further events are ignored
    pub fn uninstall(&mut self) {
        if self.installed {
            self.installed = false;
            self.popup.hide();
            debug!("Completion controller uninstalled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{ShortFormRenderer, VocabularyMatcher};
    use crate::probe::CheckError;
    use crate::surface::StringSurface;
    use crate::types::{Entity, EntityKind, ExpectedKinds, Expectations};

    /// Expects classes plus `and`/`or` everywhere
    struct ClassesEverywhere;

    impl ExpressionChecker for ClassesEverywhere {
        fn check(&self, _text: &str) -> Result<(), CheckError> {
            Err(CheckError::Parse(Expectations::new(
                ExpectedKinds::none().with(EntityKind::Class),
                vec!["and".to_string(), "or".to_string()],
            )))
        }
    }

    struct Accepting;

    impl ExpressionChecker for Accepting {
        fn check(&self, _text: &str) -> Result<(), CheckError> {
            Ok(())
        }
    }

    struct Failing;

    impl ExpressionChecker for Failing {
        fn check(&self, _text: &str) -> Result<(), CheckError> {
            Err(CheckError::Other("reasoner crashed".to_string()))
        }
    }

    fn controller(
        text: &str,
        checker: Box<dyn ExpressionChecker>,
    ) -> CompletionController<StringSurface> {
        let matcher = VocabularyMatcher::from_entities(
            vec![
                Entity::new(EntityKind::Class, "zoo#Animal"),
                Entity::new(EntityKind::Class, "zoo#Person"),
                Entity::new(EntityKind::Class, "zoo#Pet"),
            ],
            &ShortFormRenderer,
        );
        CompletionController::new(
            StringSurface::new(text),
            checker,
            Box::new(matcher),
            Box::new(ShortFormRenderer),
            &CompleterConfig::default(),
        )
    }

    #[test]
    fn test_single_match_inserts() {
        let mut c = controller("Ani", Box::new(ClassesEverywhere));
        assert_eq!(
            c.trigger(),
            Outcome::Inserted {
                text: "Animal".to_string()
            }
        );
        assert_eq!(c.surface().text(), "Animal");
        assert_eq!(c.surface().caret(), 6);
        assert!(!c.is_popup_visible());
    }

    #[test]
    fn test_keywords_match_ignoring_case() {
        let mut c = controller("An", Box::new(ClassesEverywhere));
        assert_eq!(c.trigger(), Outcome::PopupShown);
        let labels: Vec<_> = c.popup().candidates().iter().map(|c| c.insert_text()).collect();
        assert_eq!(labels, vec!["and", "Animal"]);
        assert_eq!(c.surface().text(), "An");
    }

    #[test]
    fn test_accepted_prefix_yields_nothing() {
        let mut c = controller("P", Box::new(Accepting));
        assert!(c.matches().is_empty());
        assert_eq!(c.trigger(), Outcome::Nothing);
        assert_eq!(c.surface().text(), "P");
        assert!(!c.is_popup_visible());
    }

    #[test]
    fn test_several_matches_open_popup() {
        let mut c = controller("P", Box::new(ClassesEverywhere));
        assert_eq!(c.trigger(), Outcome::PopupShown);
        let labels: Vec<_> = c.popup().candidates().iter().map(|c| c.insert_text()).collect();
        assert_eq!(labels, vec!["Person", "Pet"]);
        assert_eq!(c.surface().text(), "P");
    }

    #[test]
    fn test_popup_anchored_below_word_start() {
        let mut c = controller("Animal and P", Box::new(ClassesEverywhere));
        c.trigger();
        assert_eq!(c.popup().anchor(), Some(Anchor::new(11, 1)));
    }

    #[test]
    fn test_no_anchor_abandons_trigger() {
        let mut c = controller("P", Box::new(ClassesEverywhere));
        *c.surface_mut() = StringSurface::new("P").with_origin(None);
        assert_eq!(c.trigger(), Outcome::Nothing);
        assert!(!c.is_popup_visible());
    }

    #[test]
    fn test_checker_failure_yields_nothing() {
        let mut c = controller("P", Box::new(Failing));
        assert!(c.matches().is_empty());
        assert_eq!(c.trigger(), Outcome::Nothing);
        assert_eq!(c.surface().text(), "P");
    }

    #[test]
    fn test_refresh_narrows_and_dismisses_when_empty() {
        let mut c = controller("P", Box::new(ClassesEverywhere));
        c.trigger();

        c.surface_mut().type_str("e");
        assert_eq!(c.refresh_if_stale(), Outcome::PopupUpdated);
        assert_eq!(c.popup().candidates().len(), 2);

        c.surface_mut().type_str("r");
        assert_eq!(c.refresh_if_stale(), Outcome::PopupUpdated);
        assert_eq!(c.popup().candidates().len(), 1);
        assert_eq!(c.refresh_if_stale(), Outcome::Nothing);

        c.surface_mut().type_str("x");
        assert_eq!(c.refresh_if_stale(), Outcome::PopupHidden);
        assert!(!c.is_popup_visible());
    }

    #[test]
    fn test_refresh_keeps_empty_popup_when_configured() {
        let config = CompleterConfig {
            dismiss_on_empty_refresh: false,
            ..CompleterConfig::default()
        };
        let matcher = VocabularyMatcher::from_entities(
            vec![
                Entity::new(EntityKind::Class, "zoo#Person"),
                Entity::new(EntityKind::Class, "zoo#Pet"),
            ],
            &ShortFormRenderer,
        );
        let mut c = CompletionController::new(
            StringSurface::new("P"),
            Box::new(ClassesEverywhere),
            Box::new(matcher),
            Box::new(ShortFormRenderer),
            &config,
        );
        c.trigger();
        c.surface_mut().type_str("q");
        assert_eq!(c.refresh(), Outcome::PopupUpdated);
        assert!(c.is_popup_visible());
        assert!(c.popup().candidates().is_empty());
        assert_eq!(c.accept(), Outcome::Nothing);
    }

    #[test]
    fn test_refresh_when_closed_does_nothing() {
        let mut c = controller("P", Box::new(ClassesEverywhere));
        assert_eq!(c.refresh(), Outcome::Nothing);
        assert!(!c.is_popup_visible());
    }

    #[test]
    fn test_double_click_accepts_row() {
        let mut c = controller("P", Box::new(ClassesEverywhere));
        c.trigger();
        assert_eq!(
            c.on_double_click(1),
            Outcome::Inserted {
                text: "Pet".to_string()
            }
        );
        assert_eq!(c.surface().text(), "Pet");
        assert!(!c.is_popup_visible());
        assert_eq!(c.on_double_click(0), Outcome::Nothing);
    }

    #[test]
    fn test_hierarchy_change_recreates_popup() {
        let mut c = controller("P", Box::new(ClassesEverywhere));
        c.trigger();
        c.on_hierarchy_changed(3);
        assert!(!c.is_popup_visible());
        assert_eq!(c.popup().owner(), Some(3));
    }

    #[test]
    fn test_uninstall_is_idempotent() {
        let mut c = controller("P", Box::new(ClassesEverywhere));
        c.trigger();
        c.uninstall();
        assert!(!c.is_installed());
        assert!(!c.is_popup_visible());
        c.uninstall();
        assert_eq!(c.trigger(), Outcome::Nothing);
    }

    #[test]
    fn test_insert_word_mid_document() {
        let mut c = controller("Pe and Animal", Box::new(ClassesEverywhere));
        c.surface_mut().set_caret(2).unwrap();
        c.insert_word("Person").unwrap();
        assert_eq!(c.surface().text(), "Person and Animal");
        assert_eq!(c.surface().caret(), 6);
    }

    #[test]
    fn test_insert_word_at_origin_fails() {
        let mut c = controller("", Box::new(ClassesEverywhere));
        assert!(c.insert_word("Animal").is_err());
        assert_eq!(c.surface().text(), "");
    }
}
