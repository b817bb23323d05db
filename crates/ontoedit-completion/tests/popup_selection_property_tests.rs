/// Property-based tests for popup population, navigation and acceptance
use ontoedit_completion::{
    Anchor, Candidate, CheckError, CompleterConfig, CompletionController, Entity, EntityKind,
    ExpectedKinds, Expectations, ExpressionChecker, Outcome, PopupSize, PopupState,
    ShortFormRenderer, StringSurface, TextSurface, VocabularyMatcher,
};
use proptest::prelude::*;

struct AnyClass;

impl ExpressionChecker for AnyClass {
    fn check(&self, _text: &str) -> Result<(), CheckError> {
        Err(CheckError::Parse(Expectations::new(
            ExpectedKinds::none().with(EntityKind::Class),
            Vec::new(),
        )))
    }
}

fn candidates(n: usize) -> Vec<Candidate> {
    (0..n).map(|i| Candidate::keyword(format!("kw{}", i))).collect()
}

proptest! {
    /// The list never exceeds the configured maximum and keeps the head
    #[test]
    fn prop_populate_respects_max_entries(n in 0usize..300, max in 1usize..150) {
        let mut popup = PopupState::new(PopupSize::default(), max);
        popup.show(Anchor::default(), String::new());
        popup.populate(candidates(n));

        prop_assert_eq!(popup.candidates().len(), n.min(max));
        if n > 0 {
            prop_assert_eq!(popup.candidates()[0].insert_text(), "kw0");
            prop_assert_eq!(popup.selected_index(), Some(0));
        }
    }

    /// Selection stays in range and wraps in both directions
    #[test]
    fn prop_selection_wraps(n in 1usize..50, moves in prop::collection::vec(any::<bool>(), 0..100)) {
        let mut popup = PopupState::default();
        popup.show(Anchor::default(), String::new());
        popup.populate(candidates(n));

        let mut expected = 0usize;
        for forward in moves {
            if forward {
                popup.select_next();
                expected = (expected + 1) % n;
            } else {
                popup.select_prev();
                expected = (expected + n - 1) % n;
            }
            prop_assert_eq!(popup.selected_index(), Some(expected));
        }
    }

    /// Accepting leaves exactly the chosen rendering where the partial word started
    #[test]
    fn prop_accept_replaces_partial_word(
        lead in "[a-z]{1,8}( and| or)? ",
        names in prop::collection::btree_set("Q[a-z]{2,6}", 2..6),
        pick in any::<prop::sample::Index>(),
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let matcher = VocabularyMatcher::from_entities(
            names.iter().map(|n| Entity::new(EntityKind::Class, format!("t#{}", n))),
            &ShortFormRenderer,
        );
        let mut controller = CompletionController::new(
            StringSurface::new(format!("{}Q", lead)),
            Box::new(AnyClass),
            Box::new(matcher),
            Box::new(ShortFormRenderer),
            &CompleterConfig::default(),
        );

        prop_assert_eq!(controller.trigger(), Outcome::PopupShown);
        let row = pick.index(names.len());
        for _ in 0..row {
            controller.move_selection(1);
        }
        let chosen = controller.popup().selected().unwrap().insert_text().to_string();

        prop_assert_eq!(controller.accept(), Outcome::Inserted { text: chosen.clone() });
        let text = controller.surface().text();
        prop_assert_eq!(&text, &format!("{}{}", lead, chosen));
        prop_assert_eq!(controller.surface().caret(), text.chars().count());
        prop_assert!(!controller.is_popup_visible());
    }
}
