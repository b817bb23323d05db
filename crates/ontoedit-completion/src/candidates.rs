//! Assembling the candidate list for a partial word

use crate::matcher::{EntityMatcher, ModelRenderer};
use crate::types::{Candidate, Expectations};

/// Combines expected keywords and matching entities into candidates
///
/// Keywords come first in the order the parser reported them, followed by entities in
/// matcher order. Nothing is ranked or de-duplicated.
pub struct CandidateSource {
    matcher: Box<dyn EntityMatcher>,
    renderer: Box<dyn ModelRenderer>,
}

impl CandidateSource {
    pub fn new(matcher: Box<dyn EntityMatcher>, renderer: Box<dyn ModelRenderer>) -> Self {
        Self { matcher, renderer }
    }

    pub fn gather(&self, partial: &str, expectations: &Expectations) -> Vec<Candidate> {
        let folded = partial.to_lowercase();
        let entities = self.matcher.matches(partial, expectations.kinds);

        let mut candidates = Vec::with_capacity(entities.len() + expectations.keywords.len());
        candidates.extend(
            expectations
                .keywords
                .iter()
                .filter(|kw| kw.to_lowercase().starts_with(&folded))
                .map(|kw| Candidate::keyword(kw.clone())),
        );
        candidates.extend(entities.into_iter().map(|entity| {
            let rendering = self.renderer.render(&entity);
            Candidate::entity(entity, rendering)
        }));
        candidates
    }
}
