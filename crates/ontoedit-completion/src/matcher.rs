//! Entity lookup and rendering
//!
//! The completer consumes two collaborators from the model layer: an [`EntityMatcher`] that
//! finds entities by rendered-name prefix, and a [`ModelRenderer`] that produces the text to
//! insert. [`VocabularyMatcher`] and [`ShortFormRenderer`] are in-memory implementations for
//! hosts that keep their vocabulary in a flat list.

use crate::error::CompletionResult;
use crate::types::{Entity, ExpectedKinds};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Finds entities whose rendering starts with a prefix
pub trait EntityMatcher {
    /// Case-insensitive prefix match restricted to `kinds`
    ///
    /// Returns nothing when `kinds` is empty. The order of the result is up to the
    /// implementation but must be stable within a call.
    fn matches(&self, prefix: &str, kinds: ExpectedKinds) -> Vec<Entity>;
}

/// Produces the canonical textual form of an entity
pub trait ModelRenderer {
    fn render(&self, entity: &Entity) -> String;
}

impl<T: EntityMatcher + ?Sized> EntityMatcher for Box<T> {
    fn matches(&self, prefix: &str, kinds: ExpectedKinds) -> Vec<Entity> {
        (**self).matches(prefix, kinds)
    }
}

impl<T: ModelRenderer + ?Sized> ModelRenderer for Box<T> {
    fn render(&self, entity: &Entity) -> String {
        (**self).render(entity)
    }
}

/// Renders an entity by the fragment of its IRI, or its last path segment
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortFormRenderer;

impl ModelRenderer for ShortFormRenderer {
    fn render(&self, entity: &Entity) -> String {
        let iri = entity.iri.trim_end_matches(['/', '#']);
        let short = iri
            .rsplit_once('#')
            .or_else(|| iri.rsplit_once('/'))
            .map(|(_, tail)| tail)
            .unwrap_or(iri);
        if short.is_empty() {
            entity.iri.clone()
        } else {
            short.to_string()
        }
    }
}

/// A flat list of entities, as stored in vocabulary files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl Vocabulary {
    pub fn load_from_yaml(path: &Path) -> CompletionResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn load_from_json(path: &Path) -> CompletionResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// In-memory matcher over a vocabulary, keeping insertion order
pub struct VocabularyMatcher {
    entries: Vec<IndexedEntity>,
}

struct IndexedEntity {
    entity: Entity,
    folded: String,
}

impl VocabularyMatcher {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Index `entities` under the renderings produced by `renderer`
    pub fn from_entities(
        entities: impl IntoIterator<Item = Entity>,
        renderer: &dyn ModelRenderer,
    ) -> Self {
        let mut matcher = Self::new();
        for entity in entities {
            matcher.insert(entity, renderer);
        }
        matcher
    }

    pub fn insert(&mut self, entity: Entity, renderer: &dyn ModelRenderer) {
        let folded = renderer.render(&entity).to_lowercase();
        self.entries.push(IndexedEntity { entity, folded });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for VocabularyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityMatcher for VocabularyMatcher {
    fn matches(&self, prefix: &str, kinds: ExpectedKinds) -> Vec<Entity> {
        if kinds.is_empty() {
            return Vec::new();
        }
        let prefix = prefix.to_lowercase();
        self.entries
            .iter()
            .filter(|e| kinds.contains(e.entity.kind) && e.folded.starts_with(&prefix))
            .map(|e| e.entity.clone())
            .collect()
    }
}
