//! Core data types shared by the completion pipeline

use serde::{Deserialize, Serialize};

/// Kind of a named ontology entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Class,
    ObjectProperty,
    DataProperty,
    Individual,
    Datatype,
}

impl EntityKind {
    /// All kinds, in declaration order
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Class,
        EntityKind::ObjectProperty,
        EntityKind::DataProperty,
        EntityKind::Individual,
        EntityKind::Datatype,
    ];

    /// Short tag shown next to a candidate in the popup
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Class => "cls",
            Self::ObjectProperty => "obj",
            Self::DataProperty => "dat",
            Self::Individual => "ind",
            Self::Datatype => "dt",
        }
    }
}

/// The grammatical categories legal at the caret
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedKinds {
    pub class: bool,
    pub object_property: bool,
    pub data_property: bool,
    pub individual: bool,
    pub datatype: bool,
}

impl ExpectedKinds {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            class: true,
            object_property: true,
            data_property: true,
            individual: true,
            datatype: true,
        }
    }

    /// Builder-style helper adding one kind
    pub fn with(mut self, kind: EntityKind) -> Self {
        match kind {
            EntityKind::Class => self.class = true,
            EntityKind::ObjectProperty => self.object_property = true,
            EntityKind::DataProperty => self.data_property = true,
            EntityKind::Individual => self.individual = true,
            EntityKind::Datatype => self.datatype = true,
        }
        self
    }

    pub fn contains(&self, kind: EntityKind) -> bool {
        match kind {
            EntityKind::Class => self.class,
            EntityKind::ObjectProperty => self.object_property,
            EntityKind::DataProperty => self.data_property,
            EntityKind::Individual => self.individual,
            EntityKind::Datatype => self.datatype,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.class || self.object_property || self.data_property || self.individual || self.datatype)
    }

    /// Iterate over the contained kinds in declaration order
    pub fn iter(&self) -> impl Iterator<Item = EntityKind> + '_ {
        EntityKind::ALL.into_iter().filter(move |k| self.contains(*k))
    }
}

impl FromIterator<EntityKind> for ExpectedKinds {
    fn from_iter<I: IntoIterator<Item = EntityKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), Self::with)
    }
}

/// What the parser will accept after a prefix: entity kinds plus keywords in parser order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expectations {
    pub kinds: ExpectedKinds,
    pub keywords: Vec<String>,
}

impl Expectations {
    pub fn new(kinds: ExpectedKinds, keywords: Vec<String>) -> Self {
        Self { kinds, keywords }
    }
}

/// Opaque handle to a named entity of the model
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub iri: String,
}

impl Entity {
    pub fn new(kind: EntityKind, iri: impl Into<String>) -> Self {
        Self {
            kind,
            iri: iri.into(),
        }
    }
}

/// The contiguous non-delimiter span ending at the caret
///
/// Offsets are character offsets into the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialToken {
    pub start_offset: usize,
    pub caret_offset: usize,
    pub text: String,
}

impl PartialToken {
    /// Number of characters in the token
    pub fn len(&self) -> usize {
        self.caret_offset - self.start_offset
    }

    pub fn is_empty(&self) -> bool {
        self.start_offset == self.caret_offset
    }
}

/// A single completion proposal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// A reserved word of the grammar, inserted verbatim
    Keyword(String),
    /// A named entity together with its rendering
    Entity {
        entity: Entity,
        display_label: String,
        insert_text: String,
    },
}

impl Candidate {
    pub fn keyword(text: impl Into<String>) -> Self {
        Self::Keyword(text.into())
    }

    /// Build an entity candidate from its rendering; label and insert text coincide
    pub fn entity(entity: Entity, rendering: impl Into<String>) -> Self {
        let rendering = rendering.into();
        Self::Entity {
            entity,
            display_label: rendering.clone(),
            insert_text: rendering,
        }
    }

    /// The token that replaces the partial word on acceptance
    pub fn insert_text(&self) -> &str {
        match self {
            Self::Keyword(text) => text,
            Self::Entity { insert_text, .. } => insert_text,
        }
    }

    pub fn display_label(&self) -> &str {
        match self {
            Self::Keyword(text) => text,
            Self::Entity { display_label, .. } => display_label,
        }
    }

    pub fn is_keyword(&self) -> bool {
        matches!(self, Self::Keyword(_))
    }

    /// Entity kind, `None` for keywords
    pub fn kind(&self) -> Option<EntityKind> {
        match self {
            Self::Keyword(_) => None,
            Self::Entity { entity, .. } => Some(entity.kind),
        }
    }
}

/// Screen-space position in logical units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Anchor {
    pub x: i32,
    pub y: i32,
}

impl Anchor {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shift the anchor down by `dy` units
    pub fn below(self, dy: i32) -> Self {
        Self {
            x: self.x,
            y: self.y + dy,
        }
    }
}
