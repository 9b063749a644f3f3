//! Reference and qualifier annotations
//!
//! Annotations nest exactly one level: snaks inside a reference or
//! qualifier group are mapped without annotations of their own.

use serde_json::{Map, Value};
use wd2rdbl_domain::namespace::{keyword, term};
use wd2rdbl_domain::SnakGroup;

use crate::value::ValueMapper;
use crate::vocab::VocabularyIndex;

/// Key of the mapped reference groups inside an annotation block
pub const REFERENCE: &str = "reference";

/// Key of the mapped qualifier group inside an annotation block
pub const QUALIFICATION: &str = "qualification";

/// Attaches reference and qualifier metadata to mapped values
#[derive(Debug, Clone, Copy)]
pub struct AnnotationBuilder<'a> {
    vocab: &'a VocabularyIndex,
    values: ValueMapper<'a>,
}

impl<'a> AnnotationBuilder<'a> {
    /// Create an annotation builder reading from `vocab`
    pub fn new(vocab: &'a VocabularyIndex) -> Self {
        Self {
            vocab,
            values: ValueMapper::new(vocab),
        }
    }

    /// Annotate a mapped value
    ///
    /// Without references and qualifiers the value is returned as is.
    /// Otherwise non-object values are wrapped as `{"@value": v}` and an
    /// `@annotation` block is attached.
    pub fn annotate(&self, value: Value, references: &[SnakGroup], qualifiers: &SnakGroup) -> Value {
        if references.is_empty() && qualifiers.is_empty() {
            return value;
        }

        let mut node = match value {
            Value::Object(node) => node,
            other => {
                let mut node = Map::new();
                node.insert(keyword::VALUE.to_string(), other);
                node
            }
        };

        let mut annotation = Map::new();
        if !references.is_empty() {
            let groups = references
                .iter()
                .map(|group| Value::Object(self.map_group(group)))
                .collect();
            annotation.insert(REFERENCE.to_string(), Value::Array(groups));
        }
        if !qualifiers.is_empty() {
            annotation.insert(QUALIFICATION.to_string(), Value::Object(self.map_group(qualifiers)));
        }

        node.insert(keyword::ANNOTATION.to_string(), Value::Object(annotation));
        Value::Object(node)
    }

    /// Map one reference or qualifier group to `{term: [values]}`
    ///
    /// The Wikimedia import URL property is always mapped as a link,
    /// whatever its declared datatype.
    pub fn map_group(&self, group: &SnakGroup) -> Map<String, Value> {
        let mut mapped = Map::new();

        for (property, snaks) in group.iter() {
            let term = self.vocab.resolve_property(property);
            let as_link = term == term::IMPORT_URL;
            let values = snaks
                .iter()
                .map(|snak| self.values.map_snak(snak, as_link))
                .collect();
            mapped.insert(term.to_string(), Value::Array(values));
        }

        mapped
    }
}
