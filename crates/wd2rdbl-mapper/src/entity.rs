//! Entity mapping - one source record to one normalized node

use serde_json::Value;
use wd2rdbl_domain::namespace::{join_iri, FILE_PREFIX, INSTANCE_OF, WD_DATA};
use wd2rdbl_domain::{Rank, RawEntity, SnakKind, Statement};

use crate::annotation::AnnotationBuilder;
use crate::node::{DatasetDescriptor, NormalizedNode, ReverseRelations};
use crate::value::{commons_file_iri, link_iri, ValueMapper};
use crate::vocab::VocabularyIndex;

/// Maps whole entities, composing value mapping and annotation per statement
#[derive(Debug, Clone, Copy)]
pub struct EntityMapper<'a> {
    vocab: &'a VocabularyIndex,
    values: ValueMapper<'a>,
    annotations: AnnotationBuilder<'a>,
}

impl<'a> EntityMapper<'a> {
    /// Create an entity mapper reading from `vocab`
    pub fn new(vocab: &'a VocabularyIndex) -> Self {
        Self {
            vocab,
            values: ValueMapper::new(vocab),
            annotations: AnnotationBuilder::new(vocab),
        }
    }

    /// Map one entity
    ///
    /// Statements under `P31` become the node types. The group is consumed
    /// there and never emitted under its own term (such as `rdf:type`), even
    /// when the vocabulary maps one. Every other group is keyed by its
    /// readable term, or by the source property id when the vocabulary has
    /// no term for it.
    pub fn map_entity(&self, entity: &RawEntity) -> NormalizedNode {
        let mut node = NormalizedNode {
            id: link_iri(&entity.id),
            types: self.infer_types(entity),
            labels: entity.labels.clone(),
            descriptions: entity.descriptions.clone(),
            title: None,
            properties: Vec::new(),
            reverse: ReverseRelations {
                encodes_creative_work: None,
                main_entity: DatasetDescriptor {
                    id: join_iri(WD_DATA, &entity.id),
                    modified: entity.modified.clone(),
                },
            },
        };

        if let Some(title) = entity.title.as_deref().filter(|title| *title != entity.id) {
            if title.starts_with(FILE_PREFIX) {
                node.reverse.encodes_creative_work = Some(commons_file_iri(title));
            } else {
                node.title = Some(title.to_string());
            }
        }

        for (property, statements) in &entity.statements {
            if property == INSTANCE_OF {
                continue;
            }
            let term = self.vocab.resolve_property(property).to_string();
            let values = statements
                .iter()
                .filter(|stmt| stmt.effective_rank() == Rank::Normal)
                .filter(|stmt| stmt.mainsnak.kind != SnakKind::NoValue)
                .map(|stmt| self.map_statement(stmt))
                .collect();
            node.set_property(term, values);
        }

        node
    }

    /// Types from rank-normal `P31` statements, in source order without
    /// duplicates; the capitalized entity kind when there are none
    pub fn infer_types(&self, entity: &RawEntity) -> Vec<String> {
        let mut types: Vec<String> = Vec::new();

        for stmt in entity.statements_for(INSTANCE_OF) {
            if stmt.rank != Some(Rank::Normal) {
                continue;
            }
            let Some(target) = stmt.mainsnak.target_id() else {
                continue;
            };
            let symbol = self.vocab.resolve_symbol(&target);
            if !types.contains(&symbol) {
                types.push(symbol);
            }
        }

        if types.is_empty() {
            types.push(title_case(&entity.kind));
        }

        types
    }

    /// Map one statement; `somevalue` maps to `null` without annotations
    fn map_statement(&self, stmt: &Statement) -> Value {
        if stmt.mainsnak.kind == SnakKind::SomeValue {
            return Value::Null;
        }

        let value = self.values.map_snak(&stmt.mainsnak, false);
        self.annotations.annotate(value, &stmt.references, &stmt.qualifiers)
    }
}

/// Uppercase the first letter of every word, lowercase the rest (`mediainfo` → `Mediainfo`)
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word_start = true;

    for c in s.chars() {
        if c.is_alphabetic() {
            if word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(c);
            word_start = true;
        }
    }

    out
}
