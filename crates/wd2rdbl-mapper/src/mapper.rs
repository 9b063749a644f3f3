//! Document-level mapping: entity documents to `{@context, @graph}`

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use wd2rdbl_domain::namespace::keyword;
use wd2rdbl_domain::RawEntity;

use crate::entity::EntityMapper;
use crate::error::Result;
use crate::node::NormalizedNode;
use crate::vocab::{PrefixTable, VocabularyIndex};

/// A mapped document: the shared context and one node per entity
#[derive(Debug, Clone, PartialEq)]
pub struct GraphDocument<'a> {
    /// Prefix table emitted as `@context`
    pub context: &'a PrefixTable,
    /// Mapped nodes, in source order
    pub graph: Vec<NormalizedNode>,
}

impl Serialize for GraphDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(keyword::CONTEXT, self.context)?;
        map.serialize_entry(keyword::GRAPH, &self.graph)?;
        map.end()
    }
}

/// Entry point of the mapping engine
///
/// Owns the vocabulary index; share it across threads behind an `Arc`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use wd2rdbl_mapper::{Mapper, VocabularyIndex};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let vocab = VocabularyIndex::build(&json!({"terms": {"wd:Q5": {"matches": "Human"}}}))?;
/// let mapper = Mapper::new(vocab);
///
/// let document = mapper.to_graph(&json!({"entities": {
///     "Q42": {"id": "Q42", "type": "item"}
/// }}))?;
///
/// assert_eq!(document.graph.len(), 1);
/// assert_eq!(document.graph[0].id, "http://www.wikidata.org/entity/Q42");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Mapper {
    vocab: VocabularyIndex,
}

impl Mapper {
    /// Create a mapper over a vocabulary index
    pub fn new(vocab: VocabularyIndex) -> Self {
        Self { vocab }
    }

    /// The vocabulary index
    pub fn vocab(&self) -> &VocabularyIndex {
        &self.vocab
    }

    /// Map a single- or multi-entity document
    ///
    /// Accepted shapes, checked in order:
    /// - an API wrapper `{"entities": {id: entity, ...}}`
    /// - a map `{id: entity, ...}` where every value is an entity object
    /// - a bare entity
    ///
    /// # Errors
    ///
    /// Returns [`crate::MapperError::MalformedEntity`] if an entity lacks `id` or `type`.
    pub fn to_graph(&self, document: &Value) -> Result<GraphDocument<'_>> {
        let graph = entity_bodies(document)
            .into_iter()
            .map(|raw| self.map_entity(raw))
            .collect::<Result<Vec<_>>>()?;

        Ok(GraphDocument {
            context: self.vocab.context(),
            graph,
        })
    }

    /// Map one entity record
    pub fn map_entity(&self, raw: &Value) -> Result<NormalizedNode> {
        let entity = RawEntity::from_json(raw)?;
        Ok(EntityMapper::new(&self.vocab).map_entity(&entity))
    }
}

fn entity_bodies(document: &Value) -> Vec<&Value> {
    if let Some(entities) = document.get("entities").and_then(Value::as_object) {
        return entities.values().collect();
    }

    if let Some(obj) = document.as_object() {
        let is_id_map = !obj.is_empty()
            && !obj.contains_key("id")
            && obj.values().all(|body| body.get("id").is_some_and(Value::is_string));
        if is_id_map {
            return obj.values().collect();
        }
    }

    vec![document]
}
