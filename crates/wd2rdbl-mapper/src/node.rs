//! The normalized graph node produced for one entity

use serde::ser::{Serialize, Serializer};
use serde_json::{json, Map, Value};
use wd2rdbl_domain::namespace::{keyword, term};
use wd2rdbl_domain::LangText;

/// The dataset record an entity was published in (`sdo:mainEntity` backlink)
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetDescriptor {
    /// `Special:EntityData` IRI of the entity
    pub id: String,
    /// Last-modified timestamp taken from the source record
    pub modified: Option<String>,
}

impl DatasetDescriptor {
    /// JSON-LD form: `{"@id", "@type": "sdo:Dataset", "dct:modified"}`
    pub fn to_json(&self) -> Map<String, Value> {
        let mut node = Map::new();
        node.insert(keyword::ID.to_string(), Value::from(self.id.as_str()));
        node.insert(keyword::TYPE.to_string(), Value::from(term::DATASET));
        node.insert(
            term::MODIFIED.to_string(),
            self.modified.as_deref().map_or(Value::Null, Value::from),
        );
        node
    }
}

/// Relations stored on a node that point back at it from elsewhere
#[derive(Debug, Clone, PartialEq)]
pub struct ReverseRelations {
    /// Commons file that encodes this media entity
    pub encodes_creative_work: Option<String>,
    /// Dataset descriptor; every node has exactly one
    pub main_entity: DatasetDescriptor,
}

/// One entity as a JSON-LD node
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedNode {
    /// Node IRI
    pub id: String,
    /// Type terms, never empty
    pub types: Vec<String>,
    /// `rdfs:label` literals
    pub labels: Vec<LangText>,
    /// `sdo:description` literals
    pub descriptions: Vec<LangText>,
    /// `dct:title` of non-media entities with a title
    pub title: Option<String>,
    /// Mapped statement groups, in source order
    pub properties: Vec<(String, Vec<Value>)>,
    /// Backlinks
    pub reverse: ReverseRelations,
}

impl NormalizedNode {
    /// Set a property, replacing an earlier group under the same term in place
    pub fn set_property(&mut self, term: String, values: Vec<Value>) {
        match self.properties.iter_mut().find(|(existing, _)| *existing == term) {
            Some((_, slot)) => *slot = values,
            None => self.properties.push((term, values)),
        }
    }

    /// JSON-LD form including `@reverse`
    pub fn to_json(&self) -> Map<String, Value> {
        self.build_json(true)
    }

    /// JSON-LD form without `@reverse`, for graphs that carry the backlinks forward
    pub fn to_forward_json(&self) -> Map<String, Value> {
        self.build_json(false)
    }

    fn build_json(&self, with_reverse: bool) -> Map<String, Value> {
        let mut node = Map::new();
        node.insert(keyword::ID.to_string(), Value::from(self.id.as_str()));
        node.insert(keyword::TYPE.to_string(), Value::from(self.types.clone()));
        node.insert(term::LABEL.to_string(), literals(&self.labels));
        node.insert(term::DESCRIPTION.to_string(), literals(&self.descriptions));

        if with_reverse {
            let mut reverse = Map::new();
            if let Some(file) = &self.reverse.encodes_creative_work {
                reverse.insert(term::ENCODES_CREATIVE_WORK.to_string(), json!({ keyword::ID: file }));
            }
            reverse.insert(
                term::MAIN_ENTITY.to_string(),
                Value::Object(self.reverse.main_entity.to_json()),
            );
            node.insert(keyword::REVERSE.to_string(), Value::Object(reverse));
        }

        if let Some(title) = &self.title {
            node.insert(term::TITLE.to_string(), Value::from(title.as_str()));
        }

        // A statement term equal to one of the keys above replaces it in place.
        for (term, values) in &self.properties {
            node.insert(term.clone(), Value::Array(values.clone()));
        }

        node
    }
}

impl Serialize for NormalizedNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

fn literals(texts: &[LangText]) -> Value {
    texts
        .iter()
        .map(|text| json!({ keyword::LANGUAGE: text.language, keyword::VALUE: text.value }))
        .collect()
}
