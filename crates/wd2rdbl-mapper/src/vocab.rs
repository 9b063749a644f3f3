//! Vocabulary index - source identifiers to readable terms
//!
//! The vocabulary document is built offline and has the shape
//! `{"terms": {"wd:P31": {"matches": "rdf:type"}, ...}}`. Keys may carry a
//! namespace prefix; it is stripped so lookups use bare ids (`P31`).

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;
use wd2rdbl_domain::namespace::{keyword, DEFAULT_PREFIXES, WD2RDBL};

use crate::error::{MapperError, Result};

/// The output `@context`: prefix declarations plus the `@vocab` namespace
///
/// Assembled once when the index is built and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTable {
    prefixes: Vec<(String, String)>,
    vocab: String,
}

impl PrefixTable {
    fn standard() -> Self {
        Self {
            prefixes: DEFAULT_PREFIXES
                .iter()
                .map(|(pfx, ns)| (pfx.to_string(), ns.to_string()))
                .collect(),
            vocab: WD2RDBL.to_string(),
        }
    }

    /// The default vocabulary namespace
    pub fn vocab(&self) -> &str {
        &self.vocab
    }
}

impl Serialize for PrefixTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.prefixes.len() + 1))?;
        for (pfx, ns) in &self.prefixes {
            map.serialize_entry(pfx, ns)?;
        }
        map.serialize_entry(keyword::VOCAB, &self.vocab)?;
        map.end()
    }
}

/// Immutable lookup from source identifiers to readable terms
#[derive(Debug, Clone)]
pub struct VocabularyIndex {
    terms: HashMap<String, String>,
    context: PrefixTable,
}

impl VocabularyIndex {
    /// Build the index from a parsed vocabulary document
    ///
    /// # Errors
    ///
    /// Returns [`MapperError::VocabularyLoad`] if the document has no `terms` object.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use wd2rdbl_mapper::VocabularyIndex;
    ///
    /// let vocab = VocabularyIndex::build(&json!({
    ///     "terms": {"wd:Q5": {"matches": "Human"}}
    /// })).unwrap();
    ///
    /// assert_eq!(vocab.resolve_property("Q5"), "Human");
    /// assert_eq!(vocab.resolve_property("Q6"), "Q6");
    /// ```
    pub fn build(document: &Value) -> Result<Self> {
        let table = document
            .get("terms")
            .and_then(Value::as_object)
            .ok_or_else(|| MapperError::VocabularyLoad("document has no 'terms' table".to_string()))?;

        let mut terms = HashMap::with_capacity(table.len());
        for (key, definition) in table {
            let Some(term) = definition.get("matches").and_then(Value::as_str) else {
                debug!("Skipping vocabulary entry without a term: {}", key);
                continue;
            };
            let source_id = key.split_once(':').map_or(key.as_str(), |(_, local)| local);
            terms.insert(source_id.to_string(), term.to_string());
        }

        debug!("Vocabulary index built with {} terms", terms.len());

        Ok(Self {
            terms,
            context: PrefixTable::standard(),
        })
    }

    /// Build the index from a JSON reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let document: Value = serde_json::from_reader(reader)?;
        Self::build(&document)
    }

    /// Build the index from a vocabulary file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            MapperError::VocabularyLoad(format!("cannot open {}: {}", path.display(), e))
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Resolve a property id; unmapped ids are returned unchanged
    pub fn resolve_property<'a>(&'a self, id: &'a str) -> &'a str {
        self.terms.get(id).map_or(id, String::as_str)
    }

    /// Resolve a class or unit symbol
    ///
    /// Unmapped symbols are returned with the vocabulary namespace removed.
    pub fn resolve_symbol(&self, id: &str) -> String {
        match self.terms.get(id) {
            Some(term) => term.clone(),
            None => id.strip_prefix(self.context.vocab()).unwrap_or(id).to_string(),
        }
    }

    /// The prefix table emitted as `@context`
    pub fn context(&self) -> &PrefixTable {
        &self.context
    }

    /// Number of mapped terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check whether no terms are mapped
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn vocab() -> VocabularyIndex {
        VocabularyIndex::build(&json!({
            "@context": {"wd": "http://www.wikidata.org/entity/"},
            "terms": {
                "wd:P31": {"matches": "rdf:type"},
                "wd:Q5": {"matches": "Human"},
                "P569": {"matches": "sdo:birthDate"},
                "wd:P1": {"label": "no term"}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_missing_terms_table() {
        let result = VocabularyIndex::build(&json!({"@context": {}}));
        assert!(matches!(result, Err(MapperError::VocabularyLoad(_))));
    }

    #[test]
    fn test_prefix_stripped_from_keys() {
        let vocab = vocab();
        assert_eq!(vocab.resolve_property("P31"), "rdf:type");
        assert_eq!(vocab.resolve_property("P569"), "sdo:birthDate");
        assert_eq!(vocab.len(), 3);
    }

    #[test]
    fn test_unmapped_identity() {
        let vocab = vocab();
        assert_eq!(vocab.resolve_property("P1"), "P1");
        assert_eq!(vocab.resolve_property("P999"), "P999");
    }

    #[test]
    fn test_resolve_symbol() {
        let vocab = vocab();
        assert_eq!(vocab.resolve_symbol("Q5"), "Human");
        assert_eq!(vocab.resolve_symbol("Q6"), "Q6");
        assert_eq!(
            vocab.resolve_symbol("https://kungbib.github.io/wd2rdbl/ns/Thing"),
            "Thing"
        );
        assert_eq!(vocab.resolve_symbol("xsd:dateTime"), "xsd:dateTime");
    }

    #[test]
    fn test_context_serialization_order() {
        let vocab = vocab();
        let context = serde_json::to_value(vocab.context()).unwrap();
        let keys: Vec<&str> = context.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["rdf", "rdfs", "xsd", "owl", "skos", "sdo", "dct", "@vocab"]);
        assert_eq!(context["@vocab"], WD2RDBL);
        assert_eq!(context["sdo"], "https://schema.org/");
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"terms": {{"wd:Q5": {{"matches": "Human"}}}}}}"#).unwrap();

        let vocab = VocabularyIndex::from_path(file.path()).unwrap();
        assert_eq!(vocab.resolve_symbol("Q5"), "Human");
    }

    #[test]
    fn test_from_missing_path() {
        let result = VocabularyIndex::from_path("/nonexistent/vocmap.jsonld");
        assert!(matches!(result, Err(MapperError::VocabularyLoad(_))));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    proptest! {
        /// Property: identifiers absent from the index resolve to themselves
        #[test]
        fn test_unmapped_property_identity(id in "[A-Za-z0-9_:-]{1,24}") {
            let vocab = VocabularyIndex::build(&json!({"terms": {"wd:P31": {"matches": "rdf:type"}}})).unwrap();
            prop_assume!(id != "P31");
            prop_assert_eq!(vocab.resolve_property(&id), id.as_str());
        }
    }
}
