//! wd2rdbl Mapper
//!
//! Maps Wikidata and Wikimedia Commons entity JSON to readable JSON-LD,
//! using a precomputed vocabulary of readable terms for source properties
//! and classes.
//!
//! # Overview
//!
//! ```text
//! vocabulary document → VocabularyIndex ─┐
//!                                         ├→ Mapper → {@context, @graph}
//! entity JSON → RawEntity → EntityMapper ─┘
//! ```
//!
//! - **VocabularyIndex**: immutable lookup of readable terms, built once
//! - **ValueMapper**: one snak to one JSON-LD value
//! - **AnnotationBuilder**: references and qualifiers as `@annotation`
//! - **EntityMapper**: one entity to one [`NormalizedNode`]
//! - **Mapper**: whole documents to a [`GraphDocument`]
//!
//! # Mapping rules
//!
//! - Only rank-normal statements are mapped or used for typing
//! - `novalue` statements are dropped, `somevalue` statements map to `null`
//! - `P31` targets become `@type`; without any, the capitalized entity kind
//! - Properties without a readable term keep their source id as key
//! - Every node links back to its dataset descriptor via `@reverse`
//!
//! # Known limitations
//!
//! The calendar model of time values is ignored: every point in time is
//! typed `xsd:dateTime`, Julian calendar dates included.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use wd2rdbl_mapper::{Mapper, VocabularyIndex};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let vocab = VocabularyIndex::build(&json!({"terms": {
//!     "wd:Q5": {"matches": "Human"},
//!     "wd:P569": {"matches": "sdo:birthDate"}
//! }}))?;
//! let mapper = Mapper::new(vocab);
//!
//! let entity = json!({
//!     "id": "Q42", "type": "item",
//!     "claims": {"P31": [{
//!         "mainsnak": {"snaktype": "value", "property": "P31",
//!             "datavalue": {"type": "wikibase-entityid", "value": {"id": "Q5"}}},
//!         "rank": "normal"
//!     }]}
//! });
//!
//! let document = mapper.to_graph(&entity)?;
//! assert_eq!(document.graph[0].types, ["Human"]);
//! println!("{}", serde_json::to_string_pretty(&document)?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod mapper;

pub mod annotation;
pub mod entity;
pub mod node;
pub mod value;
pub mod vocab;

pub use annotation::AnnotationBuilder;
pub use entity::EntityMapper;
pub use error::{MapperError, Result};
pub use mapper::{GraphDocument, Mapper};
pub use node::{DatasetDescriptor, NormalizedNode, ReverseRelations};
pub use value::ValueMapper;
pub use vocab::{PrefixTable, VocabularyIndex};
