//! wd2rdbl Domain Layer
//!
//! This crate defines the source data model of wd2rdbl: the typed view of a
//! Wikidata / Wikimedia Commons entity record, its statements and snaks, and
//! the closed set of value kinds a snak can carry. It also owns the fixed
//! namespaces and JSON-LD keywords every other layer refers to.
//!
//! ## Key Concepts
//!
//! - **Entity**: one source record (item, property, lexeme or mediainfo)
//! - **Statement**: a main snak with a rank, references and qualifiers
//! - **Snak**: the value-carrying unit (`value`, `novalue`, `somevalue`)
//! - **DataValue**: the typed payload of a `value` snak
//!
//! ## Architecture
//!
//! - No mapping logic lives here, only parsing into typed views
//! - Parsing is tolerant: only a missing `id` or `type` is an error
//! - Mapping lives in `wd2rdbl-mapper`, streaming in `wd2rdbl-pipeline`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entity;
pub mod namespace;
pub mod value;

// Re-exports for convenience
pub use entity::{EntityError, LangText, Rank, RawEntity, Snak, SnakGroup, SnakKind, Statement};
pub use value::{DataValue, DataValueError};
