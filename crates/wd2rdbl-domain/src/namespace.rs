//! Fixed namespaces, compact terms and JSON-LD keywords

use url::Url;

/// Wikidata entity namespace
pub const WD: &str = "http://www.wikidata.org/entity/";

/// Wikimedia Commons entity namespace (media entities, `M` ids)
pub const WD_COMMONS: &str = "http://commons.wikimedia.org/entity/";

/// Base of the dataset descriptor IRIs
pub const WD_DATA: &str = "https://www.wikidata.org/wiki/Special:EntityData/";

/// Base of Commons file path links
pub const COMMONS_FILE_PATH: &str = "https://commons.wikimedia.org/wiki/Special:FilePath/";

/// The readable vocabulary namespace used as `@vocab`
pub const WD2RDBL: &str = "https://kungbib.github.io/wd2rdbl/ns/";

/// Prefixes always present in the output context, in output order
pub const DEFAULT_PREFIXES: [(&str, &str); 7] = [
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
    ("owl", "http://www.w3.org/2002/07/owl#"),
    ("skos", "http://www.w3.org/2004/02/skos/core#"),
    ("sdo", "https://schema.org/"),
    ("dct", "http://purl.org/dc/terms/"),
];

/// JSON-LD keywords
pub mod keyword {
    /// `@context`
    pub const CONTEXT: &str = "@context";
    /// `@graph`
    pub const GRAPH: &str = "@graph";
    /// `@id`
    pub const ID: &str = "@id";
    /// `@type`
    pub const TYPE: &str = "@type";
    /// `@value`
    pub const VALUE: &str = "@value";
    /// `@language`
    pub const LANGUAGE: &str = "@language";
    /// `@reverse`
    pub const REVERSE: &str = "@reverse";
    /// `@vocab`
    pub const VOCAB: &str = "@vocab";
    /// `@annotation` (JSON-LD-star annotation block)
    pub const ANNOTATION: &str = "@annotation";
}

/// Compact terms the mapper emits directly
pub mod term {
    /// Entity labels
    pub const LABEL: &str = "rdfs:label";
    /// Entity descriptions
    pub const DESCRIPTION: &str = "sdo:description";
    /// Plain title of non-media entities
    pub const TITLE: &str = "dct:title";
    /// Media file backlink
    pub const ENCODES_CREATIVE_WORK: &str = "sdo:encodesCreativeWork";
    /// Dataset descriptor backlink
    pub const MAIN_ENTITY: &str = "sdo:mainEntity";
    /// Type of dataset descriptors
    pub const DATASET: &str = "sdo:Dataset";
    /// Last-modified timestamp of dataset descriptors
    pub const MODIFIED: &str = "dct:modified";
    /// Datatype of every point-in-time value
    pub const DATE_TIME: &str = "xsd:dateTime";
    /// Value slot of quantities with a unit
    pub const RDF_VALUE: &str = "rdf:value";
    /// Type of globe coordinate values
    pub const GLOBE_COORDINATE: &str = "GlobeCoordinate";
    /// Readable term of the Wikimedia import URL reference property (P4656)
    pub const IMPORT_URL: &str = "p4656-wikimediaImportUrl";
}

/// Property whose targets become the node types
pub const INSTANCE_OF: &str = "P31";

/// The dimensionless quantity unit
pub const UNIT_ONE: &str = "1";

/// Prefix of media file titles
pub const FILE_PREFIX: &str = "File:";

/// Resolve `reference` against `base` (RFC 3986 reference resolution).
///
/// Absolute IRIs are returned verbatim, so non-ASCII characters in them
/// stay unescaped. Relative references are resolved with dot-segment
/// removal, and any non-ASCII characters they carry come out
/// percent-encoded. A `base` that is not an absolute URL is plainly
/// concatenated.
///
/// # Examples
///
/// ```
/// use wd2rdbl_domain::namespace::{join_iri, WD};
///
/// assert_eq!(join_iri(WD, "Q42"), "http://www.wikidata.org/entity/Q42");
/// assert_eq!(join_iri(WD, "https://example.org/x"), "https://example.org/x");
/// assert_eq!(join_iri(WD, "../wiki/Q42"), "http://www.wikidata.org/wiki/Q42");
/// ```
pub fn join_iri(base: &str, reference: &str) -> String {
    if Url::parse(reference).is_ok() {
        return reference.to_string();
    }

    match Url::parse(base).and_then(|base| base.join(reference)) {
        Ok(joined) => joined.into(),
        Err(_) => format!("{}{}", base, reference),
    }
}
