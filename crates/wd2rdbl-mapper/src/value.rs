//! Snak value mapping
//!
//! Turns one snak into one JSON-LD value. Dispatch is an exhaustive match
//! over [`DataValue`], so a new value kind cannot be added without deciding
//! how it maps.

use serde_json::{json, Map, Value};
use tracing::trace;
use wd2rdbl_domain::namespace::{
    join_iri, keyword, term, COMMONS_FILE_PATH, FILE_PREFIX, UNIT_ONE, WD, WD_COMMONS,
};
use wd2rdbl_domain::{DataValue, Snak};

use crate::vocab::VocabularyIndex;

/// Datatype of snaks naming a Commons media file
const DATATYPE_COMMONS_MEDIA: &str = "commonsMedia";

/// Datatype of snaks holding a URL
const DATATYPE_URL: &str = "url";

/// Build a link node `{"@id": iri}` for an entity id or IRI
///
/// Media ids (`M...`) resolve against the Commons entity namespace, other
/// ids against the Wikidata entity namespace. Absolute IRIs are kept.
pub fn link(reference: &str) -> Value {
    json!({ keyword::ID: link_iri(reference) })
}

/// The IRI [`link`] would produce
pub fn link_iri(reference: &str) -> String {
    let base = if reference.starts_with('M') { WD_COMMONS } else { WD };
    join_iri(base, reference)
}

/// IRI of a Commons file, from a file name or `File:` title
///
/// Values that already are URLs are returned unchanged.
///
/// # Examples
///
/// ```
/// use wd2rdbl_mapper::value::commons_file_iri;
///
/// assert_eq!(
///     commons_file_iri("File:Tour Eiffel.jpg"),
///     "https://commons.wikimedia.org/wiki/Special:FilePath/Tour%20Eiffel.jpg"
/// );
/// ```
pub fn commons_file_iri(reference: &str) -> String {
    if reference.contains("://") {
        return link_iri(reference);
    }

    let file_name = reference.strip_prefix(FILE_PREFIX).unwrap_or(reference);
    let encoded: Vec<String> = file_name
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();

    link_iri(&format!("{}{}", COMMONS_FILE_PATH, encoded.join("/")))
}

/// Link node of a Commons file
pub fn commons_link(reference: &str) -> Value {
    json!({ keyword::ID: commons_file_iri(reference) })
}

/// Parse a quantity amount: integer without a decimal point, float with one,
/// the raw string when neither parses
pub fn parse_amount(amount: &str) -> Value {
    if amount.contains('.') {
        amount
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map_or_else(|| Value::from(amount), Value::from)
    } else if let Ok(i) = amount.parse::<i64>() {
        Value::from(i)
    } else if let Ok(u) = amount.parse::<u64>() {
        Value::from(u)
    } else {
        Value::from(amount)
    }
}

/// Maps snaks to JSON-LD values against a vocabulary
#[derive(Debug, Clone, Copy)]
pub struct ValueMapper<'a> {
    vocab: &'a VocabularyIndex,
}

impl<'a> ValueMapper<'a> {
    /// Create a value mapper reading from `vocab`
    pub fn new(vocab: &'a VocabularyIndex) -> Self {
        Self { vocab }
    }

    /// Map one snak
    ///
    /// With `as_link` set, string values are always mapped to links.
    /// A snak without a datavalue, or with a malformed one, maps to `null`;
    /// a snak of an unrecognized kind is passed through unchanged.
    pub fn map_snak(&self, snak: &Snak, as_link: bool) -> Value {
        let value = match snak.value() {
            None => return Value::Null,
            Some(Ok(value)) => value,
            Some(Err(e)) => {
                trace!("Mapping unreadable datavalue to null: {}", e);
                return Value::Null;
            }
        };

        match value {
            DataValue::EntityId { id } => link(&id),

            DataValue::String(s) => match snak.datatype.as_deref() {
                Some(DATATYPE_COMMONS_MEDIA) => commons_link(&s),
                _ if as_link => link(&s),
                Some(DATATYPE_URL) => link(&s),
                _ => Value::String(s),
            },

            DataValue::MonolingualText { text, language } => json!({
                keyword::VALUE: text,
                keyword::LANGUAGE: language,
            }),

            DataValue::Quantity { amount, unit } => {
                let number = parse_amount(&amount);
                if unit == UNIT_ONE {
                    number
                } else {
                    json!({
                        keyword::TYPE: self.vocab.resolve_symbol(&unit),
                        term::RDF_VALUE: number,
                    })
                }
            }

            // The calendar model is not mapped; every time value is typed xsd:dateTime.
            DataValue::Time { time, .. } => json!({
                keyword::VALUE: time,
                keyword::TYPE: self.vocab.resolve_symbol(term::DATE_TIME),
            }),

            DataValue::GlobeCoordinate(fields) => {
                let mut node = Map::with_capacity(fields.len() + 1);
                node.insert(keyword::TYPE.to_string(), Value::from(term::GLOBE_COORDINATE));
                for (key, field) in fields {
                    let field = match field {
                        Value::String(globe) if key == "globe" => link(&globe),
                        other => other,
                    };
                    node.insert(key, field);
                }
                Value::Object(node)
            }

            DataValue::Unrecognized(kind) => {
                trace!("Passing through snak of unrecognized kind '{}'", kind);
                snak.raw.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> VocabularyIndex {
        VocabularyIndex::build(&json!({"terms": {
            "wd:Q11573": {"matches": "Metre"}
        }}))
        .unwrap()
    }

    fn snak(datatype: &str, kind: &str, value: Value) -> Snak {
        Snak::from_json(&json!({
            "snaktype": "value",
            "property": "P1",
            "datatype": datatype,
            "datavalue": {"type": kind, "value": value}
        }))
    }

    #[test]
    fn test_entity_links() {
        let vocab = vocab();
        let mapper = ValueMapper::new(&vocab);

        let item = snak("wikibase-item", "wikibase-entityid", json!({"id": "Q42"}));
        assert_eq!(mapper.map_snak(&item, false), json!({"@id": "http://www.wikidata.org/entity/Q42"}));

        let media = snak("wikibase-mediainfo", "wikibase-entityid", json!({"id": "M12"}));
        assert_eq!(mapper.map_snak(&media, false), json!({"@id": "http://commons.wikimedia.org/entity/M12"}));
    }

    #[test]
    fn test_strings() {
        let vocab = vocab();
        let mapper = ValueMapper::new(&vocab);

        let plain = snak("string", "string", json!("abc-123"));
        assert_eq!(mapper.map_snak(&plain, false), json!("abc-123"));

        let url = snak("url", "string", json!("https://example.org/page"));
        assert_eq!(mapper.map_snak(&url, false), json!({"@id": "https://example.org/page"}));

        let media = snak("commonsMedia", "string", json!("Douglas adams portrait.jpg"));
        assert_eq!(
            mapper.map_snak(&media, false),
            json!({"@id": "https://commons.wikimedia.org/wiki/Special:FilePath/Douglas%20adams%20portrait.jpg"})
        );
    }

    #[test]
    fn test_as_link_forces_link() {
        let vocab = vocab();
        let mapper = ValueMapper::new(&vocab);

        let url = snak("string", "string", json!("https://example.org/import"));
        assert_eq!(mapper.map_snak(&url, true), json!({"@id": "https://example.org/import"}));
    }

    #[test]
    fn test_monolingual_text() {
        let vocab = vocab();
        let mapper = ValueMapper::new(&vocab);

        let text = snak("monolingualtext", "monolingualtext", json!({"text": "Hej", "language": "sv"}));
        assert_eq!(mapper.map_snak(&text, false), json!({"@value": "Hej", "@language": "sv"}));
    }

    #[test]
    fn test_quantities() {
        let vocab = vocab();
        let mapper = ValueMapper::new(&vocab);

        let q = |amount: &str, unit: &str| {
            mapper.map_snak(&snak("quantity", "quantity", json!({"amount": amount, "unit": unit})), false)
        };

        assert_eq!(q("5", "1"), json!(5));
        assert_eq!(q("+5", "1"), json!(5));
        assert_eq!(q("5.5", "1"), json!(5.5));
        assert_eq!(q("-0.25", "1"), json!(-0.25));
        assert_eq!(q("abc", "1"), json!("abc"));
        assert_eq!(
            q("abc", "http://www.wikidata.org/entity/Q11573"),
            json!({"@type": "http://www.wikidata.org/entity/Q11573", "rdf:value": "abc"})
        );
        assert_eq!(q("12", "Q11573"), json!({"@type": "Metre", "rdf:value": 12}));
    }

    #[test]
    fn test_time_ignores_calendar() {
        let vocab = vocab();
        let mapper = ValueMapper::new(&vocab);

        for calendar in ["http://www.wikidata.org/entity/Q1985727", "http://www.wikidata.org/entity/Q1985786"] {
            let time = snak("time", "time", json!({
                "time": "+1879-03-14T00:00:00Z", "precision": 11, "calendarmodel": calendar
            }));
            assert_eq!(
                mapper.map_snak(&time, false),
                json!({"@value": "+1879-03-14T00:00:00Z", "@type": "xsd:dateTime"})
            );
        }
    }

    #[test]
    fn test_globe_coordinate() {
        let vocab = vocab();
        let mapper = ValueMapper::new(&vocab);

        let coord = snak("globe-coordinate", "globecoordinate", json!({
            "latitude": 59.329444, "longitude": 18.068611, "altitude": null,
            "precision": 0.000277778, "globe": "http://www.wikidata.org/entity/Q2"
        }));
        let mapped = mapper.map_snak(&coord, false);
        assert_eq!(mapped["@type"], "GlobeCoordinate");
        assert_eq!(mapped["globe"], json!({"@id": "http://www.wikidata.org/entity/Q2"}));
        assert_eq!(mapped["latitude"], json!(59.329444));
        assert_eq!(mapped["longitude"], json!(18.068611));
        assert_eq!(mapped["precision"], json!(0.000277778));
        assert_eq!(mapped["altitude"], Value::Null);

        let bare = snak("globe-coordinate", "globecoordinate", json!({"latitude": 1.0, "globe": "Q2"}));
        assert_eq!(
            mapper.map_snak(&bare, false)["globe"],
            json!({"@id": "http://www.wikidata.org/entity/Q2"})
        );
    }

    #[test]
    fn test_missing_and_unrecognized() {
        let vocab = vocab();
        let mapper = ValueMapper::new(&vocab);

        let somevalue = Snak::from_json(&json!({"snaktype": "somevalue", "property": "P1"}));
        assert_eq!(mapper.map_snak(&somevalue, false), Value::Null);

        let malformed = snak("quantity", "quantity", json!({"unit": "1"}));
        assert_eq!(mapper.map_snak(&malformed, false), Value::Null);

        let raw = json!({
            "snaktype": "value", "property": "P5830", "datatype": "wikibase-form",
            "datavalue": {"type": "wikibase-form", "value": {"id": "L1-F1"}}
        });
        assert_eq!(mapper.map_snak(&Snak::from_json(&raw), false), raw);
    }

    #[test]
    fn test_parse_amount_large_values() {
        assert_eq!(parse_amount("+18446744073709551615"), json!(18446744073709551615u64));
        assert_eq!(parse_amount("+99999999999999999999999"), json!("+99999999999999999999999"));
        assert_eq!(parse_amount("1e5"), json!("1e5"));
    }

    #[test]
    fn test_commons_file_iri() {
        assert_eq!(
            commons_file_iri("File:Example.jpg"),
            "https://commons.wikimedia.org/wiki/Special:FilePath/Example.jpg"
        );
        assert_eq!(
            commons_file_iri("Øresund bridge.png"),
            "https://commons.wikimedia.org/wiki/Special:FilePath/%C3%98resund%20bridge.png"
        );
        let url = "https://upload.wikimedia.org/a.jpg";
        assert_eq!(commons_file_iri(url), url);
    }
}
