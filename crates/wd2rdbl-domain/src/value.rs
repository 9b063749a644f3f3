//! Typed snak payloads
//!
//! A `datavalue` is `{"type": <kind>, "value": <payload>}`. The kind tag is
//! matched against the closed set below; the payload is decoded with serde
//! into the variant's shape.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors decoding a `datavalue`
#[derive(Error, Debug)]
pub enum DataValueError {
    /// The `type` tag is absent or not a string
    #[error("datavalue has no kind tag")]
    MissingKind,

    /// The payload does not have the shape its kind requires
    #[error("malformed {kind} payload: {source}")]
    Malformed {
        /// Kind tag of the datavalue
        kind: String,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },
}

/// The value carried by a `value` snak
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// `wikibase-entityid`: a reference to another entity
    EntityId {
        /// Entity identifier (`Q5`, `P31`, `M123`, ...)
        id: String,
    },

    /// `string`: plain text, also used for URLs and media file names
    String(String),

    /// `monolingualtext`: language-tagged text
    MonolingualText {
        /// The text
        text: String,
        /// BCP 47 language code
        language: String,
    },

    /// `quantity`: a decimal amount with a unit
    Quantity {
        /// Amount as written in the source (`+5`, `-1.25`)
        amount: String,
        /// Unit IRI, or `"1"` for dimensionless quantities
        unit: String,
    },

    /// `time`: a point in time
    Time {
        /// Timestamp as written in the source (`+2001-01-01T00:00:00Z`)
        time: String,
        /// Calendar model IRI; currently not used by the mapper
        calendar_model: Option<String>,
    },

    /// `globecoordinate`: every field of the payload, in source order
    GlobeCoordinate(Map<String, Value>),

    /// A kind outside the set above
    Unrecognized(String),
}

#[derive(Deserialize)]
struct EntityIdPayload {
    id: String,
}

#[derive(Deserialize)]
struct MonolingualPayload {
    text: String,
    language: String,
}

#[derive(Deserialize)]
struct QuantityPayload {
    amount: String,
    unit: String,
}

#[derive(Deserialize)]
struct TimePayload {
    time: String,
    #[serde(default, rename = "calendarmodel")]
    calendar_model: Option<String>,
}

impl DataValue {
    /// Decode a raw `datavalue` object
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use wd2rdbl_domain::DataValue;
    ///
    /// let raw = json!({"type": "wikibase-entityid", "value": {"id": "Q5"}});
    /// assert_eq!(
    ///     DataValue::from_json(&raw).unwrap(),
    ///     DataValue::EntityId { id: "Q5".to_string() }
    /// );
    /// ```
    pub fn from_json(raw: &Value) -> Result<Self, DataValueError> {
        let kind = raw
            .get("type")
            .and_then(Value::as_str)
            .ok_or(DataValueError::MissingKind)?;
        let payload = raw.get("value").cloned().unwrap_or(Value::Null);

        let malformed = |source| DataValueError::Malformed {
            kind: kind.to_string(),
            source,
        };

        let value = match kind {
            "wikibase-entityid" => {
                let p: EntityIdPayload = serde_json::from_value(payload).map_err(malformed)?;
                DataValue::EntityId { id: p.id }
            }
            "string" => DataValue::String(serde_json::from_value(payload).map_err(malformed)?),
            "monolingualtext" => {
                let p: MonolingualPayload = serde_json::from_value(payload).map_err(malformed)?;
                DataValue::MonolingualText {
                    text: p.text,
                    language: p.language,
                }
            }
            "quantity" => {
                let p: QuantityPayload = serde_json::from_value(payload).map_err(malformed)?;
                DataValue::Quantity {
                    amount: p.amount,
                    unit: p.unit,
                }
            }
            "time" => {
                let p: TimePayload = serde_json::from_value(payload).map_err(malformed)?;
                DataValue::Time {
                    time: p.time,
                    calendar_model: p.calendar_model,
                }
            }
            "globecoordinate" => {
                DataValue::GlobeCoordinate(serde_json::from_value(payload).map_err(malformed)?)
            }
            other => DataValue::Unrecognized(other.to_string()),
        };

        Ok(value)
    }
}
