//! Entity module - the typed view of one source record
//!
//! Parsing follows the entity JSON of the Wikibase API and dumps. It is
//! deliberately forgiving: only `id` and `type` are required, everything else
//! degrades to an empty default.

use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::value::{DataValue, DataValueError};

/// Errors parsing an entity record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntityError {
    /// The record is not a JSON object
    #[error("entity record is not a JSON object")]
    NotAnObject,

    /// A structurally required field is absent
    #[error("entity record is missing required field '{0}'")]
    MissingField(&'static str),
}

/// A language-tagged literal (labels, descriptions)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LangText {
    /// BCP 47 language code
    pub language: String,
    /// The text
    pub value: String,
}

/// Standing of a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    /// The default rank
    Normal,
    /// Preferred over normal statements
    Preferred,
    /// Known to be wrong or outdated
    Deprecated,
    /// A rank key that is present but not one of the above (`null`, wrong case)
    Unrecognized,
}

impl Rank {
    /// Parse a rank string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(Rank::Normal),
            "preferred" => Some(Rank::Preferred),
            "deprecated" => Some(Rank::Deprecated),
            _ => None,
        }
    }

    /// Get rank as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Normal => "normal",
            Rank::Preferred => "preferred",
            Rank::Deprecated => "deprecated",
            Rank::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a snak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnakKind {
    /// Carries a datavalue
    Value,
    /// The property is known to have no value
    NoValue,
    /// The property has a value that is not known
    SomeValue,
}

impl SnakKind {
    fn parse(s: Option<&str>) -> Self {
        match s {
            Some("novalue") => SnakKind::NoValue,
            Some("somevalue") => SnakKind::SomeValue,
            _ => SnakKind::Value,
        }
    }
}

/// The value-carrying unit of a statement, reference or qualifier
#[derive(Debug, Clone, PartialEq)]
pub struct Snak {
    /// `value`, `novalue` or `somevalue`
    pub kind: SnakKind,
    /// Declared datatype (`wikibase-item`, `commonsMedia`, `url`, ...)
    pub datatype: Option<String>,
    /// The raw `datavalue` object, when present
    pub datavalue: Option<Value>,
    /// The whole snak as it appeared in the source
    pub raw: Value,
}

impl Snak {
    /// Build a snak from its JSON object
    pub fn from_json(raw: &Value) -> Self {
        Self {
            kind: SnakKind::parse(raw.get("snaktype").and_then(Value::as_str)),
            datatype: raw.get("datatype").and_then(Value::as_str).map(str::to_string),
            datavalue: raw.get("datavalue").filter(|v| !v.is_null()).cloned(),
            raw: raw.clone(),
        }
    }

    /// Decode the datavalue, `None` when the snak has none
    pub fn value(&self) -> Option<Result<DataValue, DataValueError>> {
        self.datavalue.as_ref().map(DataValue::from_json)
    }

    /// The referenced entity id, when this snak points at an entity
    pub fn target_id(&self) -> Option<String> {
        match self.value()? {
            Ok(DataValue::EntityId { id }) => Some(id),
            _ => None,
        }
    }
}

/// Snaks grouped by property id, in source order (one reference, or the qualifiers)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SnakGroup(Vec<(String, Vec<Snak>)>);

impl SnakGroup {
    /// Build a group from a `{property: [snak, ...]}` object
    pub fn from_json(raw: &Value) -> Self {
        let Some(obj) = raw.as_object() else {
            return Self::default();
        };

        Self(
            obj.iter()
                .map(|(pid, snaks)| (pid.clone(), as_list(snaks).map(Snak::from_json).collect()))
                .collect(),
        )
    }

    /// Check whether the group holds no properties
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(property, snaks)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Snak])> {
        self.0.iter().map(|(pid, snaks)| (pid.as_str(), snaks.as_slice()))
    }
}

/// One statement (claim) about an entity
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// The main value assertion
    pub mainsnak: Snak,
    /// Rank, `None` when the source omits it
    pub rank: Option<Rank>,
    /// One group per reference
    pub references: Vec<SnakGroup>,
    /// Qualifier group
    pub qualifiers: SnakGroup,
}

impl Statement {
    /// Build a statement from its JSON object; `None` without a main snak
    pub fn from_json(raw: &Value) -> Option<Self> {
        let mainsnak = raw.get("mainsnak").filter(|v| v.is_object())?;

        let references = raw
            .get("references")
            .map(|refs| {
                as_list(refs)
                    .map(|reference| SnakGroup::from_json(reference.get("snaks").unwrap_or(&Value::Null)))
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            mainsnak: Snak::from_json(mainsnak),
            rank: raw
                .get("rank")
                .map(|rank| rank.as_str().and_then(Rank::parse).unwrap_or(Rank::Unrecognized)),
            references,
            qualifiers: raw.get("qualifiers").map(SnakGroup::from_json).unwrap_or_default(),
        })
    }

    /// Rank for generic mapping; only an omitted rank counts as normal
    pub fn effective_rank(&self) -> Rank {
        self.rank.unwrap_or(Rank::Normal)
    }
}

/// One source entity record
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntity {
    /// Entity identifier (`Q42`, `M123`)
    pub id: String,
    /// Kind tag (`item`, `property`, `mediainfo`, ...)
    pub kind: String,
    /// Labels, one per language
    pub labels: Vec<LangText>,
    /// Descriptions, one per language
    pub descriptions: Vec<LangText>,
    /// Statement groups keyed by property id, in source order
    pub statements: Vec<(String, Vec<Statement>)>,
    /// Page title, set for media entities (`File:...`)
    pub title: Option<String>,
    /// Last-modified timestamp of the record
    pub modified: Option<String>,
}

impl RawEntity {
    /// Parse an entity record
    ///
    /// Statements are read from `claims`, or from `statements` (MediaInfo)
    /// when `claims` is absent or empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is not an object or lacks `id` or `type`.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use wd2rdbl_domain::RawEntity;
    ///
    /// let entity = RawEntity::from_json(&json!({"id": "Q42", "type": "item"})).unwrap();
    /// assert_eq!(entity.id, "Q42");
    /// assert!(entity.statements.is_empty());
    /// ```
    pub fn from_json(raw: &Value) -> Result<Self, EntityError> {
        let obj = raw.as_object().ok_or(EntityError::NotAnObject)?;

        let id = obj
            .get("id")
            .and_then(Value::as_str)
            .ok_or(EntityError::MissingField("id"))?
            .to_string();

        let kind = obj
            .get("type")
            .and_then(Value::as_str)
            .ok_or(EntityError::MissingField("type"))?
            .to_string();

        let statements = ["claims", "statements"]
            .iter()
            .filter_map(|key| obj.get(*key))
            .find(|v| is_non_empty(v))
            .and_then(Value::as_object)
            .map(|groups| {
                groups
                    .iter()
                    .map(|(pid, group)| {
                        (pid.clone(), as_list(group).filter_map(Statement::from_json).collect())
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            id,
            kind,
            labels: parse_lang_texts(obj.get("labels")),
            descriptions: parse_lang_texts(obj.get("descriptions")),
            statements,
            title: obj.get("title").and_then(Value::as_str).map(str::to_string),
            modified: obj.get("modified").and_then(Value::as_str).map(str::to_string),
        })
    }

    /// Get the statements under a property
    pub fn statements_for(&self, property: &str) -> &[Statement] {
        self.statements
            .iter()
            .find(|(pid, _)| pid == property)
            .map(|(_, statements)| statements.as_slice())
            .unwrap_or(&[])
    }
}

/// Iterate over a value that may be a single item or a list
fn as_list(value: &Value) -> impl Iterator<Item = &Value> {
    let items: &[Value] = match value {
        Value::Null => &[],
        Value::Array(items) => items,
        single => std::slice::from_ref(single),
    };
    items.iter()
}

fn is_non_empty(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Object(obj) => !obj.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}

fn parse_lang_texts(value: Option<&Value>) -> Vec<LangText> {
    let Some(obj) = value.and_then(Value::as_object) else {
        return Vec::new();
    };

    obj.values()
        .filter_map(|literal| {
            Some(LangText {
                language: literal.get("language")?.as_str()?.to_string(),
                value: literal.get("value")?.as_str()?.to_string(),
            })
        })
        .collect()
}
