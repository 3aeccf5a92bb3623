//! Ingestion document types
//!
//! The source export is loosely typed: per-side attributes are parallel
//! arrays of up to four nullable entries, and power/toughness/loyalty mix
//! strings and numbers. Every field here decodes leniently so a single bad
//! value degrades to "absent" instead of rejecting the document.

use crate::error::Result;
use crate::model::Token;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Parse a number the way the source data writes them.
///
/// Non-finite results (`inf`, `NaN`) are rejected.
pub fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Canonical decimal text for a number: `3.0` becomes `"3"`, `2.5` stays `"2.5"`
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// A scalar that may be missing, textual, or numeric
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawScalar {
    #[default]
    Absent,
    Text(String),
    Number(f64),
}

impl RawScalar {
    /// Absent or the empty string
    pub fn is_blank(&self) -> bool {
        match self {
            RawScalar::Absent => true,
            RawScalar::Text(text) => text.is_empty(),
            RawScalar::Number(_) => false,
        }
    }

    /// Text content, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawScalar::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<Value> for RawScalar {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawScalar::Absent,
            Value::String(text) => RawScalar::Text(text),
            Value::Number(number) => number
                .as_f64()
                .map(RawScalar::Number)
                .unwrap_or(RawScalar::Absent),
            other => {
                log::debug!("Ignoring unexpected scalar value: {}", other);
                RawScalar::Absent
            }
        }
    }
}

impl<'de> Deserialize<'de> for RawScalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(Value::deserialize(deserializer)?.into())
    }
}

/// The legality field arrives either as a list or as a `;`-joined string
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawLegality {
    #[default]
    Absent,
    Joined(String),
    List(Vec<String>),
}

impl<'de> Deserialize<'de> for RawLegality {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(text) => RawLegality::Joined(text),
            Value::Array(items) => RawLegality::List(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(text) => Some(text),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => RawLegality::Absent,
        })
    }
}

/// One record of the `data` array
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCardEntry {
    #[serde(rename = "Name", default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(rename = "Creator", default, deserialize_with = "lenient_text")]
    pub creator: String,
    #[serde(rename = "Set", default, deserialize_with = "lenient_text")]
    pub set: String,
    #[serde(rename = "Constructed", default)]
    pub legality: RawLegality,
    #[serde(rename = "Rulings", default, deserialize_with = "lenient_text")]
    pub rulings: String,

    /// Null for lands and other cards without a cost
    #[serde(rename = "CMC", default)]
    pub cmc: RawScalar,
    /// "Red", "Blue;Black", or ""
    #[serde(rename = "Color(s)", default, deserialize_with = "lenient_text")]
    pub colors: String,

    #[serde(rename = "Cost", default, deserialize_with = "lenient_column")]
    pub cost: Vec<RawScalar>,
    #[serde(rename = "Supertype(s)", default, deserialize_with = "lenient_column")]
    pub supertypes: Vec<RawScalar>,
    #[serde(rename = "Card Type(s)", default, deserialize_with = "lenient_column")]
    pub card_types: Vec<RawScalar>,
    #[serde(rename = "Subtype(s)", default, deserialize_with = "lenient_column")]
    pub subtypes: Vec<RawScalar>,
    #[serde(rename = "power", default, deserialize_with = "lenient_column")]
    pub power: Vec<RawScalar>,
    #[serde(rename = "toughness", default, deserialize_with = "lenient_column")]
    pub toughness: Vec<RawScalar>,
    #[serde(rename = "Loyalty", default, deserialize_with = "lenient_column")]
    pub loyalty: Vec<RawScalar>,
    #[serde(rename = "Text Box", default, deserialize_with = "lenient_column")]
    pub text_box: Vec<RawScalar>,
    #[serde(rename = "Flavor Text", default, deserialize_with = "lenient_column")]
    pub flavor_text: Vec<RawScalar>,

    #[serde(rename = "Tags", default, deserialize_with = "lenient_text")]
    pub tags: String,
    #[serde(rename = "tokens", default, deserialize_with = "lenient_tokens")]
    pub tokens: Vec<Token>,

    #[serde(rename = "Component of", default, deserialize_with = "lenient_opt_text")]
    pub component_of: Option<String>,
    #[serde(rename = "isActualToken", default, deserialize_with = "lenient_opt_bool")]
    pub is_actual_token: Option<bool>,
    #[serde(rename = "small alt image", default, deserialize_with = "lenient_opt_text")]
    pub small_alt_image: Option<String>,
}

/// Top-level ingestion document
#[derive(Debug, Clone, Deserialize)]
pub struct RawDatabase {
    data: Vec<Value>,
}

impl RawDatabase {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Number of records in the document, including unusable ones
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Decode each record; records that are not JSON objects are skipped
    pub fn entries(&self) -> Vec<RawCardEntry> {
        self.data
            .iter()
            .enumerate()
            .filter_map(|(index, value)| {
                if !value.is_object() {
                    log::warn!("Skipping data entry {}: not an object", index);
                    return None;
                }
                match RawCardEntry::deserialize(value) {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        log::warn!("Skipping data entry {}: {}", index, e);
                        None
                    }
                }
            })
            .collect()
    }
}

/// Strings pass through, numbers become their decimal text, anything else is empty
pub(crate) fn lenient_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    Ok(match RawScalar::deserialize(deserializer)? {
        RawScalar::Text(text) => text,
        RawScalar::Number(number) => format_number(number),
        RawScalar::Absent => String::new(),
    })
}

fn lenient_opt_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

fn lenient_opt_bool<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<bool>, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_bool())
}

fn lenient_column<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<RawScalar>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(RawScalar::from).collect(),
        _ => Vec::new(),
    })
}

fn lenient_tokens<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<Token>, D::Error> {
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };

    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| match serde_json::from_value::<Token>(item) {
            Ok(token) => Some(token),
            Err(e) => {
                log::warn!("Skipping malformed token: {}", e);
                None
            }
        })
        .collect())
}
