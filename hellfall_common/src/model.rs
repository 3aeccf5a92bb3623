//! Canonical card model
//!
//! Cards are built once at load time and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// A single card identity with up to four printed sides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    pub creator: String,
    pub set: String,

    /// Legality tags in source order; duplicates are kept
    pub legality: Vec<String>,
    pub rulings: String,

    #[serde(rename = "mv")]
    pub mana_value: Option<f64>,
    /// Source text of the mana value, kept even when it is not numeric
    #[serde(rename = "mv_original")]
    pub mana_value_original: Option<String>,
    pub colors: Vec<String>,
    /// Printed faces in order; never padded with empty placeholders
    pub sides: Vec<Side>,

    pub tags: Vec<String>,
    pub tokens: Vec<Token>,

    pub component_of: Option<String>,
    pub is_actual_token: Option<bool>,
    pub small_alt_image: Option<String>,
}

/// One face of a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Side {
    pub cost: String,
    #[serde(rename = "mv")]
    pub mana_value: f64,
    /// Raw cost, recorded only when it could not be evaluated cleanly
    #[serde(rename = "mv_original")]
    pub mana_value_original: Option<String>,

    pub supertypes: Vec<String>,
    pub card_types: Vec<String>,
    pub subtypes: Vec<String>,

    pub power: Option<f64>,
    pub power_original: Option<String>,
    pub toughness: Option<f64>,
    pub toughness_original: Option<String>,
    pub loyalty: Option<f64>,
    pub loyalty_original: Option<String>,

    #[serde(rename = "textbox")]
    pub text_box: String,
    pub flavor_text: String,

    pub tags: Vec<String>,
    pub tokens: Vec<Token>,
}

impl Side {
    /// Supertypes, card types and subtypes joined into one line
    pub fn type_line(&self) -> String {
        self.supertypes
            .iter()
            .chain(&self.card_types)
            .chain(&self.subtypes)
            .filter(|part| !part.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A token a card creates. Denormalized; owned by the card that lists it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Token {
    #[serde(default, deserialize_with = "crate::raw::lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "crate::raw::lenient_text")]
    pub power: String,
    #[serde(default, deserialize_with = "crate::raw::lenient_text")]
    pub toughness: String,
    #[serde(rename = "Type", default, deserialize_with = "crate::raw::lenient_text")]
    pub kind: String,
    #[serde(default, deserialize_with = "crate::raw::lenient_text")]
    pub image: String,
}
