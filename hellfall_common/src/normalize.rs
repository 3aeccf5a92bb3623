//! Normalization of raw ingestion records into canonical cards
//!
//! Normalization never fails. Bad values degrade to "missing" for the
//! field they occupy and the rest of the record is kept.

use crate::mana;
use crate::model::{Card, Side};
use crate::raw::{format_number, parse_number, RawCardEntry, RawLegality, RawScalar};

/// Maximum number of sides any card has
pub const MAX_SIDES: usize = 4;

/// Separator for multi-valued string fields
pub const SEPARATOR: char = ';';

/// Normalize a batch of raw entries, preserving order
pub fn normalize(entries: &[RawCardEntry]) -> Vec<Card> {
    entries.iter().map(normalize_entry).collect()
}

/// Normalize a single raw entry
pub fn normalize_entry(entry: &RawCardEntry) -> Card {
    let (mana_value_original, mana_value) = split_scalar(&entry.cmc);
    let tags = split_field(&entry.tags);

    Card {
        name: entry.name.clone(),
        creator: entry.creator.clone(),
        set: entry.set.clone(),
        legality: match &entry.legality {
            RawLegality::List(items) => items.clone(),
            RawLegality::Joined(text) => split_field(text),
            RawLegality::Absent => split_field(""),
        },
        rulings: entry.rulings.clone(),
        mana_value,
        mana_value_original,
        colors: split_field(&entry.colors),
        sides: parse_sides(entry, &tags),
        tags,
        tokens: entry.tokens.clone(),
        component_of: entry.component_of.clone(),
        is_actual_token: entry.is_actual_token,
        small_alt_image: entry.small_alt_image.clone(),
    }
}

/// Split on the field separator. An empty input yields `[""]`.
pub fn split_field(text: &str) -> Vec<String> {
    text.split(SEPARATOR).map(str::to_string).collect()
}

/// Build the sides present in an entry.
///
/// A side exists at index `i` only if at least one of its nine attributes
/// is non-blank there.
fn parse_sides(entry: &RawCardEntry, tags: &[String]) -> Vec<Side> {
    if entry.cost.len() > MAX_SIDES || entry.text_box.len() > MAX_SIDES {
        log::debug!(
            "'{}' lists more than {} sides, extra entries ignored",
            entry.name,
            MAX_SIDES
        );
    }

    let mut sides = Vec::new();

    for i in 0..MAX_SIDES {
        let cost = at(&entry.cost, i);
        let supertypes = at(&entry.supertypes, i);
        let card_types = at(&entry.card_types, i);
        let subtypes = at(&entry.subtypes, i);
        let power = at(&entry.power, i);
        let toughness = at(&entry.toughness, i);
        let loyalty = at(&entry.loyalty, i);
        let text_box = at(&entry.text_box, i);
        let flavor_text = at(&entry.flavor_text, i);

        let present = [
            cost,
            supertypes,
            card_types,
            subtypes,
            power,
            toughness,
            loyalty,
            text_box,
            flavor_text,
        ]
        .iter()
        .any(|value| !value.is_blank());

        if !present {
            continue;
        }

        let cost = text_or_empty(cost);
        let evaluation = mana::evaluate(&cost);
        let mana_value_original = if evaluation.syntax_error {
            log::debug!("'{}' side {} has malformed cost '{}'", entry.name, i, cost);
            Some(cost.clone())
        } else {
            None
        };

        let (power_original, power) = split_scalar(power);
        let (toughness_original, toughness) = split_scalar(toughness);
        let (loyalty_original, loyalty) = split_scalar(loyalty);

        sides.push(Side {
            mana_value: evaluation.value,
            mana_value_original,
            cost,
            supertypes: split_field(&text_or_empty(supertypes)),
            card_types: split_field(&text_or_empty(card_types)),
            subtypes: split_field(&text_or_empty(subtypes)),
            power,
            power_original,
            toughness,
            toughness_original,
            loyalty,
            loyalty_original,
            text_box: text_or_empty(text_box),
            flavor_text: text_or_empty(flavor_text),
            tags: tags.to_vec(),
            tokens: entry.tokens.clone(),
        });
    }

    sides
}

fn at(column: &[RawScalar], index: usize) -> &RawScalar {
    static ABSENT: RawScalar = RawScalar::Absent;
    column.get(index).unwrap_or(&ABSENT)
}

/// Textual value of a side attribute; numbers are written out as text
fn text_or_empty(value: &RawScalar) -> String {
    match value {
        RawScalar::Absent => String::new(),
        RawScalar::Text(text) => text.clone(),
        RawScalar::Number(number) => format_number(*number),
    }
}

/// Split a number-or-text value into its original text and numeric reading
pub fn split_scalar(value: &RawScalar) -> (Option<String>, Option<f64>) {
    match value {
        RawScalar::Absent => (None, None),
        RawScalar::Number(number) => (Some(format_number(*number)), Some(*number)),
        RawScalar::Text(text) => (Some(text.clone()), parse_number(text)),
    }
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
