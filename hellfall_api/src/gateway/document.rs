//! Mapping from a card to the fields the index stores

use hellfall_common::Card;

/// Searchable view of a card: text terms and numeric values per field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexDocument {
    pub text: Vec<(&'static str, String)>,
    pub numbers: Vec<(&'static str, f64)>,
}

impl IndexDocument {
    pub fn from_card(card: &Card) -> Self {
        let mut doc = Self::default();

        doc.add_text("name", &card.name);
        doc.add_text("creator", &card.creator);
        doc.add_text("set", &card.set);
        for color in &card.colors {
            doc.add_text("colors", color);
            doc.add_text("identity", color);
        }
        for tag in &card.tags {
            doc.add_text("tags", tag);
        }
        for legality in &card.legality {
            doc.add_text("format", legality);
            doc.add_text("banned", legality);
        }

        // the printed CMC wins; otherwise every side counts
        match card.mana_value {
            Some(mv) => doc.numbers.push(("mv", mv)),
            None => doc
                .numbers
                .extend(card.sides.iter().map(|side| ("mv", side.mana_value))),
        }

        for side in &card.sides {
            doc.add_text("mana", &side.cost);
            doc.add_text("type_line", &side.type_line());
            doc.add_text("oracle", &side.text_box);
            doc.add_text("flavor_text", &side.flavor_text);

            let stats = [
                ("power", side.power),
                ("toughness", side.toughness),
                ("loyalty", side.loyalty),
            ];
            for (field, value) in stats {
                if let Some(value) = value {
                    doc.numbers.push((field, value));
                }
            }
            if let (Some(power), Some(toughness)) = (side.power, side.toughness) {
                doc.numbers.push(("power_toughness", power + toughness));
            }
        }

        doc
    }

    fn add_text(&mut self, field: &'static str, value: &str) {
        if !value.is_empty() {
            self.text.push((field, value.to_string()));
        }
    }

    /// Distinct `(field, term)` pairs for the term table
    pub fn field_terms(&self) -> Vec<(&'static str, String)> {
        let mut pairs: Vec<(&'static str, String)> = Vec::new();
        for (field, value) in &self.text {
            for term in terms(value) {
                if !pairs.iter().any(|(f, t)| f == field && *t == term) {
                    pairs.push((field, term));
                }
            }
        }
        pairs
    }
}

/// Split text into lowercase alphanumeric terms, first occurrence order, no repeats
pub fn terms(text: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for word in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
    {
        let term = word.to_lowercase();
        if !out.contains(&term) {
            out.push(term);
        }
    }
    out
}
