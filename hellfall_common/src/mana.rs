//! Mana cost evaluation
//!
//! A cost is a sequence of symbol groups such as `{2}{W}{W}`. A group may
//! offer several alternatives separated by `/` (hybrid mana, `{2/W}`), in
//! which case it is worth its most expensive alternative.

use crate::raw::parse_number;
use thiserror::Error;

/// Known symbol values. Anything else is read as a number, or counts as 1.
///
/// `P` is purple mana, not Phyrexian. `H` is the Phyrexian marker, which
/// never stands alone as a payment and so is worth nothing by itself.
const KNOWN_SYMBOLS: &[(&str, f64)] = &[
    ("W", 1.0),
    ("U", 1.0),
    ("B", 1.0),
    ("R", 1.0),
    ("G", 1.0),
    ("P", 1.0),
    ("C", 1.0),
    ("X", 0.0),
    ("Y", 0.0),
    ("Z", 0.0),
    ("H", 0.0),
];

const UNKNOWN_SYMBOL_VALUE: f64 = 1.0;

/// One `{...}` group of a mana cost
#[derive(Debug, Clone, PartialEq)]
pub struct ManaSymbol {
    /// Payment alternatives in source order; one entry for plain symbols
    pub alternatives: Vec<String>,
}

impl ManaSymbol {
    /// Value of the group: the maximum over its alternatives
    pub fn value(&self) -> f64 {
        self.alternatives
            .iter()
            .map(|alt| if alt.is_empty() { 0.0 } else { symbol_value(alt) })
            .reduce(f64::max)
            .unwrap_or(0.0)
    }

    /// True for groups offering a choice, e.g. `{2/W}`
    pub fn is_hybrid(&self) -> bool {
        self.alternatives.len() > 1
    }
}

/// Outcome of evaluating a cost string
#[derive(Debug, Clone, PartialEq)]
pub struct ManaEvaluation {
    /// Sum of all closed groups, computed even when the syntax is broken
    pub value: f64,
    /// Closed groups in source order
    pub symbols: Vec<ManaSymbol>,
    /// Set when braces or separators were misplaced anywhere in the input
    pub syntax_error: bool,
}

impl ManaEvaluation {
    pub fn is_well_formed(&self) -> bool {
        !self.syntax_error
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ManaCostError {
    /// Malformed cost; `partial` is the best-effort total
    #[error("invalid mana cost syntax (partial value {partial})")]
    Syntax { partial: f64 },
}

/// Look up the value of a single alternative
pub fn symbol_value(symbol: &str) -> f64 {
    if let Some((_, value)) = KNOWN_SYMBOLS.iter().find(|(known, _)| *known == symbol) {
        return *value;
    }

    parse_number(symbol).unwrap_or(UNKNOWN_SYMBOL_VALUE)
}

/// Evaluate a cost string, best effort.
///
/// The whole input is always scanned; misplaced `{`, `}` or `/`, empty
/// alternatives and a group left open at the end all set `syntax_error`
/// without stopping evaluation. Characters outside braces are not
/// discarded: they accumulate into the next alternative.
pub fn evaluate(cost: &str) -> ManaEvaluation {
    let mut total = 0.0;
    let mut syntax_error = false;
    let mut open = false;
    let mut symbols = Vec::new();
    let mut alternatives: Vec<String> = Vec::new();
    let mut current = String::new();

    for ch in cost.trim().chars() {
        match ch {
            '{' => {
                if open {
                    syntax_error = true;
                }
                open = true;
            }
            '/' => {
                if !open {
                    syntax_error = true;
                }
                if current.is_empty() {
                    syntax_error = true;
                } else {
                    alternatives.push(std::mem::take(&mut current));
                }
            }
            '}' => {
                if !open {
                    syntax_error = true;
                }
                open = false;

                if current.is_empty() {
                    syntax_error = true;
                } else {
                    alternatives.push(std::mem::take(&mut current));
                }

                let symbol = ManaSymbol {
                    alternatives: std::mem::take(&mut alternatives),
                };
                total += symbol.value();
                symbols.push(symbol);
            }
            other => current.push(other),
        }
    }

    if open {
        syntax_error = true;
    }

    ManaEvaluation {
        value: total,
        symbols,
        syntax_error,
    }
}

/// Strict form of [`evaluate`]: fails on any syntax violation
pub fn parse_mana_value(cost: &str) -> Result<f64, ManaCostError> {
    let evaluation = evaluate(cost);
    if evaluation.syntax_error {
        log::debug!("Malformed mana cost '{}'", cost);
        return Err(ManaCostError::Syntax {
            partial: evaluation.value,
        });
    }
    Ok(evaluation.value)
}
