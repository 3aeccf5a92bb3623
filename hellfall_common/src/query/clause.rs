//! Turning filters into index clauses

use super::filter::{Filter, FilterSet, Operator};
use crate::raw::parse_number;
use serde::Serialize;

/// Tolerance applied to numeric bounds to absorb display rounding
pub const DEFAULT_EPSILON: f64 = 0.01;

/// A single condition for the search index
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Clause {
    /// Tokenized relevance match on a text field
    Match { field: String, text: String },
    /// Inclusive numeric range; `None` means unbounded
    Range {
        field: String,
        min: Option<f64>,
        max: Option<f64>,
    },
}

impl Clause {
    pub fn field(&self) -> &str {
        match self {
            Clause::Match { field, .. } | Clause::Range { field, .. } => field,
        }
    }

    /// Build the clause for a filter.
    ///
    /// Returns `None` when a comparison filter's value is not a number.
    pub fn from_filter(filter: &Filter, epsilon: f64) -> Option<Clause> {
        // offsets from the parsed value for the lower and upper bound
        let (lower, upper) = match filter.operator {
            Operator::Match => {
                return Some(Clause::Match {
                    field: filter.key.clone(),
                    text: filter.value.clone(),
                })
            }
            Operator::Equal => (Some(-epsilon), Some(epsilon)),
            Operator::Greater => (Some(epsilon), None),
            Operator::Less => (None, Some(-epsilon)),
            Operator::GreaterOrEqual => (Some(-epsilon), None),
            Operator::LessOrEqual => (None, Some(epsilon)),
        };

        let num = parse_number(&filter.value)?;
        let min = lower.map(|offset| num + offset);
        let max = upper.map(|offset| num + offset);

        Some(Clause::Range {
            field: filter.key.clone(),
            min,
            max,
        })
    }
}

/// Conjunction of clauses ready for the search index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledQuery {
    pub clauses: Vec<Clause>,
    /// Filters discarded for a non-numeric comparison value
    #[serde(skip)]
    pub dropped: usize,
}

impl FilterSet {
    /// Build the clauses for this set with the given range tolerance
    pub fn to_query(&self, epsilon: f64) -> CompiledQuery {
        let mut clauses = Vec::with_capacity(self.filters.len());
        let mut dropped = 0;

        for filter in &self.filters {
            match Clause::from_filter(filter, epsilon) {
                Some(clause) => clauses.push(clause),
                None => {
                    log::debug!(
                        "Dropping '{}{}{}': value is not a number",
                        filter.key,
                        filter.operator,
                        filter.value
                    );
                    dropped += 1;
                }
            }
        }

        CompiledQuery { clauses, dropped }
    }
}
