//! Scryfall-style query compilation
//!
//! A query such as `t:creature mv>=3 o:"draw a card"` is scanned for
//! `key<op>value` tokens, which become [`Filter`]s and then structured
//! [`Clause`]s for the search index. All clauses are combined with AND.

mod clause;
mod filter;

pub use clause::{Clause, CompiledQuery, DEFAULT_EPSILON};
pub use filter::{canonical_field, compile, Filter, FilterSet, Operator, FIELD_ALIASES};

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
