//! Hellfall Common - card model and search core
//!
//! Pure, synchronous building blocks shared by the search service:
//! mana-cost evaluation, normalization of raw ingestion records into
//! canonical cards, and compilation of Scryfall-style queries into
//! structured clauses.

pub mod error;
pub mod mana;
pub mod model;
pub mod normalize;
pub mod query;
pub mod raw;

pub use error::{Error, Result};
pub use mana::{evaluate, parse_mana_value, ManaCostError, ManaEvaluation, ManaSymbol};
pub use model::{Card, Side, Token};
pub use normalize::{normalize, normalize_entry};
pub use query::{compile, Clause, CompiledQuery, Filter, FilterSet, Operator, DEFAULT_EPSILON};
pub use raw::{RawCardEntry, RawDatabase, RawScalar};
