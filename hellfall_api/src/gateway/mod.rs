//! Search gateway: indexes normalized cards and executes compiled queries

mod document;
mod sqlite;

pub use document::{terms, IndexDocument};
pub use sqlite::SqliteGateway;

use crate::error::Result;
use hellfall_common::{Card, CompiledQuery};
use serde::Serialize;

/// A matching card by load position, with its relevance score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedHit {
    pub id: usize,
    pub score: f64,
}

/// One page of ranked matches
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SearchPage {
    /// Number of matching cards before the page limit
    pub total: usize,
    pub hits: Vec<RankedHit>,
}

/// Index and query engine behind the search endpoint.
///
/// Implementations are built once at load time and then shared by all
/// request handlers.
pub trait SearchGateway: Send + Sync {
    /// Index cards; the id of each card is its position in `cards`
    fn index_cards(&self, cards: &[Card]) -> Result<usize>;

    /// Run a conjunction of clauses and return the best `limit` matches
    fn execute(&self, query: &CompiledQuery, limit: usize) -> Result<SearchPage>;
}
