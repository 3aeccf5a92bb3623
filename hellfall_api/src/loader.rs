//! One-time load of the card database and search index
//!
//! The resulting [`Snapshot`] is immutable and shared by every request.

use crate::config::SearchConfig;
use crate::error::Result;
use crate::gateway::{SearchGateway, SqliteGateway};
use hellfall_common::{compile, normalize, Card, FilterSet, RawDatabase};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

/// Loaded cards together with the index built from them
pub struct Snapshot {
    cards: Vec<Card>,
    gateway: Box<dyn SearchGateway>,
    config: SearchConfig,
}

/// A ranked match with its card
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub id: usize,
    pub score: f64,
    pub card: Card,
}

/// Body of a successful search
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub total: usize,
    pub hits: Vec<SearchHit>,
}

impl Snapshot {
    /// Index `cards` into `gateway` and freeze the result
    pub fn build(
        cards: Vec<Card>,
        gateway: Box<dyn SearchGateway>,
        config: SearchConfig,
    ) -> Result<Self> {
        let start = Instant::now();
        let indexed = gateway.index_cards(&cards)?;
        log::info!(
            "Index built: {} cards in {}ms",
            indexed,
            start.elapsed().as_millis()
        );

        Ok(Self {
            cards,
            gateway,
            config,
        })
    }

    /// Build with the default in-memory SQLite index
    pub fn with_sqlite(cards: Vec<Card>, config: SearchConfig) -> Result<Self> {
        Self::build(cards, Box::new(SqliteGateway::open_in_memory()?), config)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: usize) -> Option<&Card> {
        self.cards.get(id)
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Compile a query, run it against the index and attach the cards
    pub fn search(&self, query: &str) -> Result<SearchResults> {
        let filters: FilterSet = compile(query);
        let compiled = filters.to_query(self.config.epsilon);

        if filters.dropped + compiled.dropped > 0 {
            log::debug!(
                "Query '{}': {} token(s) dropped",
                query,
                filters.dropped + compiled.dropped
            );
        }

        let page = self.gateway.execute(&compiled, self.config.limit)?;
        let hits = page
            .hits
            .into_iter()
            .filter_map(|hit| {
                let card = self.card(hit.id)?.clone();
                Some(SearchHit {
                    id: hit.id,
                    score: hit.score,
                    card,
                })
            })
            .collect();

        Ok(SearchResults {
            total: page.total,
            hits,
        })
    }
}

/// Read cards from disk: a raw export, or a normalized card list
pub fn load_cards(path: &Path, normalized: bool) -> Result<Vec<Card>> {
    let start = Instant::now();

    let cards = if normalized {
        let file = std::fs::File::open(path)?;
        serde_json::from_reader(std::io::BufReader::new(file))?
    } else {
        let raw = RawDatabase::from_path(path)?;
        let entries = raw.entries();
        if entries.len() < raw.len() {
            log::warn!(
                "{} of {} data entries were unusable",
                raw.len() - entries.len(),
                raw.len()
            );
        }
        normalize(&entries)
    };

    log::info!(
        "Loaded {} cards from {} in {}ms",
        cards.len(),
        path.display(),
        start.elapsed().as_millis()
    );
    Ok(cards)
}

/// Load cards and build the default snapshot
pub fn load_snapshot(path: &Path, normalized: bool, config: SearchConfig) -> Result<Snapshot> {
    let cards = load_cards(path, normalized)?;
    Snapshot::with_sqlite(cards, config)
}

/// Normalize a raw export and write the canonical cards as JSON
pub fn write_normalized(source: &Path, dest: &Path) -> Result<usize> {
    let cards = load_cards(source, false)?;
    let file = std::fs::File::create(dest)?;
    serde_json::to_writer(std::io::BufWriter::new(file), &cards)?;
    log::info!("Wrote {} normalized cards to {}", cards.len(), dest.display());
    Ok(cards.len())
}
