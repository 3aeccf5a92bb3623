//! In-memory SQLite search index
//!
//! Uses parameterized queries exclusively (no SQL string concatenation of
//! user input). Indexing is transactional and batched.

use super::document::{terms, IndexDocument};
use super::{RankedHit, SearchGateway, SearchPage};
use crate::error::{ApiError, Result};
use hellfall_common::{Card, Clause, CompiledQuery};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Transaction};
use std::sync::{Mutex, MutexGuard};

/// Cards written per transaction while indexing
const BATCH_SIZE: usize = 500;

/// Search index backed by an in-memory SQLite database
pub struct SqliteGateway {
    conn: Mutex<Connection>,
}

impl SqliteGateway {
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Number of indexed cards
    pub fn len(&self) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| ApiError::IndexUnavailable(e.to_string()))
    }
}

/// Create the index tables
///
/// - `cards`: one row per card, keyed by load position
/// - `card_terms`: distinct lowercase terms per text field
/// - `card_numbers`: numeric values per field (a card may have several)
fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS cards (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS card_terms (
            card_id INTEGER NOT NULL,
            field TEXT NOT NULL,
            term TEXT NOT NULL,
            PRIMARY KEY (card_id, field, term),
            FOREIGN KEY (card_id) REFERENCES cards(id)
        );

        CREATE INDEX IF NOT EXISTS idx_card_terms_lookup ON card_terms(field, term);

        CREATE TABLE IF NOT EXISTS card_numbers (
            card_id INTEGER NOT NULL,
            field TEXT NOT NULL,
            value REAL NOT NULL,
            FOREIGN KEY (card_id) REFERENCES cards(id)
        );

        CREATE INDEX IF NOT EXISTS idx_card_numbers_lookup ON card_numbers(field, value);
        ",
    )?;

    log::debug!("Search index schema initialized");
    Ok(())
}

fn index_batch_tx(tx: &Transaction<'_>, first_id: usize, cards: &[Card]) -> rusqlite::Result<()> {
    let mut card_stmt = tx.prepare_cached("INSERT INTO cards (id, name) VALUES (?1, ?2)")?;
    let mut term_stmt = tx.prepare_cached(
        "INSERT OR IGNORE INTO card_terms (card_id, field, term) VALUES (?1, ?2, ?3)",
    )?;
    let mut number_stmt =
        tx.prepare_cached("INSERT INTO card_numbers (card_id, field, value) VALUES (?1, ?2, ?3)")?;

    for (offset, card) in cards.iter().enumerate() {
        let id = (first_id + offset) as i64;
        card_stmt.execute(params![id, &card.name])?;

        let doc = IndexDocument::from_card(card);
        for (field, term) in doc.field_terms() {
            term_stmt.execute(params![id, field, term])?;
        }
        for (field, value) in &doc.numbers {
            number_stmt.execute(params![id, field, value])?;
        }
    }

    Ok(())
}

impl SearchGateway for SqliteGateway {
    fn index_cards(&self, cards: &[Card]) -> Result<usize> {
        let mut conn = self.lock()?;

        for (batch, chunk) in cards.chunks(BATCH_SIZE).enumerate() {
            let tx = conn.transaction()?;
            index_batch_tx(&tx, batch * BATCH_SIZE, chunk)?;
            tx.commit()?;
            log::debug!("Indexed batch {} ({} cards)", batch + 1, chunk.len());
        }

        Ok(cards.len())
    }

    fn execute(&self, query: &CompiledQuery, limit: usize) -> Result<SearchPage> {
        if query.clauses.is_empty() {
            return Ok(SearchPage::default());
        }

        let sql = build_sql(&query.clauses);
        let conn = self.lock()?;

        let total: i64 = conn.query_row(&sql.count, params_from_iter(sql.params.iter()), |row| {
            row.get(0)
        })?;

        let mut page_params = sql.params.clone();
        page_params.push(Value::Integer(limit as i64));
        let mut stmt = conn.prepare(&sql.page)?;
        let hits: rusqlite::Result<Vec<RankedHit>> = stmt
            .query_map(params_from_iter(page_params.iter()), |row| {
                let id: i64 = row.get(0)?;
                let score: i64 = row.get(1)?;
                Ok(RankedHit {
                    id: id as usize,
                    score: score as f64,
                })
            })?
            .collect();

        Ok(SearchPage {
            total: total as usize,
            hits: hits?,
        })
    }
}

/// Statements and bound values for one compiled query
struct QuerySql {
    count: String,
    /// Expects the page limit as one extra trailing parameter
    page: String,
    params: Vec<Value>,
}

/// Push a value and return its numbered placeholder
fn bind(params: &mut Vec<Value>, value: Value) -> String {
    params.push(value);
    format!("?{}", params.len())
}

fn build_sql(clauses: &[Clause]) -> QuerySql {
    let mut params = Vec::new();
    let mut conditions = Vec::new();
    let mut scores = Vec::new();

    for clause in clauses {
        match clause {
            Clause::Match { field, text } => {
                let words = terms(text);
                if words.is_empty() {
                    // nothing to match against; the conjunction cannot hold
                    conditions.push("0".to_string());
                    continue;
                }

                let field = bind(&mut params, Value::Text(field.clone()));
                let placeholders: Vec<String> = words
                    .into_iter()
                    .map(|word| bind(&mut params, Value::Text(word)))
                    .collect();
                let terms_in = placeholders.join(", ");

                conditions.push(format!(
                    "c.id IN (SELECT card_id FROM card_terms WHERE field = {} AND term IN ({}))",
                    field, terms_in
                ));
                scores.push(format!(
                    "(SELECT COUNT(*) FROM card_terms WHERE card_id = c.id AND field = {} AND term IN ({}))",
                    field, terms_in
                ));
            }
            Clause::Range { field, min, max } => {
                let mut condition = format!(
                    "SELECT card_id FROM card_numbers WHERE field = {}",
                    bind(&mut params, Value::Text(field.clone()))
                );
                if let Some(min) = min {
                    let min = bind(&mut params, Value::Real(*min));
                    condition.push_str(&format!(" AND value >= {}", min));
                }
                if let Some(max) = max {
                    let max = bind(&mut params, Value::Real(*max));
                    condition.push_str(&format!(" AND value <= {}", max));
                }
                conditions.push(format!("c.id IN ({})", condition));
            }
        }
    }

    let filter = conditions.join(" AND ");
    let score = if scores.is_empty() {
        "0".to_string()
    } else {
        scores.join(" + ")
    };
    let limit = format!("?{}", params.len() + 1);

    QuerySql {
        count: format!("SELECT COUNT(*) FROM cards c WHERE {}", filter),
        page: format!(
            "SELECT c.id, {} AS score FROM cards c WHERE {} ORDER BY score DESC, c.id ASC LIMIT {}",
            score, filter, limit
        ),
        params,
    }
}

#[cfg(test)]
#[path = "sqlite_tests.rs"]
mod tests;
