//! Hellfall API - card search service
//!
//! Loads the Hellfall card export once at startup, indexes it, and serves
//! Scryfall-style search over HTTP.

pub mod config;
pub mod error;
pub mod gateway;
pub mod loader;
pub mod web;

pub use config::{Cli, Command, SearchConfig, ServeArgs};
pub use error::{ApiError, Result};
pub use gateway::{RankedHit, SearchGateway, SearchPage, SqliteGateway};
pub use loader::{load_cards, load_snapshot, write_normalized, SearchHit, SearchResults, Snapshot};
