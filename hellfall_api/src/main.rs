//! Hellfall API - card search service
//!
//! Loads and indexes the card export, then serves search over HTTP.
//! A failed load is fatal: the server never starts with partial data.

use clap::Parser;
use hellfall_api::{load_snapshot, write_normalized, Cli, Command, ServeArgs};
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => run_server(args).await,
        Command::Normalize { source, dest } => run_normalize(&source, &dest),
    }
}

/// Load the snapshot and serve until shutdown
async fn run_server(args: ServeArgs) {
    log::info!("Starting hellfall_api...");
    log::info!("Data file: {}", args.data.display());

    let snapshot = match load_snapshot(&args.data, args.normalized, args.search_config()) {
        Ok(snapshot) => Arc::new(snapshot),
        Err(e) => {
            log::error!("Failed to load card database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = hellfall_api::web::serve(snapshot, &args.address()).await {
        log::error!("Web server error: {}", e);
        std::process::exit(1);
    }
}

/// One-shot normalization of a raw export
fn run_normalize(source: &Path, dest: &Path) {
    match write_normalized(source, dest) {
        Ok(count) => log::info!("Normalization completed: {} cards", count),
        Err(e) => {
            log::error!("Normalization failed: {}", e);
            std::process::exit(1);
        }
    }
}
