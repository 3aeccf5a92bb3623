//! Command line and runtime configuration

use clap::{Args, Parser, Subcommand};
use hellfall_common::DEFAULT_EPSILON;
use std::path::PathBuf;

/// Default number of hits returned per search
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Hellfall card search server
#[derive(Parser, Debug)]
#[command(name = "hellfall_api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the card export, build the index and serve the HTTP API
    Serve(ServeArgs),
    /// Normalize a raw card export and write the canonical card list as JSON
    Normalize {
        /// Raw export with a top-level `data` array
        source: PathBuf,
        /// Destination file for the normalized cards
        dest: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Path to the card data file
    #[arg(short, long, env = "HELLFALL_DATA")]
    pub data: PathBuf,

    /// The data file already holds normalized cards (output of `normalize`)
    #[arg(long, default_value_t = false)]
    pub normalized: bool,

    /// Interface to bind
    #[arg(long, env = "HELLFALL_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "HELLFALL_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Tolerance applied to numeric comparisons (`mv>=3`, `pow=2`, ...)
    #[arg(long, env = "HELLFALL_EPSILON", default_value_t = DEFAULT_EPSILON, value_parser = parse_epsilon)]
    pub epsilon: f64,

    /// Maximum hits per search
    #[arg(long, env = "HELLFALL_RESULT_LIMIT", default_value_t = DEFAULT_RESULT_LIMIT, value_parser = parse_limit)]
    pub limit: usize,
}

impl ServeArgs {
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            epsilon: self.epsilon,
            limit: self.limit,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Settings applied to every search request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    pub epsilon: f64,
    pub limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

fn parse_epsilon(value: &str) -> Result<f64, String> {
    let epsilon: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if !epsilon.is_finite() || epsilon < 0.0 {
        return Err("epsilon must be a finite, non-negative number".to_string());
    }
    Ok(epsilon)
}

fn parse_limit(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("limit must be at least 1".to_string()),
        Ok(limit) => Ok(limit),
        Err(_) => Err(format!("'{}' is not a positive integer", value)),
    }
}
