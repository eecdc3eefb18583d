//! Configuration for embedders wiring the MongoDB policy store.
//!
//! Loaded from environment variables.

use std::env;

/// Store connection settings plus the seed owner list.
#[derive(Debug, Clone)]
pub struct Config {
    pub mongodb_uri: String,
    pub mongodb_database: String,

    /// Seed owner user IDs (comma-separated in `OWNER_IDS`). Written into
    /// the policy store's owner list by the embedder's admin surface; the
    /// engine itself only ever reads the store.
    pub owner_ids: Vec<u64>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if `MONGODB_URI` is not set.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let owner_ids = env::var("OWNER_IDS")
            .unwrap_or_default()
            .split(',')
            .filter_map(|s| s.trim().parse::<u64>().ok())
            .collect();

        Self {
            mongodb_uri: env::var("MONGODB_URI").expect("MONGODB_URI must be set"),
            mongodb_database: env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| "cerberus".to_string()),
            owner_ids,
        }
    }
}
