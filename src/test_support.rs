//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::core::config::{DEFAULT_LOG_FILE, DEFAULT_LOG_LEVEL, ResolvedConfig};
use crate::core::state::App;
use crate::seed::{LoadError, SeedProvider, SeedRecord};

/// An in-memory seed for tests that don't touch disk or network.
pub struct StaticSeed(pub Vec<SeedRecord>);

#[async_trait]
impl SeedProvider for StaticSeed {
    fn describe(&self) -> String {
        "static".to_string()
    }

    async fn fetch(&self) -> Result<Vec<SeedRecord>, LoadError> {
        Ok(self.0.clone())
    }
}

fn record(i: usize, level: &str) -> SeedRecord {
    SeedRecord {
        level: level.to_string(),
        front_text: format!("front {i}"),
        back_text: format!("back {i}"),
        hint: format!("hint {i}"),
    }
}

/// `n` records, levels alternating "1", "2", "1", ...
pub fn records(n: usize) -> Vec<SeedRecord> {
    (1..=n)
        .map(|i| record(i, if i % 2 == 1 { "1" } else { "2" }))
        .collect()
}

/// `n` records, all level "1".
pub fn uniform_records(n: usize) -> Vec<SeedRecord> {
    (1..=n).map(|i| record(i, "1")).collect()
}

pub fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed)
}

pub fn test_config() -> ResolvedConfig {
    ResolvedConfig {
        seed_source: "static".to_string(),
        start_address: String::new(),
        shuffle_seed: Some(7),
        log_file: DEFAULT_LOG_FILE.into(),
        log_level: DEFAULT_LOG_LEVEL,
        initial_filter: None,
        notices: Vec::new(),
    }
}

/// Creates a test App over `records(n)`, positioned at `questions/1`.
pub fn test_app(n: usize) -> App {
    App::from_config(records(n), &test_config(), "static".to_string())
}

/// Same as `test_app`, every item at level "1".
pub fn uniform_app(n: usize) -> App {
    App::from_config(uniform_records(n), &test_config(), "static".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_seed_feeds_app() {
        let seed = StaticSeed(uniform_records(3));
        let records = seed.fetch().await.unwrap();
        let app = App::from_config(records, &test_config(), seed.describe());
        assert_eq!(app.root.len(), 3);
        assert_eq!(app.source, "static");
    }
}
