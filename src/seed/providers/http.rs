//! Seed collection fetched with a single GET.

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::seed::{LoadError, SeedProvider, SeedRecord, parse_records};

pub struct HttpSeed {
    url: String,
    client: reqwest::Client,
}

impl HttpSeed {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SeedProvider for HttpSeed {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<SeedRecord>, LoadError> {
        info!("Fetching seed collection from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;

        debug!("Seed response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Seed fetch failed: {} - {}", status, message);
            return Err(LoadError::Http { status, message });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;
        let records = parse_records(&body)?;
        info!("Fetched {} seed records", records.len());
        Ok(records)
    }
}
