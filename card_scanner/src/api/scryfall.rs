//! Scryfall client for resolving recognized card names.
//!
//! Uses async reqwest; every request carries the configured timeout so a
//! stalled connection surfaces as [`LookupError::Timeout`].

use crate::config::ScannerConfig;
use crate::error::{ScannerError, ScannerResult};
use async_trait::async_trait;
use mtg_common::{CardRecord, LookupError, LookupResult, ScryfallList};
use reqwest::StatusCode;

/// Remote source of card records.
///
/// `Ok(None)` means the source answered but knows no such card.
#[async_trait]
pub trait CardSource: Send + Sync {
    async fn fetch_card_by_name(&self, name: &str) -> LookupResult<Option<CardRecord>>;
}

/// Scryfall search client
#[derive(Debug, Clone)]
pub struct ScryfallClient {
    client: reqwest::Client,
    base_url: String,
}

impl ScryfallClient {
    /// Create a client for the configured base URL, user agent and timeout
    pub fn new(config: &ScannerConfig) -> ScannerResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(ScannerError::Client)?;

        log::info!(
            "Creating Scryfall client for {} (timeout {:?})",
            config.base_url,
            config.fetch_timeout
        );
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Exact-name search URL, all printings
    pub fn search_url(&self, name: &str) -> String {
        let query = format!("!\"{}\"", name);
        format!(
            "{}/cards/search?q={}&unique=prints",
            self.base_url,
            urlencoding::encode(&query)
        )
    }
}

#[async_trait]
impl CardSource for ScryfallClient {
    async fn fetch_card_by_name(&self, name: &str) -> LookupResult<Option<CardRecord>> {
        let url = self.search_url(name);
        log::info!("Searching Scryfall: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        // Scryfall answers a search without matches with 404
        if status == StatusCode::NOT_FOUND {
            log::debug!("No Scryfall match for '{}'", name);
            return Ok(None);
        }
        if !status.is_success() {
            return Err(LookupError::HttpStatus(status));
        }

        let body = response.text().await?;
        let list: ScryfallList = serde_json::from_str(&body)?;
        Ok(list.into_first().map(CardRecord::from))
    }
}

#[cfg(test)]
#[path = "scryfall_tests.rs"]
mod tests;
