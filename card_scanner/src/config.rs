//! Scanner configuration

use crate::cache::DEFAULT_CACHE_CAPACITY;
use crate::intake::DEFAULT_INTAKE_COOLDOWN;
use crate::recognition::DEFAULT_SCAN_COOLDOWN;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.scryfall.com";
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_USER_AGENT: &str = "D2D-Automations-CardScanner/1.0";

/// Environment variable overriding the Scryfall base URL
pub const BASE_URL_ENV: &str = "SCRYFALL_BASE_URL";

/// Tunables for a scanning session
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Scryfall API root, without trailing slash
    pub base_url: String,
    pub user_agent: String,
    /// Maximum number of card lookups kept in memory
    pub cache_capacity: usize,
    /// How long the same recognized text is ignored after being accepted
    pub intake_cooldown: Duration,
    /// Minimum time between recognition passes
    pub scan_cooldown: Duration,
    /// Timeout for a single Scryfall request
    pub fetch_timeout: Duration,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            intake_cooldown: DEFAULT_INTAKE_COOLDOWN,
            scan_cooldown: DEFAULT_SCAN_COOLDOWN,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl ScannerConfig {
    /// Defaults, with the base URL taken from `SCRYFALL_BASE_URL` when set
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => {
                log::info!("Using Scryfall base URL from {}: {}", BASE_URL_ENV, url);
                config.with_base_url(url)
            }
            _ => config,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_intake_cooldown(mut self, cooldown: Duration) -> Self {
        self.intake_cooldown = cooldown;
        self
    }

    #[must_use]
    pub fn with_scan_cooldown(mut self, cooldown: Duration) -> Self {
        self.scan_cooldown = cooldown;
        self
    }

    #[must_use]
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}
