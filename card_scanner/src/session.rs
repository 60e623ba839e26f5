//! Single-writer owner of the scanning state.
//!
//! `ScannerSession` holds the collection, the lookup cache and the intake gate.
//! It never performs I/O: a cache miss is handed back to the caller as
//! [`Intake::Fetch`], and the fetch result comes back in through
//! [`ScannerSession::complete_lookup`].

use crate::cache::LookupCache;
use crate::collection::{Collection, CollectionEntry};
use crate::config::ScannerConfig;
use crate::error::ScannerResult;
use crate::export;
use crate::intake::IntakeGate;
use mtg_common::{CardCondition, CardRecord, LookupResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use uuid::Uuid;

/// What happened to a piece of recognized text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intake {
    /// Empty or a repeat inside the cooldown window
    Rejected,
    /// Served from the cache and merged into the collection
    Resolved(CollectionEntry),
    /// Cache miss: the caller must fetch `name` and report back
    Fetch { name: String },
    /// A fetch for the same card is already running; it will count this scan too
    Joined,
}

/// Result of applying a finished fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Merged(CollectionEntry),
    NotFound,
    Failed,
}

/// User-visible state besides the collection itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStatus {
    pub is_loading: bool,
    /// Dismissable message from the last failed lookup
    pub message: Option<String>,
}

#[derive(Debug)]
pub struct ScannerSession {
    collection: Collection,
    cache: LookupCache,
    gate: IntakeGate,
    /// Cache key of every running fetch, with the number of scans waiting on it
    in_flight: HashMap<String, usize>,
    message: Option<String>,
}

impl Default for ScannerSession {
    fn default() -> Self {
        Self::new(&ScannerConfig::default())
    }
}

impl ScannerSession {
    pub fn new(config: &ScannerConfig) -> Self {
        Self {
            collection: Collection::new(),
            cache: LookupCache::new(config.cache_capacity),
            gate: IntakeGate::new(config.intake_cooldown),
            in_flight: HashMap::new(),
            message: None,
        }
    }

    /// Entry point for the recognition collaborator
    pub fn handle_recognized_text(&mut self, text: &str, now: Instant) -> Intake {
        let name = text.trim();
        if name.is_empty() || !self.gate.admit(name, now) {
            return Intake::Rejected;
        }
        self.message = None;

        if let Some(card) = self.cache.get(name).cloned() {
            log::info!("Cache hit for '{}'", name);
            return Intake::Resolved(self.collection.add(card));
        }

        let key = LookupCache::key(name);
        if let Some(waiting) = self.in_flight.get_mut(&key) {
            *waiting += 1;
            log::debug!("Joining running lookup for '{}' ({} waiting)", name, waiting);
            return Intake::Joined;
        }

        log::info!("Cache miss for '{}', fetching from Scryfall", name);
        self.in_flight.insert(key, 1);
        Intake::Fetch {
            name: name.to_string(),
        }
    }

    /// Apply the result of a fetch started by [`Intake::Fetch`].
    ///
    /// On success the card is cached and merged once per scan that waited on
    /// the fetch. Failures only set the status message.
    pub fn complete_lookup(
        &mut self,
        name: &str,
        result: LookupResult<Option<CardRecord>>,
    ) -> LookupOutcome {
        let waiting = self
            .in_flight
            .remove(&LookupCache::key(name))
            .unwrap_or(1);

        match result {
            Ok(Some(card)) => {
                self.cache.put(name, card.clone());
                let mut entry = self.collection.add(card.clone());
                for _ in 1..waiting {
                    entry = self.collection.add(card.clone());
                }
                LookupOutcome::Merged(entry)
            }
            Ok(None) => {
                log::info!("Card '{}' not found", name);
                self.message = Some(format!("Card '{}' not found", name));
                LookupOutcome::NotFound
            }
            Err(e) if e.is_decode() => {
                log::warn!("Scryfall decode error for '{}': {}", name, e);
                self.message = Some(format!("Card '{}' not found", name));
                LookupOutcome::NotFound
            }
            Err(e) => {
                log::warn!("Lookup for '{}' failed: {}", name, e);
                self.message = Some(format!("Failed to lookup card: {}", e));
                LookupOutcome::Failed
            }
        }
    }

    /// Forget a fetch that was never started
    pub fn abandon_lookup(&mut self, name: &str) {
        self.in_flight.remove(&LookupCache::key(name));
    }

    /// Add a card directly with an explicit condition and finish
    pub fn add_or_increment(
        &mut self,
        card: CardRecord,
        condition: CardCondition,
        is_foil: bool,
    ) -> CollectionEntry {
        self.collection.add_or_increment(card, condition, is_foil)
    }

    pub fn update_card(
        &mut self,
        id: Uuid,
        condition: CardCondition,
        is_foil: bool,
        quantity: u32,
    ) -> bool {
        self.collection.update_card(id, condition, is_foil, quantity)
    }

    pub fn delete_at(&mut self, indices: &[usize]) -> usize {
        self.collection.delete_at(indices)
    }

    /// Empty the collection and the cache, and drop any status message.
    ///
    /// The intake gate keeps its last text, and running fetches are not
    /// cancelled; their results still land.
    pub fn clear_all(&mut self) {
        self.collection.clear();
        self.cache.clear();
        self.message = None;
        log::info!("Cleared collection and lookup cache");
    }

    pub fn dismiss_message(&mut self) {
        self.message = None;
    }

    pub fn status(&self) -> ScanStatus {
        ScanStatus {
            is_loading: self.is_loading(),
            message: self.message.clone(),
        }
    }

    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn entries(&self) -> &[CollectionEntry] {
        self.collection.entries()
    }

    pub fn cache(&self) -> &LookupCache {
        &self.cache
    }

    pub fn to_csv(&self) -> ScannerResult<String> {
        export::to_csv(self.collection.entries())
    }

    pub fn export_to_file(&self, dir: &Path) -> ScannerResult<PathBuf> {
        export::export_to_file(self.collection.entries(), dir)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
