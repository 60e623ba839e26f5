use mtg_common::CardRecord;
use std::collections::{HashMap, VecDeque};

/// Number of card lookups kept in memory by default
pub const DEFAULT_CACHE_CAPACITY: usize = 500;

/// Bounded in-memory cache for Scryfall lookups by card name.
///
/// Eviction is FIFO by insertion: reads never promote an entry. Re-inserting
/// a key moves it to the back of the order, so the order list never holds
/// duplicate keys and always has the same length as the map.
#[derive(Debug)]
pub struct LookupCache {
    /// Map of lowercased card name to card data
    cards: HashMap<String, CardRecord>,
    /// Keys from oldest to newest insertion
    order: VecDeque<String>,
    capacity: usize,
}

impl Default for LookupCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl LookupCache {
    /// Create an empty cache holding at most `capacity` cards.
    /// A capacity of zero disables caching.
    pub fn new(capacity: usize) -> Self {
        Self {
            cards: HashMap::with_capacity(capacity.min(DEFAULT_CACHE_CAPACITY)),
            order: VecDeque::with_capacity(capacity.min(DEFAULT_CACHE_CAPACITY)),
            capacity,
        }
    }

    /// Generate cache key from a card name
    pub fn key(name: &str) -> String {
        name.to_lowercase()
    }

    /// Get a card from cache
    pub fn get(&self, name: &str) -> Option<&CardRecord> {
        self.cards.get(&Self::key(name))
    }

    /// Check whether a card name is cached
    pub fn contains(&self, name: &str) -> bool {
        self.cards.contains_key(&Self::key(name))
    }

    /// Insert a card into cache, evicting the oldest insertion when full
    pub fn put(&mut self, name: &str, card: CardRecord) {
        if self.capacity == 0 {
            return;
        }

        let key = Self::key(name);
        if self.cards.contains_key(&key) {
            self.order.retain(|k| k != &key);
        } else if self.cards.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.cards.remove(&oldest);
                log::debug!("Evicted '{}' from lookup cache", oldest);
            }
        }

        self.order.push_back(key.clone());
        self.cards.insert(key, card);
    }

    /// Remove every cached card
    pub fn clear(&mut self) {
        self.cards.clear();
        self.order.clear();
        log::debug!("Cleared lookup cache");
    }

    /// Get card count
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Cached keys from oldest to newest insertion
    pub fn keys_in_order(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

#[cfg(test)]
#[path = "lookup_cache_tests.rs"]
mod tests;
