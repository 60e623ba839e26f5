//! Caching layer for Scryfall lookups

pub mod lookup_cache;

pub use lookup_cache::{LookupCache, DEFAULT_CACHE_CAPACITY};
