//! The running list of scanned cards.

use chrono::{DateTime, Utc};
use mtg_common::{CardCondition, CardRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::RangeInclusive;
use uuid::Uuid;

/// Quantities a caller should allow when editing an entry.
///
/// [`Collection::update_card`] does not clamp to this range; front ends do.
pub const QUANTITY_RANGE: RangeInclusive<u32> = 1..=99;

/// Owned copies of one card in one condition and finish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub id: Uuid,
    pub name: String,
    pub set_name: String,
    pub set_code: String,
    pub external_id: Option<String>,
    pub condition: CardCondition,
    pub is_foil: bool,
    pub quantity: u32,
    pub created_at: DateTime<Utc>,
}

impl CollectionEntry {
    /// New entry with a single copy
    pub fn new(record: CardRecord, condition: CardCondition, is_foil: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: record.name,
            set_name: record.set_name,
            set_code: record.set_code,
            external_id: record.external_id,
            condition,
            is_foil,
            quantity: 1,
            created_at: Utc::now(),
        }
    }

    /// Returns true if this entry counts the same physical card as the given one
    pub fn matches(&self, record: &CardRecord, condition: CardCondition, is_foil: bool) -> bool {
        self.name == record.name
            && self.set_code == record.set_code
            && self.condition == condition
            && self.is_foil == is_foil
    }

    /// Finish label used on export ("Foil" or "Normal")
    pub fn finish(&self) -> &'static str {
        if self.is_foil {
            "Foil"
        } else {
            "Normal"
        }
    }
}

/// Scanned cards, most recently added first
#[derive(Debug, Default, Clone)]
pub struct Collection {
    entries: Vec<CollectionEntry>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one copy of a card, incrementing the quantity of the first entry
    /// with the same name, set, condition and finish, or prepending a new one.
    pub fn add_or_increment(
        &mut self,
        record: CardRecord,
        condition: CardCondition,
        is_foil: bool,
    ) -> CollectionEntry {
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|e| e.matches(&record, condition, is_foil))
        {
            existing.quantity += 1;
            log::info!(
                "Incremented {} ({}) to {} copies",
                existing.name,
                existing.set_code,
                existing.quantity
            );
            return existing.clone();
        }

        let entry = CollectionEntry::new(record, condition, is_foil);
        log::info!("Added {} ({})", entry.name, entry.set_code);
        self.entries.insert(0, entry.clone());
        entry
    }

    /// Add one near-mint, non-foil copy
    pub fn add(&mut self, record: CardRecord) -> CollectionEntry {
        self.add_or_increment(record, CardCondition::NearMint, false)
    }

    /// Overwrite the editable fields of an entry.
    ///
    /// Returns false if no entry has this id. A quantity of zero removes the
    /// entry; the upper bound is the caller's responsibility. If the edit gives
    /// the entry the same name, set, condition and finish as another entry, its
    /// copies are added to that entry and the edited one is removed.
    pub fn update_card(
        &mut self,
        id: Uuid,
        condition: CardCondition,
        is_foil: bool,
        quantity: u32,
    ) -> bool {
        let Some(index) = self.entries.iter().position(|e| e.id == id) else {
            log::debug!("Ignoring update for unknown entry {}", id);
            return false;
        };

        if quantity == 0 {
            let removed = self.entries.remove(index);
            log::info!("Removed {} ({}): quantity set to 0", removed.name, removed.set_code);
            return true;
        }

        let current = &self.entries[index];
        let duplicate = self.entries.iter().position(|other| {
            other.id != id
                && other.name == current.name
                && other.set_code == current.set_code
                && other.condition == condition
                && other.is_foil == is_foil
        });

        if let Some(target) = duplicate {
            let edited = self.entries.remove(index);
            let target = if target > index { target - 1 } else { target };
            let existing = &mut self.entries[target];
            existing.quantity += quantity;
            log::info!(
                "Merged edited {} ({}) into existing entry, now {} copies",
                edited.name,
                edited.set_code,
                existing.quantity
            );
            return true;
        }

        let entry = &mut self.entries[index];
        entry.condition = condition;
        entry.is_foil = is_foil;
        entry.quantity = quantity;
        true
    }

    /// Remove the entries at the given positions.
    ///
    /// Positions refer to the list as it was before the call. Duplicates and
    /// out-of-range positions are ignored. Returns how many entries went away.
    pub fn delete_at(&mut self, indices: &[usize]) -> usize {
        let doomed: HashSet<usize> = indices.iter().copied().collect();
        let before = self.entries.len();

        let mut position = 0;
        self.entries.retain(|_| {
            let keep = !doomed.contains(&position);
            position += 1;
            keep
        });

        let removed = before - self.entries.len();
        log::info!("Deleted {} entries", removed);
        removed
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[CollectionEntry] {
        &self.entries
    }

    pub fn get(&self, id: Uuid) -> Option<&CollectionEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of physical cards across all entries
    pub fn total_quantity(&self) -> u32 {
        self.entries.iter().map(|e| e.quantity).sum()
    }
}

#[cfg(test)]
#[path = "collection_tests.rs"]
mod tests;
