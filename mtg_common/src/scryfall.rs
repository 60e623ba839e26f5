//! Scryfall wire types and the card identity derived from them

use serde::{Deserialize, Serialize};

/// Card entry of a Scryfall search response
#[derive(Debug, Deserialize, Serialize, Clone)]
#[allow(dead_code)]
pub struct ScryfallCard {
    pub name: String,
    pub set_name: String,
    pub set: String,
    /// TCGplayer product ID, used as SKU on export
    #[serde(default)]
    pub tcgplayer_id: Option<u64>,
    #[serde(default)]
    pub finishes: Option<Vec<String>>,
}

/// Scryfall list response (`/cards/search`)
#[derive(Debug, Deserialize, Default)]
pub struct ScryfallList {
    #[serde(default)]
    pub data: Option<Vec<ScryfallCard>>,
}

impl ScryfallList {
    /// First card of the list, if any
    pub fn into_first(self) -> Option<ScryfallCard> {
        self.data.and_then(|cards| cards.into_iter().next())
    }
}

/// Canonical card identity resolved from Scryfall. Never mutated once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub name: String,
    pub set_name: String,
    pub set_code: String,
    /// External marketplace ID (TCGplayer)
    pub external_id: Option<String>,
}

impl CardRecord {
    pub fn new(
        name: impl Into<String>,
        set_name: impl Into<String>,
        set_code: impl Into<String>,
        external_id: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            set_name: set_name.into(),
            set_code: set_code.into(),
            external_id,
        }
    }
}

impl From<ScryfallCard> for CardRecord {
    fn from(card: ScryfallCard) -> Self {
        Self {
            name: card.name,
            set_name: card.set_name,
            set_code: card.set,
            external_id: card.tcgplayer_id.map(|id| id.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "scryfall_tests.rs"]
mod tests;
