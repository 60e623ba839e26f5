//! Shared types for MTG card scanning.
//!
//! Holds the card identity resolved from Scryfall, the physical condition
//! grades used when tracking owned copies, and the lookup error type shared
//! by every crate that talks to Scryfall.

pub mod condition;
pub mod error;
pub mod scryfall;

pub use condition::CardCondition;
pub use error::{LookupError, LookupResult};
pub use scryfall::{CardRecord, ScryfallCard, ScryfallList};
