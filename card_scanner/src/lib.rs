//! Card scanner core: debounced intake of recognized card names, Scryfall
//! lookups through a bounded cache, a running collection and CSV export.

pub mod api;
pub mod cache;
pub mod cli;
pub mod collection;
pub mod config;
pub mod error;
pub mod export;
pub mod intake;
pub mod recognition;
pub mod scanner;
pub mod session;

// Re-export commonly used items
pub use api::{CardSource, ScryfallClient};
pub use cache::LookupCache;
pub use collection::{Collection, CollectionEntry, QUANTITY_RANGE};
pub use config::ScannerConfig;
pub use error::{ScannerError, ScannerResult};
pub use export::{export_to_file, to_csv};
pub use intake::IntakeGate;
pub use mtg_common::{CardCondition, CardRecord, LookupError};
pub use recognition::{pick_card_name, ScanThrottle};
pub use scanner::{Scanner, ScannerHandle, ScannerSnapshot};
pub use session::{Intake, LookupOutcome, ScanStatus, ScannerSession};
