//! Command line arguments and the line protocol of the terminal front end.
//!
//! Each input line is either a `:command` or one recognized frame: the text
//! lines found by OCR, separated by `|`.

use crate::collection::QUANTITY_RANGE;
use crate::config::ScannerConfig;
use clap::Parser;
use mtg_common::CardCondition;
use std::path::PathBuf;
use std::time::Duration;

/// MTG card scanner - resolves recognized card names and tracks a collection
#[derive(Parser, Debug)]
#[command(name = "card_scanner")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Scryfall API base URL (overrides SCRYFALL_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Maximum number of card lookups kept in memory
    #[arg(long, default_value_t = crate::cache::DEFAULT_CACHE_CAPACITY)]
    pub cache_capacity: usize,

    /// Seconds during which the same card name is not processed twice
    #[arg(long, default_value_t = 3.0)]
    pub cooldown_secs: f64,

    /// Milliseconds between two frames typed at a terminal (0 disables throttling)
    #[arg(long, default_value_t = 1500)]
    pub scan_cooldown_ms: u64,

    /// Timeout for a Scryfall request in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Directory CSV exports are written to
    #[arg(short, long, default_value_os_t = default_export_dir())]
    pub export_dir: PathBuf,
}

/// Returns the default export directory: the downloads folder, else the temp dir
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(std::env::temp_dir)
}

impl Args {
    /// Layer the arguments over the environment defaults
    pub fn to_config(&self) -> ScannerConfig {
        let mut config = ScannerConfig::from_env()
            .with_cache_capacity(self.cache_capacity)
            .with_intake_cooldown(Duration::from_secs_f64(self.cooldown_secs.max(0.0)))
            .with_scan_cooldown(Duration::from_millis(self.scan_cooldown_ms))
            .with_fetch_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url.as_str());
        }
        config
    }
}

/// Cooldown between two frames; frames are only throttled when stdin is a terminal
pub fn frame_cooldown(config: &ScannerConfig, interactive: bool) -> Duration {
    if interactive {
        config.scan_cooldown
    } else {
        Duration::ZERO
    }
}

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Text lines recognized in one camera frame
    Frame(Vec<String>),
    List,
    Csv,
    Export,
    Update {
        index: usize,
        condition: CardCondition,
        is_foil: bool,
        quantity: u32,
    },
    Delete(Vec<usize>),
    Clear,
    Dismiss,
    Help,
    Quit,
}

pub const HELP: &str = "\
Type recognized text (use | between OCR lines of one frame), or a command:
  :list                                 show the collection
  :update <index> <condition> <foil|normal> <quantity>
  :delete <index> [<index> ...]
  :clear                                empty collection and cache
  :csv                                  print the CSV export
  :export                               write the CSV export to the export directory
  :dismiss                              hide the last error message
  :quit";

/// Parse an input line. Quantities are clamped to the editable range.
pub fn parse_input(line: &str) -> Result<Input, String> {
    let line = line.trim();
    let Some(command) = line.strip_prefix(':') else {
        return Ok(Input::Frame(line.split('|').map(str::to_string).collect()));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = parts.collect();

    match name.as_str() {
        "list" | "ls" => Ok(Input::List),
        "csv" => Ok(Input::Csv),
        "export" => Ok(Input::Export),
        "clear" => Ok(Input::Clear),
        "dismiss" => Ok(Input::Dismiss),
        "help" | "h" => Ok(Input::Help),
        "quit" | "q" | "exit" => Ok(Input::Quit),
        "delete" | "rm" => {
            if args.is_empty() {
                return Err("Usage: :delete <index> [<index> ...]".to_string());
            }
            args.iter()
                .map(|a| a.parse::<usize>().map_err(|_| format!("Invalid index: {a}")))
                .collect::<Result<Vec<_>, _>>()
                .map(Input::Delete)
        }
        "update" => {
            let &[index, condition, finish, quantity] = args.as_slice() else {
                return Err(
                    "Usage: :update <index> <condition> <foil|normal> <quantity>".to_string(),
                );
            };
            let index = index
                .parse::<usize>()
                .map_err(|_| format!("Invalid index: {index}"))?;
            let condition = CardCondition::parse(condition)
                .ok_or_else(|| format!("Unknown condition: {condition}"))?;
            let is_foil = match finish.to_lowercase().as_str() {
                "foil" | "f" | "yes" => true,
                "normal" | "nonfoil" | "n" | "no" => false,
                _ => return Err(format!("Unknown finish: {finish}")),
            };
            let quantity = quantity
                .parse::<u32>()
                .map_err(|_| format!("Invalid quantity: {quantity}"))?
                .clamp(*QUANTITY_RANGE.start(), *QUANTITY_RANGE.end());
            Ok(Input::Update {
                index,
                condition,
                is_foil,
                quantity,
            })
        }
        other => Err(format!("Unknown command: :{other} (try :help)")),
    }
}
