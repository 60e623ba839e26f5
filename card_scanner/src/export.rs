//! CSV export of the scanned collection.
//!
//! Every field is quoted, and leading characters that spreadsheet programs
//! would interpret as a formula are stripped first.

use crate::collection::CollectionEntry;
use crate::error::{ScannerError, ScannerResult};
use chrono::Utc;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

pub const CSV_HEADER: &str = "Card Name,Set Name,Set Code,SKU,Quantity,Condition,Finish";

/// Leading characters removed from every exported field
const FORMULA_PREFIXES: &[char] = &['=', '+', '-', '@', '\t', '\r'];

/// Strip leading formula trigger characters from a field
pub fn sanitize_field(field: &str) -> &str {
    field.trim_start_matches(FORMULA_PREFIXES)
}

/// Render entries as CSV, one row per entry in list order
pub fn to_csv(entries: &[CollectionEntry]) -> ScannerResult<String> {
    let mut buffer = Vec::with_capacity(CSV_HEADER.len() + 1 + entries.len() * 64);
    buffer.extend_from_slice(CSV_HEADER.as_bytes());
    buffer.push(b'\n');

    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buffer);

    for entry in entries {
        let quantity = entry.quantity.to_string();
        let record = [
            entry.name.as_str(),
            entry.set_name.as_str(),
            entry.set_code.as_str(),
            entry.external_id.as_deref().unwrap_or(""),
            quantity.as_str(),
            entry.condition.code(),
            entry.finish(),
        ];
        wtr.write_record(record.iter().map(|field| sanitize_field(field)))?;
    }

    let data = wtr
        .into_inner()
        .map_err(|e| ScannerError::Io(e.into_error()))?;
    String::from_utf8(data)
        .map_err(|e| ScannerError::Io(std::io::Error::new(ErrorKind::InvalidData, e)))
}

/// File name for an export stamped with `millis` since the Unix epoch.
///
/// `attempt` is appended when an earlier export already took the plain name.
pub fn export_file_name(millis: i64, attempt: u32) -> String {
    if attempt == 0 {
        format!("mtg-collection-{millis}.csv")
    } else {
        format!("mtg-collection-{millis}-{attempt}.csv")
    }
}

/// Create a new export file in `dir`, never overwriting an existing one
fn create_export_file(dir: &Path) -> ScannerResult<(PathBuf, File)> {
    let millis = Utc::now().timestamp_millis();
    let mut attempt = 0;
    loop {
        let path = dir.join(export_file_name(millis, attempt));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(e.into()),
        }
    }
}

/// Write the CSV export into `dir` and return the path of the new file
pub fn export_to_file(entries: &[CollectionEntry], dir: &Path) -> ScannerResult<PathBuf> {
    let csv = to_csv(entries)?;

    std::fs::create_dir_all(dir)?;
    let (path, mut file) = create_export_file(dir)?;
    file.write_all(csv.as_bytes())?;

    log::info!("Exported {} entries to {}", entries.len(), path.display());
    Ok(path)
}
