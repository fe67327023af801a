//! Journal loading: turns a JSON or CSV export into trade records.
//!
//! Loading policy:
//! 1. The input as a whole must be a collection (JSON array, or CSV with a
//!    header row). Anything else is a contract violation and fails.
//! 2. Individual rows that do not deserialize are skipped and counted.
//! 3. Dates are not validated here; malformed dates are dropped later by the
//!    analysis components.
//!
//! The raw input bytes are hashed (BLAKE3) so exported reports can be traced
//! back to the exact journal they were computed from.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tradelog_core::TradeRecord;

/// Errors from the journal loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("journal must be a JSON array of trade records, found {found}")]
    NotACollection { found: &'static str },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to read journal {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported journal format '{0}' (expected .json or .csv)")]
    UnsupportedFormat(String),
}

/// Records loaded from one journal export, with provenance.
#[derive(Debug, Clone)]
pub struct LoadedJournal {
    pub records: Vec<TradeRecord>,
    /// Rows that could not be read as trade records.
    pub skipped: usize,
    /// BLAKE3 hex digest of the raw input.
    pub dataset_hash: String,
}

/// Load a JSON array of trade records.
pub fn load_json(raw: &str) -> Result<LoadedJournal, LoadError> {
    let value: Value = serde_json::from_str(raw)?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(LoadError::NotACollection {
                found: json_kind(&other),
            })
        }
    };

    let mut records = Vec::with_capacity(items.len());
    let mut skipped = 0;
    for (idx, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<TradeRecord>(item) {
            Ok(record) => records.push(record),
            Err(err) => {
                skipped += 1;
                tracing::warn!(index = idx, %err, "skipping malformed journal entry");
            }
        }
    }

    Ok(finish(raw, records, skipped))
}

/// Load CSV with a header row of camelCase field names.
pub fn load_csv(raw: &str) -> Result<LoadedJournal, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());
    // Surface a broken header as a load failure rather than N skipped rows.
    reader.headers()?;

    let mut records = Vec::new();
    let mut skipped = 0;
    for (idx, row) in reader.deserialize::<TradeRecord>().enumerate() {
        match row {
            Ok(record) => records.push(record),
            Err(err) => {
                skipped += 1;
                tracing::warn!(row = idx + 1, %err, "skipping malformed journal row");
            }
        }
    }

    Ok(finish(raw, records, skipped))
}

/// Load a journal file, choosing the parser by extension.
pub fn load_path(path: &Path) -> Result<LoadedJournal, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let journal = match ext.as_str() {
        "json" => load_json(&raw)?,
        "csv" => load_csv(&raw)?,
        _ => return Err(LoadError::UnsupportedFormat(ext)),
    };

    tracing::info!(
        path = %path.display(),
        records = journal.records.len(),
        skipped = journal.skipped,
        "loaded journal"
    );
    Ok(journal)
}

fn finish(raw: &str, records: Vec<TradeRecord>, skipped: usize) -> LoadedJournal {
    LoadedJournal {
        records,
        skipped,
        dataset_hash: blake3::hash(raw.as_bytes()).to_hex().to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
