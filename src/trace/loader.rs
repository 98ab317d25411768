//! Event-log loading and timestamp parsing.
//!
//! Reads the monitor's CSV file (`timestamp,source,destination,action,
//! proposal_num,proposal_val`) into a [`Trace`]. Loading is all-or-nothing:
//! any unreadable file, missing required column, or malformed row aborts the
//! load with a descriptive error.

use anyhow::Context;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use std::fs::File;

use super::types::{EventRecord, Trace};

/// Columns every event log must carry. The proposal columns are optional.
const REQUIRED_COLUMNS: [&str; 4] = ["timestamp", "source", "destination", "action"];

/// Naive timestamp formats accepted after RFC 3339 fails. The first is the
/// format the monitor writes (`2024-05-01T10:00:00.123`).
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Error type for event-log loading failures.
#[derive(Debug)]
pub enum TraceLoadError {
    FileReadError(String),
    ParseError(String),
    ValidationError(String),
}

impl std::fmt::Display for TraceLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceLoadError::FileReadError(msg) => write!(f, "Failed to read file: {}", msg),
            TraceLoadError::ParseError(msg) => write!(f, "Failed to parse CSV: {}", msg),
            TraceLoadError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for TraceLoadError {}

/// One CSV row before timestamp parsing.
#[derive(Debug, Deserialize)]
struct RawRecord {
    timestamp: String,
    source: String,
    destination: String,
    action: String,
    #[serde(default)]
    proposal_num: Option<i64>,
    #[serde(default)]
    proposal_val: Option<i64>,
}

/// Load and parse an event log from a CSV file.
///
/// # Parameters
///
/// * `path` - Path to the event log
///
/// # Returns
///
/// The parsed [`Trace`], or a [`TraceLoadError`] naming the failing row.
pub fn load_trace(path: &str) -> Result<Trace, TraceLoadError> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open event log: {}", path))
        .map_err(|e| TraceLoadError::FileReadError(e.to_string()))?;

    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| TraceLoadError::ParseError(e.to_string()))?
        .clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(TraceLoadError::ValidationError(format!(
                "Missing required column '{}'",
                column
            )));
        }
    }

    let mut events = Vec::new();
    for (idx, row) in reader.deserialize::<RawRecord>().enumerate() {
        // Header occupies line 1, first data row is line 2.
        let line = idx + 2;
        let raw = row.map_err(|e| TraceLoadError::ParseError(format!("line {}: {}", line, e)))?;
        let timestamp = parse_timestamp(&raw.timestamp).ok_or_else(|| {
            TraceLoadError::ParseError(format!(
                "line {}: unparsable timestamp '{}'",
                line, raw.timestamp
            ))
        })?;
        events.push(EventRecord {
            timestamp,
            source: raw.source,
            destination: raw.destination,
            action: raw.action,
            proposal_num: raw.proposal_num,
            proposal_val: raw.proposal_val,
        });
    }

    let trace = Trace::new(events);
    if trace.is_empty() {
        log::warn!("Event log {} contains no events", path);
    } else {
        log::info!("Loaded {} events from {}", trace.len(), path);
    }
    Ok(trace)
}

/// Parse a timestamp cell.
///
/// Accepts RFC 3339 first, then the naive formats in [`NAIVE_FORMATS`].
/// Naive values carry no zone and are interpreted as UTC; the charts only
/// use relative ordering and spans, so the offset does not matter.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    None
}
