//! JSON ingestion for work log collections.
//!
//! The tracker UI stores logs as a JSON array of objects with at least
//! `date` and `hours`; any other fields ride along untouched. Parsing here
//! only gets the records into typed form — date resolution and hour coercion
//! happen in [`crate::models::log::normalize_logs`].

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::models::log::RawLogEntry;

/// Parse a log collection from JSON text.
pub fn parse_logs_json(json: &str) -> Result<Vec<RawLogEntry>> {
    let entries: Vec<RawLogEntry> =
        serde_json::from_str(json).context("Failed to parse work log JSON")?;
    Ok(entries)
}

/// Read and parse a log collection from a JSON file.
pub fn parse_logs_file<P: AsRef<Path>>(path: P) -> Result<Vec<RawLogEntry>> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read log file: {}", path.as_ref().display()))?;
    parse_logs_json(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_entry_shapes() {
        let json = r#"[
            {"date": "2025-06-02", "hours": 8},
            {"date": "2025-06-03T09:30:00", "hours": "6.5", "note": "standup ran long"},
            {"date": 1749052800000, "hours": 4}
        ]"#;
        let entries = parse_logs_json(json).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].hours, 8.0);
        assert_eq!(entries[1].hours, 6.5);
        assert_eq!(entries[1].extra["note"], "standup ran long");
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(parse_logs_json(r#"{"date": "2025-06-02"}"#).is_err());
    }

    #[test]
    fn test_missing_file_has_path_context() {
        let err = parse_logs_file("does/not/exist.json").unwrap_err();
        assert!(format!("{:#}", err).contains("does/not/exist.json"));
    }
}
