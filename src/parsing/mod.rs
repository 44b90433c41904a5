//! Ingestion boundary: raw log collections from external storage formats.

pub mod json_parser;

pub use json_parser::{parse_logs_file, parse_logs_json};
