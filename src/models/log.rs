//! Work log entries: raw caller-supplied records and their normalized form.

use serde::{Deserialize, Deserializer, Serialize};

use super::time::{canonical_date, DateInput, DateKey};

/// Tolerant deserializer for logged hours: accepts a number or a numeric
/// string; anything else coerces to zero. Negative and non-finite values
/// clamp to zero as well.
fn deserialize_hours<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
        Other(serde_json::Value),
    }

    let raw = match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => n,
        NumberOrText::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        NumberOrText::Other(_) => 0.0,
    };
    Ok(coerce_hours(raw))
}

pub(crate) fn coerce_hours(raw: f64) -> f64 {
    if raw.is_finite() {
        raw.max(0.0)
    } else {
        0.0
    }
}

/// A log record as supplied by the caller. Fields other than `date` and
/// `hours` ride along untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLogEntry {
    pub date: DateInput,
    #[serde(default, deserialize_with = "deserialize_hours")]
    pub hours: f64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RawLogEntry {
    pub fn new(date: impl Into<DateInput>, hours: f64) -> Self {
        Self {
            date: date.into(),
            hours,
            extra: serde_json::Map::new(),
        }
    }
}

/// A log record reduced to a canonical date key and coerced hours.
/// Collections are sorted ascending by key and may contain duplicate keys;
/// aggregations sum across duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedLog {
    pub date_key: DateKey,
    pub hours: f64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Normalize a raw collection: resolve every date to a canonical key, coerce
/// hours, drop entries whose date cannot be resolved (the normalizer has
/// already warned about those), and sort ascending by key. The sort is
/// stable, so duplicate-key entries keep their input order.
pub fn normalize_logs(entries: &[RawLogEntry]) -> Vec<NormalizedLog> {
    let mut logs: Vec<NormalizedLog> = entries
        .iter()
        .filter_map(|entry| {
            let date_key = canonical_date(&entry.date)?;
            Some(NormalizedLog {
                date_key,
                hours: coerce_hours(entry.hours),
                extra: entry.extra.clone(),
            })
        })
        .collect();
    logs.sort_by(|a, b| a.date_key.cmp(&b.date_key));
    logs
}
