//! Canonical date keys anchored to the fixed UTC+8 tracker calendar.
//!
//! Every date the engine touches is reduced to a `DateKey` first. The key is a
//! zero-padded `YYYY-MM-DD` string, so plain lexicographic ordering equals
//! chronological ordering. Conversions never consult the host timezone; the
//! +8h offset is applied explicitly on both directions.

use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Fixed tracker offset east of UTC, in hours. No DST.
pub const UTC_OFFSET_HOURS: i64 = 8;

/// Inputs already warned about, so repeated renders do not flood the log.
/// Append-only; never read back for logic.
static WARNED_INPUTS: Lazy<Mutex<HashSet<String>>> = Lazy::new(|| Mutex::new(HashSet::new()));

fn warn_malformed(raw: &str) {
    let mut warned = WARNED_INPUTS.lock();
    if warned.insert(raw.to_string()) {
        log::warn!("Unrecognized date input {:?}; entry skipped", raw);
    }
}

/// A date-like value as supplied by callers: either text (canonical key,
/// RFC 3339 datetime, or a naive `YYYY-MM-DDTHH:MM:SS` read in the fixed
/// UTC+8 frame) or a Unix timestamp in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    Text(String),
    Millis(i64),
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self {
        DateInput::Text(s.to_string())
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(t: DateTime<Utc>) -> Self {
        DateInput::Millis(t.timestamp_millis())
    }
}

/// A calendar day in the fixed UTC+8 frame, as a `YYYY-MM-DD` key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(String);

impl DateKey {
    /// Parse a key string, accepting only the exact `YYYY-MM-DD` shape.
    pub fn parse(s: &str) -> Option<Self> {
        if is_date_key_shape(s) {
            Some(Self(s.to_string()))
        } else {
            None
        }
    }

    /// Key for the calendar day containing `t`, after the +8h shift.
    pub fn from_instant(t: DateTime<Utc>) -> Self {
        let shifted = t + Duration::hours(UTC_OFFSET_HOURS);
        Self(shifted.date_naive().format("%Y-%m-%d").to_string())
    }

    pub fn from_naive(d: NaiveDate) -> Self {
        Self(d.format("%Y-%m-%d").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The instant of local midnight for this key: UTC midnight of the date
    /// minus the +8h offset, so re-shifting by +8h reproduces the same day.
    ///
    /// Returns `None` for a key that does not resolve to a real calendar date
    /// (e.g. a 13th month), warning once per distinct value.
    pub fn to_instant(&self) -> Option<DateTime<Utc>> {
        match self.to_naive() {
            Some(d) => {
                let midnight = d.and_hms_opt(0, 0, 0)?;
                Some(Utc.from_utc_datetime(&midnight) - Duration::hours(UTC_OFFSET_HOURS))
            }
            None => {
                warn_malformed(self.as_str());
                None
            }
        }
    }

    /// Strictly parsed calendar date, `None` if the inner string is not a
    /// real zero-padded date.
    pub fn to_naive(&self) -> Option<NaiveDate> {
        if !is_date_key_shape(&self.0) {
            return None;
        }
        NaiveDate::parse_from_str(&self.0, "%Y-%m-%d").ok()
    }

    /// Compact chart label, e.g. `"Jun 02"`. Falls back to the raw key when
    /// the inner string is malformed.
    pub fn month_day_label(&self) -> String {
        self.to_naive()
            .map(|d| d.format("%b %d").to_string())
            .unwrap_or_else(|| self.0.clone())
    }

    /// Full display label, e.g. `"Jun 02, 2025"`.
    pub fn full_label(&self) -> String {
        self.to_naive()
            .map(|d| d.format("%b %d, %Y").to_string())
            .unwrap_or_else(|| self.0.clone())
    }
}

impl std::fmt::Display for DateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reduce any date-like input to a canonical key.
///
/// Text already in key shape is returned unchanged; this is the authoritative
/// path and never goes through an instant, so date-only strings cannot shift
/// across the UTC+8 boundary. Anything else is resolved to an absolute
/// instant and shifted. Unresolvable input yields `None` plus a one-time
/// warning per distinct value.
pub fn canonical_date(input: &DateInput) -> Option<DateKey> {
    match input {
        DateInput::Text(s) => {
            if is_date_key_shape(s) {
                return Some(DateKey(s.clone()));
            }
            match parse_instant_text(s) {
                Some(t) => Some(DateKey::from_instant(t)),
                None => {
                    warn_malformed(s);
                    None
                }
            }
        }
        DateInput::Millis(ms) => match DateTime::from_timestamp_millis(*ms) {
            Some(t) => Some(DateKey::from_instant(t)),
            None => {
                warn_malformed(&ms.to_string());
                None
            }
        },
    }
}

fn is_date_key_shape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| matches!(i, 4 | 7) || c.is_ascii_digit())
}

fn parse_instant_text(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    // A datetime without an offset is read in the fixed UTC+8 frame.
    if let Ok(n) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&n) - Duration::hours(UTC_OFFSET_HOURS));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_shape_fast_path_returned_unchanged() {
        let key = canonical_date(&DateInput::from("2025-06-02")).unwrap();
        assert_eq!(key.as_str(), "2025-06-02");
    }

    #[test]
    fn test_late_utc_instant_rolls_to_next_day() {
        // 16:30 UTC + 8h crosses midnight in the fixed frame.
        let t = Utc.with_ymd_and_hms(2025, 6, 2, 16, 30, 0).unwrap();
        assert_eq!(DateKey::from_instant(t).as_str(), "2025-06-03");
    }

    #[test]
    fn test_early_utc_instant_stays_same_day() {
        let t = Utc.with_ymd_and_hms(2025, 6, 2, 1, 0, 0).unwrap();
        assert_eq!(DateKey::from_instant(t).as_str(), "2025-06-02");
    }

    #[test]
    fn test_round_trip_key_instant_key() {
        let key = DateKey::parse("2025-08-15").unwrap();
        let midnight = key.to_instant().unwrap();
        assert_eq!(DateKey::from_instant(midnight), key);
    }

    #[test]
    fn test_to_instant_is_local_midnight() {
        let key = DateKey::parse("2025-06-02").unwrap();
        let t = key.to_instant().unwrap();
        // Local midnight = 16:00 UTC of the previous day.
        assert_eq!(t, Utc.with_ymd_and_hms(2025, 6, 1, 16, 0, 0).unwrap());
    }

    #[test]
    fn test_rfc3339_text_converts_via_instant() {
        let key = canonical_date(&DateInput::from("2025-06-02T16:30:00Z")).unwrap();
        assert_eq!(key.as_str(), "2025-06-03");
    }

    #[test]
    fn test_naive_datetime_reads_in_fixed_frame() {
        let key = canonical_date(&DateInput::from("2025-06-02T20:00:00")).unwrap();
        assert_eq!(key.as_str(), "2025-06-02");
    }

    #[test]
    fn test_millis_input() {
        let t = Utc.with_ymd_and_hms(2025, 6, 2, 1, 0, 0).unwrap();
        let key = canonical_date(&DateInput::Millis(t.timestamp_millis())).unwrap();
        assert_eq!(key.as_str(), "2025-06-02");
    }

    #[test]
    fn test_malformed_text_yields_none_repeatedly() {
        let bad = DateInput::from("not a date");
        assert_eq!(canonical_date(&bad), None);
        // Second call hits the dedup set; still None, no panic.
        assert_eq!(canonical_date(&bad), None);
    }

    #[test]
    fn test_shape_check_rejects_unpadded_dates() {
        assert!(DateKey::parse("2025-6-2").is_none());
        assert!(DateKey::parse("2025-06-021").is_none());
        assert!(DateKey::parse("2025/06/02").is_none());
    }

    #[test]
    fn test_shape_valid_but_impossible_date_fails_strict_parse() {
        let key = DateKey::parse("2025-13-40").unwrap();
        assert!(key.to_instant().is_none());
    }

    #[test]
    fn test_keys_order_lexicographically() {
        let a = DateKey::parse("2025-06-09").unwrap();
        let b = DateKey::parse("2025-06-10").unwrap();
        let c = DateKey::parse("2025-12-01").unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_labels() {
        let key = DateKey::parse("2025-06-02").unwrap();
        assert_eq!(key.month_day_label(), "Jun 02");
        assert_eq!(key.full_label(), "Jun 02, 2025");
    }
}
