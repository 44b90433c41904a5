//! Workday calendar over canonical UTC+8 days.
//!
//! The tracker excludes exactly one weekday per week (Sunday by default);
//! every other day, Saturday included, counts as a workday. All primitives
//! here operate on day boundaries produced by the key normalizer and never
//! re-derive calendar fields from the host timezone.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};

use super::time::{DateKey, UTC_OFFSET_HOURS};

/// Weekday of the instant after the +8h shift.
pub fn weekday_of(t: DateTime<Utc>) -> Weekday {
    (t + Duration::hours(UTC_OFFSET_HOURS)).weekday()
}

/// True unless the instant falls on the excluded weekday.
pub fn is_workday(t: DateTime<Utc>, excluded: Weekday) -> bool {
    weekday_of(t) != excluded
}

pub(crate) fn is_workday_date(d: NaiveDate, excluded: Weekday) -> bool {
    d.weekday() != excluded
}

/// The instant `n` canonical days later (negative `n` walks backward),
/// always aligned to a canonical-day boundary regardless of input alignment.
pub fn step_day(t: DateTime<Utc>, n: i64) -> Option<DateTime<Utc>> {
    let midnight = DateKey::from_instant(t).to_instant()?;
    midnight.checked_add_signed(Duration::days(n))
}

/// Count workdays between two instants, both endpoints inclusive.
/// Empty or inverted ranges count zero.
pub fn count_workdays(start: DateTime<Utc>, end: DateTime<Utc>, excluded: Weekday) -> u32 {
    count_workdays_between(
        &DateKey::from_instant(start),
        &DateKey::from_instant(end),
        excluded,
    )
}

/// Count workdays between two keys, both endpoints inclusive.
pub fn count_workdays_between(start: &DateKey, end: &DateKey, excluded: Weekday) -> u32 {
    let (Some(mut day), Some(last)) = (start.to_naive(), end.to_naive()) else {
        return 0;
    };
    let mut count = 0;
    while day <= last {
        if is_workday_date(day, excluded) {
            count += 1;
        }
        let Some(next) = day.succ_opt() else { break };
        day = next;
    }
    count
}

/// Signed whole calendar days from `a` to `b`; `None` if either key is
/// malformed.
pub fn days_between(a: &DateKey, b: &DateKey) -> Option<i64> {
    let a = a.to_naive()?;
    let b = b.to_naive()?;
    Some(b.signed_duration_since(a).num_days())
}

/// Program week containing `day`: the start date is day 1 of week 1, the 8th
/// day opens week 2. Days before the start clamp into week 1.
pub fn week_of(program_start: &DateKey, day: &DateKey) -> u32 {
    let offset = days_between(program_start, day).unwrap_or(0).max(0);
    (offset / 7) as u32 + 1
}
