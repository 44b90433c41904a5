//! Forecast snapshot: totals, pace, and the projected completion date.
//!
//! This module reduces a normalized log collection to a single scalar
//! snapshot under the workday calendar:
//! 1. total logged hours and clamped remaining hours,
//! 2. ideal hours-to-date (daily target on every workday since the start,
//!    clamped to the overall target) and the ahead/behind delta,
//! 3. remaining workday/calendar-day counts and the rate required to finish
//!    exactly on the deadline,
//! 4. an inferred or overridden daily pace,
//! 5. a day-by-day projection of when the cumulative target will be met.
//!
//! ## Edge cases
//! - Target already met: the projection loop never runs; projected date = today.
//! - No workdays left before the deadline: `required_rate` is zero; the
//!   caller decides how to surface "unreachable by schedule".
//! - Pathological pace/target combinations: the projection is capped at a
//!   hard iteration ceiling and reports the capped day instead of hanging.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::ProgramConfig;
use crate::models::calendar::{count_workdays_between, days_between, is_workday_date};
use crate::models::log::NormalizedLog;
use crate::models::time::{canonical_date, DateInput, DateKey};

/// Minimum accepted daily pace. Keeps the projection loop terminating even
/// for zero or negative overrides.
pub const PACE_FLOOR: f64 = 0.1;

/// Pace inference looks at the chronological tail of the log collection:
/// the last N entries, not the last N calendar days.
pub const PACE_WINDOW: usize = 7;

/// Hard ceiling on projected days. Past this the projection reports the
/// capped day rather than walking further.
const MAX_PROJECTION_DAYS: usize = 1000;

/// Per-call options. Unset fields fall back to the program config and the
/// real clock.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastOptions {
    /// Assumed hours per workday for the projection; inferred from recent
    /// logs when absent. Floored at [`PACE_FLOOR`].
    pub pace_override: Option<f64>,
    /// Override of the program start date.
    pub start_date: Option<DateKey>,
    /// Override of the program deadline.
    pub deadline_date: Option<DateKey>,
    /// Injectable "current moment" so results are deterministic under test;
    /// production callers leave this unset and get the real clock.
    pub today: Option<DateInput>,
}

impl ForecastOptions {
    pub fn with_today(today: impl Into<DateInput>) -> Self {
        Self {
            today: Some(today.into()),
            ..Default::default()
        }
    }
}

/// Immutable forecast snapshot, constructed fresh on every call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResult {
    pub total_actual_hours: qtty::Hours,
    /// Hours still to log; clamped at zero once the target is met.
    pub remaining_hours: qtty::Hours,
    /// Hours expected by now at exactly the daily target on every workday
    /// since the start, clamped to the overall target.
    pub ideal_hours_to_date: qtty::Hours,
    /// `total_actual_hours - ideal_hours_to_date`; positive means ahead.
    pub current_status_delta: qtty::Hours,
    pub work_days_remaining: u32,
    pub calendar_days_remaining: u32,
    /// Hours per workday needed to hit the target exactly on the deadline;
    /// zero when no workdays remain.
    pub required_rate: qtty::Hours,
    /// Hours per workday assumed by the projection.
    pub pace_used: qtty::Hours,
    pub is_ahead: bool,
    pub projected_date_key: DateKey,
    pub projected_date_label: String,
}

/// Resolve the effective "today" key: the injected override when present and
/// resolvable, the real clock otherwise.
pub(crate) fn resolve_today(today: &Option<DateInput>) -> DateKey {
    today
        .as_ref()
        .and_then(canonical_date)
        .unwrap_or_else(|| DateKey::from_instant(Utc::now()))
}

/// Mean of the last [`PACE_WINDOW`] entries, the daily target when no logs
/// exist, floored at [`PACE_FLOOR`]. `logs` must be sorted ascending.
pub(crate) fn select_pace(
    logs: &[NormalizedLog],
    pace_override: Option<f64>,
    daily_target: f64,
) -> f64 {
    if let Some(p) = pace_override {
        if p.is_finite() {
            return p.max(PACE_FLOOR);
        }
    }
    let inferred = if logs.is_empty() {
        daily_target
    } else {
        let tail = &logs[logs.len().saturating_sub(PACE_WINDOW)..];
        tail.iter().map(|l| l.hours).sum::<f64>() / tail.len() as f64
    };
    inferred.max(PACE_FLOOR)
}

/// Compute the forecast snapshot for a normalized, ascending-sorted log
/// collection.
pub fn compute_forecast(
    logs: &[NormalizedLog],
    config: &ProgramConfig,
    opts: &ForecastOptions,
) -> ForecastResult {
    let start = opts.start_date.clone().unwrap_or_else(|| config.start_date.clone());
    let deadline = opts
        .deadline_date
        .clone()
        .unwrap_or_else(|| config.deadline_date.clone());
    let today = resolve_today(&opts.today);
    let target = config.total_target_hours;
    let excluded = config.excluded_weekday;

    let total_actual_hours: f64 = logs.iter().map(|l| l.hours).sum();
    let remaining_hours = (target - total_actual_hours).max(0.0);

    let ideal_to_date = (count_workdays_between(&start, &today, excluded) as f64
        * config.daily_target_hours)
        .min(target);
    let current_status_delta = total_actual_hours - ideal_to_date;
    let is_ahead = total_actual_hours >= ideal_to_date;

    let work_days_remaining = match days_between(&today, &deadline) {
        Some(d) if d > 0 => {
            let day_after = today
                .to_naive()
                .and_then(|d| d.succ_opt())
                .map(DateKey::from_naive);
            day_after
                .map(|from| count_workdays_between(&from, &deadline, excluded))
                .unwrap_or(0)
        }
        _ => 0,
    };
    let calendar_days_remaining = days_between(&today, &deadline).unwrap_or(0).max(0) as u32;

    let required_rate = if work_days_remaining > 0 {
        remaining_hours / work_days_remaining as f64
    } else {
        0.0
    };

    let pace_used = select_pace(logs, opts.pace_override, config.daily_target_hours);

    // Projection walk. Seeded at the logged total; each workday stepped past
    // today adds one day of pace until the target is reached.
    let mut projected_day = today.to_naive();
    if let Some(start_day) = projected_day {
        if remaining_hours > 0.0 {
            let mut cursor = start_day;
            let mut running = total_actual_hours;
            for _ in 0..MAX_PROJECTION_DAYS {
                let Some(next) = cursor.succ_opt() else { break };
                cursor = next;
                if is_workday_date(cursor, excluded) {
                    running += pace_used;
                }
                if running >= target {
                    break;
                }
            }
            projected_day = Some(cursor);
        }
    }
    let projected_date_key = projected_day.map(DateKey::from_naive).unwrap_or_else(|| today.clone());
    let projected_date_label = projected_date_key.full_label();

    ForecastResult {
        total_actual_hours: qtty::Hours::new(total_actual_hours),
        remaining_hours: qtty::Hours::new(remaining_hours),
        ideal_hours_to_date: qtty::Hours::new(ideal_to_date),
        current_status_delta: qtty::Hours::new(current_status_delta),
        work_days_remaining,
        calendar_days_remaining,
        required_rate: qtty::Hours::new(required_rate),
        pace_used: qtty::Hours::new(pace_used),
        is_ahead,
        projected_date_key,
        projected_date_label,
    }
}
