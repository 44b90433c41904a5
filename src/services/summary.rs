//! Weekly rollups of logged hours, keyed by program week.

use std::collections::{HashMap, HashSet};

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::config::ProgramConfig;
use crate::models::calendar::week_of;
use crate::models::log::NormalizedLog;
use crate::models::time::DateKey;

/// One program week's logged totals. Weeks with no logs are omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySummary {
    /// 1-based program week (the start date opens week 1).
    pub week: u32,
    pub start_key: DateKey,
    pub end_key: DateKey,
    pub total_hours: qtty::Hours,
    /// Distinct days with at least one entry this week.
    pub days_logged: usize,
}

/// Group normalized logs by program week, totaling hours and counting
/// distinct logged days. Entries dated before the program start clamp into
/// week 1. Output is ascending by week.
pub fn compute_weekly_summary(
    logs: &[NormalizedLog],
    config: &ProgramConfig,
) -> Vec<WeeklySummary> {
    let mut weeks: HashMap<u32, (f64, HashSet<&DateKey>)> = HashMap::new();
    for log in logs {
        let week = week_of(&config.start_date, &log.date_key);
        let entry = weeks.entry(week).or_insert_with(|| (0.0, HashSet::new()));
        entry.0 += log.hours;
        entry.1.insert(&log.date_key);
    }

    let mut summaries: Vec<WeeklySummary> = weeks
        .into_iter()
        .map(|(week, (total, days))| {
            let (start_key, end_key) = week_span(&config.start_date, week);
            WeeklySummary {
                week,
                start_key,
                end_key,
                total_hours: qtty::Hours::new(total),
                days_logged: days.len(),
            }
        })
        .collect();
    summaries.sort_by_key(|s| s.week);
    summaries
}

fn week_span(program_start: &DateKey, week: u32) -> (DateKey, DateKey) {
    match program_start.to_naive() {
        Some(start) => {
            let first = start + Duration::days((week as i64 - 1) * 7);
            let last = first + Duration::days(6);
            (DateKey::from_naive(first), DateKey::from_naive(last))
        }
        None => (program_start.clone(), program_start.clone()),
    }
}
