//! Per-day trajectory series for charting: actual, projected, and ideal
//! cumulative hours over the full tracking period.
//!
//! The three channels are aligned index-for-index over every calendar day
//! from start to deadline, so a chart can draw a solid actual line, a dashed
//! projection picking up exactly where the actual line ends, and a flat ideal
//! reference, with no client-side stitching.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::config::ProgramConfig;
use crate::models::calendar::is_workday_date;
use crate::models::log::NormalizedLog;
use crate::models::time::DateKey;
use crate::services::forecast::{compute_forecast, resolve_today, ForecastOptions, ForecastResult};

/// Chart-ready series. All per-day vectors share one length: the number of
/// calendar days from start to deadline inclusive. At each index exactly one
/// of `actual_cumulative` / `projected_cumulative` is `Some`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajectorySeries {
    pub labels: Vec<String>,
    pub label_date_keys: Vec<DateKey>,
    pub actual_cumulative: Vec<Option<f64>>,
    pub projected_cumulative: Vec<Option<f64>>,
    pub ideal_cumulative: Vec<f64>,
    pub forecast: ForecastResult,
}

/// Build the full start→deadline series in a single forward pass, reusing
/// the forecast once for pace and scalars.
///
/// The projection starts after the **transition day**: the later of today and
/// the last logged day, so logs recorded ahead of today extend the actual
/// line before the dashed projection begins.
pub fn build_series(
    logs: &[NormalizedLog],
    config: &ProgramConfig,
    opts: &ForecastOptions,
) -> TrajectorySeries {
    let forecast = compute_forecast(logs, config, opts);
    let pace = forecast.pace_used.value();
    let target = config.total_target_hours;
    let excluded = config.excluded_weekday;

    let start = opts.start_date.clone().unwrap_or_else(|| config.start_date.clone());
    let deadline = opts
        .deadline_date
        .clone()
        .unwrap_or_else(|| config.deadline_date.clone());
    let today = resolve_today(&opts.today);

    let transition = match logs.last() {
        Some(last) if last.date_key > today => last.date_key.clone(),
        _ => today,
    };

    let mut hours_by_day: HashMap<DateKey, f64> = HashMap::new();
    for log in logs {
        *hours_by_day.entry(log.date_key.clone()).or_insert(0.0) += log.hours;
    }

    let mut series = TrajectorySeries {
        labels: Vec::new(),
        label_date_keys: Vec::new(),
        actual_cumulative: Vec::new(),
        projected_cumulative: Vec::new(),
        ideal_cumulative: Vec::new(),
        forecast,
    };

    let (Some(start_day), Some(last_day)) = (start.to_naive(), deadline.to_naive()) else {
        return series;
    };

    let mut actual_sum = 0.0;
    let mut projected_sum = 0.0;
    let mut projection_started = false;
    let mut ideal_sum = 0.0;

    let mut day = start_day;
    while day <= last_day {
        let key = DateKey::from_naive(day);
        series.labels.push(key.month_day_label());

        if key <= transition {
            if let Some(hours) = hours_by_day.get(&key) {
                actual_sum += hours;
            }
            series.actual_cumulative.push(Some(actual_sum));
            series.projected_cumulative.push(None);
        } else {
            if !projection_started {
                projected_sum = actual_sum;
                projection_started = true;
            }
            if is_workday_date(day, excluded) {
                projected_sum += pace;
            }
            series.actual_cumulative.push(None);
            // Rounded to whole hours so the dashed line stays visually stable.
            series.projected_cumulative.push(Some(projected_sum.round()));
        }

        if is_workday_date(day, excluded) {
            ideal_sum = (ideal_sum + config.daily_target_hours).min(target);
        }
        series.ideal_cumulative.push(ideal_sum);
        series.label_date_keys.push(key);

        let Some(next) = day.succ_opt() else { break };
        day = next;
    }

    series
}
