//! Public API surface for the forecast engine.
//!
//! This file consolidates the types host applications consume. All types
//! derive Serialize/Deserialize so snapshots can be handed to UI layers
//! as JSON unchanged.

pub use crate::config::ProgramConfig;
pub use crate::error::{EngineError, EngineResult};
pub use crate::models::calendar::{
    count_workdays, days_between, is_workday, step_day, week_of, weekday_of,
};
pub use crate::models::log::{normalize_logs, NormalizedLog, RawLogEntry};
pub use crate::models::time::{canonical_date, DateInput, DateKey};
pub use crate::services::forecast::{compute_forecast, ForecastOptions, ForecastResult};
pub use crate::services::summary::{compute_weekly_summary, WeeklySummary};
pub use crate::services::trajectory::{build_series, TrajectorySeries};
