//! Computation services over normalized log collections.
//!
//! Each service is a pure function of its explicit inputs: the log
//! collection, the program config, and per-call options carrying the
//! injectable "current moment".

pub mod forecast;

pub mod summary;

pub mod trajectory;

pub use forecast::{compute_forecast, ForecastOptions, ForecastResult};
pub use summary::{compute_weekly_summary, WeeklySummary};
pub use trajectory::{build_series, TrajectorySeries};
