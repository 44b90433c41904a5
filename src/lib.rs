//! # DTR Rust Engine
//!
//! Forecast and trajectory engine for a personal work-hour tracker.
//!
//! This crate is the deterministic core behind the tracker's summary panel,
//! dashboard charts, and pace slider. It normalizes heterogeneous date
//! inputs to one fixed UTC+8 calendar, classifies days as workdays, infers a
//! daily pace from recent history, and projects day by day when a cumulative
//! hour target will be met. Results are identical regardless of caller, host
//! timezone, or daylight-saving artifacts.
//!
//! ## Features
//!
//! - **Canonical dates**: every date-like input reduces to a `YYYY-MM-DD`
//!   key in the fixed UTC+8 frame before any arithmetic happens
//! - **Workday calendar**: one excluded weekday per week; day stepping,
//!   workday counting, and program week numbering
//! - **Forecasting**: totals, ideal-progress delta, required rate, and an
//!   iterative completion-date projection
//! - **Trajectory series**: aligned actual/projected/ideal cumulative
//!   channels ready for charting
//! - **Ingestion & config**: JSON log parsing and TOML program settings
//!
//! ## Architecture
//!
//! - [`api`]: consolidated public types
//! - [`models`]: canonical dates, the workday calendar, log entries
//! - [`services`]: forecast, trajectory, and weekly summary computations
//! - [`parsing`]: JSON ingestion boundary
//! - [`config`]: program constants and TOML overrides
//!
//! The engine performs no I/O and holds no mutable state between calls; the
//! current moment is injectable, so every computation is reproducible.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod parsing;
pub mod services;
