//! Program configuration: tracking period, hour targets, excluded weekday.
//!
//! Defaults are the fixed program constants; every field can be overridden
//! from a TOML file (`program.toml`).

use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::time::DateKey;

mod weekday_serde {
    use super::*;
    use serde::{de::Error, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&day.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let text = String::deserialize(deserializer)?;
        Weekday::from_str(&text)
            .map_err(|_| D::Error::custom(format!("unrecognized weekday: {:?}", text)))
    }
}

/// Tracking program settings consumed by every engine call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramConfig {
    /// First day of the tracking period.
    #[serde(default = "default_start_date")]
    pub start_date: DateKey,
    /// Last day of the tracking period.
    #[serde(default = "default_deadline_date")]
    pub deadline_date: DateKey,
    /// Cumulative hour target for the whole period.
    #[serde(default = "default_total_target_hours")]
    pub total_target_hours: f64,
    /// Expected hours per workday.
    #[serde(default = "default_daily_target_hours")]
    pub daily_target_hours: f64,
    /// The one weekday per week that does not count as a workday.
    #[serde(default = "default_excluded_weekday", with = "weekday_serde")]
    pub excluded_weekday: Weekday,
}

fn default_start_date() -> DateKey {
    DateKey::parse("2025-06-02").unwrap()
}

fn default_deadline_date() -> DateKey {
    DateKey::parse("2025-08-15").unwrap()
}

fn default_total_target_hours() -> f64 {
    486.0
}

fn default_daily_target_hours() -> f64 {
    8.0
}

fn default_excluded_weekday() -> Weekday {
    Weekday::Sun
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            start_date: default_start_date(),
            deadline_date: default_deadline_date(),
            total_target_hours: default_total_target_hours(),
            daily_target_hours: default_daily_target_hours(),
            excluded_weekday: default_excluded_weekday(),
        }
    }
}

impl ProgramConfig {
    /// Parse configuration from TOML text. Missing fields take the program
    /// defaults; start/deadline must be real `YYYY-MM-DD` dates.
    pub fn from_toml_str(content: &str) -> EngineResult<Self> {
        let config: ProgramConfig = toml::from_str(content)
            .map_err(|e| EngineError::ConfigurationError(format!("Failed to parse config: {}", e)))?;
        config.validated()
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            EngineError::ConfigurationError(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject unusable dates; repair recoverable oddities with a warning so
    /// callers always end up with a config the engine can run on.
    fn validated(mut self) -> EngineResult<Self> {
        if self.start_date.to_naive().is_none() {
            return Err(EngineError::ValidationError(format!(
                "start_date {:?} is not a valid YYYY-MM-DD date",
                self.start_date.as_str()
            )));
        }
        if self.deadline_date.to_naive().is_none() {
            return Err(EngineError::ValidationError(format!(
                "deadline_date {:?} is not a valid YYYY-MM-DD date",
                self.deadline_date.as_str()
            )));
        }
        if self.deadline_date < self.start_date {
            log::warn!(
                "deadline_date {} precedes start_date {}; clamping deadline to start",
                self.deadline_date,
                self.start_date
            );
            self.deadline_date = self.start_date.clone();
        }
        if !self.total_target_hours.is_finite() || self.total_target_hours <= 0.0 {
            log::warn!(
                "total_target_hours {} is unusable; falling back to {}",
                self.total_target_hours,
                default_total_target_hours()
            );
            self.total_target_hours = default_total_target_hours();
        }
        if !self.daily_target_hours.is_finite() || self.daily_target_hours <= 0.0 {
            log::warn!(
                "daily_target_hours {} is unusable; falling back to {}",
                self.daily_target_hours,
                default_daily_target_hours()
            );
            self.daily_target_hours = default_daily_target_hours();
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config = ProgramConfig::from_toml_str("").unwrap();
        assert_eq!(config.start_date.as_str(), "2025-06-02");
        assert_eq!(config.deadline_date.as_str(), "2025-08-15");
        assert_eq!(config.total_target_hours, 486.0);
        assert_eq!(config.daily_target_hours, 8.0);
        assert_eq!(config.excluded_weekday, Weekday::Sun);
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let toml = r#"
start_date = "2025-01-06"
deadline_date = "2025-03-28"
total_target_hours = 320.0
daily_target_hours = 6.0
excluded_weekday = "saturday"
"#;
        let config = ProgramConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.start_date.as_str(), "2025-01-06");
        assert_eq!(config.deadline_date.as_str(), "2025-03-28");
        assert_eq!(config.total_target_hours, 320.0);
        assert_eq!(config.daily_target_hours, 6.0);
        assert_eq!(config.excluded_weekday, Weekday::Sat);
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let result = ProgramConfig::from_toml_str(r#"start_date = "June 2""#);
        assert!(matches!(result, Err(EngineError::ValidationError(_))));
    }

    #[test]
    fn test_inverted_period_clamps_deadline() {
        let toml = r#"
start_date = "2025-06-02"
deadline_date = "2025-05-01"
"#;
        let config = ProgramConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.deadline_date, config.start_date);
    }

    #[test]
    fn test_nonpositive_targets_fall_back() {
        let config = ProgramConfig::from_toml_str("total_target_hours = -10.0").unwrap();
        assert_eq!(config.total_target_hours, 486.0);
    }

    #[test]
    fn test_unrecognized_weekday_is_a_parse_error() {
        let result = ProgramConfig::from_toml_str(r#"excluded_weekday = "restday""#);
        assert!(matches!(result, Err(EngineError::ConfigurationError(_))));
    }
}
