//! Console time handling
//!
//! Timestamps are stored in UTC and rendered in the operations timezone
//! (Asia/Kolkata) using the console's display formats:
//!
//! ```text
//! 12:04 PM | Dec 05, 2025     stage timestamps
//! Dec 05, 2025                claim dates
//! 4 November, 2024 - 2 November, 2025   policy periods
//! 2 days 5 hours              SLA breach windows
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Timezone the handlers work in
pub const CONSOLE_TIMEZONE: Tz = chrono_tz::Asia::Kolkata;

const TIMESTAMP_FORMAT: &str = "%-I:%M %p | %b %d, %Y";
const TIMESTAMP_PARSE_FORMAT: &str = "%I:%M %p | %b %d, %Y";
const DATE_FORMAT: &str = "%b %d, %Y";
const PERIOD_DATE_FORMAT: &str = "%-d %B, %Y";

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod { start: String, end: String },

    #[error("Invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("Local time '{0}' does not map to a single instant")]
    AmbiguousLocalTime(String),

    #[error("Invalid breach window '{0}'")]
    InvalidBreachWindow(String),
}

/// Formats a UTC instant as a console stage timestamp, e.g. `12:04 PM | Dec 05, 2025`
pub fn format_console_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&CONSOLE_TIMEZONE)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Parses a console stage timestamp (interpreted in [`CONSOLE_TIMEZONE`])
pub fn parse_console_timestamp(value: &str) -> Result<DateTime<Utc>, TemporalError> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_PARSE_FORMAT)
        .map_err(|_| TemporalError::InvalidTimestamp(value.to_string()))?;
    CONSOLE_TIMEZONE
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| TemporalError::AmbiguousLocalTime(value.to_string()))
}

/// Formats a date the way claim lists show it, e.g. `Dec 05, 2025`
pub fn format_console_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a claim list date such as `Dec 05, 2025`
pub fn parse_console_date(value: &str) -> Result<NaiveDate, TemporalError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| TemporalError::InvalidTimestamp(value.to_string()))
}

/// Today's date in the console timezone
pub fn console_today() -> NaiveDate {
    Utc::now().with_timezone(&CONSOLE_TIMEZONE).date_naive()
}

/// The period a policy is in force, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PolicyPeriod {
    /// Creates a period, rejecting an end date before the start date
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if end < start {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Checks whether the date falls within the period
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for PolicyPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format(PERIOD_DATE_FORMAT),
            self.end.format(PERIOD_DATE_FORMAT)
        )
    }
}

/// Time left before a claim breaches its service-level target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BreachWindow {
    /// Claim is closed, no SLA applies
    NotApplicable,
    /// Target already missed
    Overdue,
    /// Time remaining
    Remaining { days: u32, hours: u32 },
}

impl BreachWindow {
    /// Returns true when the SLA has been missed
    pub fn is_overdue(&self) -> bool {
        matches!(self, BreachWindow::Overdue)
    }
}

impl fmt::Display for BreachWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn unit(n: u32, singular: &str) -> String {
            if n == 1 {
                format!("{} {}", n, singular)
            } else {
                format!("{} {}s", n, singular)
            }
        }

        match self {
            BreachWindow::NotApplicable => f.write_str("-"),
            BreachWindow::Overdue => f.write_str("Overdue"),
            BreachWindow::Remaining { days, hours } => {
                write!(f, "{} {}", unit(*days, "day"), unit(*hours, "hour"))
            }
        }
    }
}

impl FromStr for BreachWindow {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed {
            "-" => return Ok(BreachWindow::NotApplicable),
            "Overdue" => return Ok(BreachWindow::Overdue),
            _ => {}
        }

        let invalid = || TemporalError::InvalidBreachWindow(trimmed.to_string());
        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        match parts.as_slice() {
            [days, day_unit, hours, hour_unit]
                if day_unit.starts_with("day") && hour_unit.starts_with("hour") =>
            {
                Ok(BreachWindow::Remaining {
                    days: days.parse().map_err(|_| invalid())?,
                    hours: hours.parse().map_err(|_| invalid())?,
                })
            }
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_round_trip_in_console_zone() {
        let parsed = parse_console_timestamp("12:04 PM | Dec 05, 2025").unwrap();
        // 12:04 IST is 06:34 UTC
        assert_eq!(parsed.to_rfc3339(), "2025-12-05T06:34:00+00:00");
        assert_eq!(format_console_timestamp(parsed), "12:04 PM | Dec 05, 2025");
    }

    #[test]
    fn test_single_digit_hour() {
        let parsed = parse_console_timestamp("7:38 PM | Dec 06, 2025").unwrap();
        assert_eq!(format_console_timestamp(parsed), "7:38 PM | Dec 06, 2025");
    }

    #[test]
    fn test_policy_period_display() {
        let period = PolicyPeriod::new(
            NaiveDate::from_ymd_opt(2024, 11, 4).unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 2).unwrap(),
        )
        .unwrap();
        assert_eq!(period.to_string(), "4 November, 2024 - 2 November, 2025");
    }

    #[test]
    fn test_breach_window_parsing() {
        assert_eq!(
            "1 day 3 hours".parse::<BreachWindow>().unwrap(),
            BreachWindow::Remaining { days: 1, hours: 3 }
        );
        assert_eq!("-".parse::<BreachWindow>().unwrap(), BreachWindow::NotApplicable);
        assert!("soon".parse::<BreachWindow>().is_err());
    }
}
