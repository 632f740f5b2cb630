// ABOUTME: Inclusive date window used to scope every fetch and analysis request
// ABOUTME: Parses ISO calendar dates and widens same-day windows to end of day
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Calendar date format accepted on inbound requests
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive `[start, end]` range of UTC instants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateWindow {
    /// Build a window from two instants.
    ///
    /// When both fall on the same calendar day the end is moved to 23:59:59
    /// so same-day queries are not empty.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `end` is before `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<Self> {
        if end < start {
            return Err(AppError::invalid_input(format!(
                "end ({}) is before start ({})",
                end.date_naive(),
                start.date_naive()
            )));
        }
        let end = if start.date_naive() == end.date_naive() {
            end_of_day(end.date_naive())
        } else {
            end
        };
        Ok(Self { start, end })
    }

    /// Parse `YYYY-MM-DD` start and end dates.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed date or an end before start.
    pub fn from_iso_dates(start_date: &str, end_date: &str) -> AppResult<Self> {
        let start = parse_iso_date("start_date", start_date)?;
        let end = parse_iso_date("end_date", end_date)?;
        Self::new(start_of_day(start), start_of_day(end))
    }

    /// Window covering the `days` before `now`
    #[must_use]
    pub fn trailing_days(days: u32, now: DateTime<Utc>) -> Self {
        Self {
            start: now - Duration::days(i64::from(days)),
            end: now,
        }
    }

    /// Window start
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Window end (inclusive)
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Start date as `YYYY-MM-DD`
    #[must_use]
    pub fn start_date(&self) -> String {
        self.start.format(ISO_DATE_FORMAT).to_string()
    }

    /// End date as `YYYY-MM-DD`
    #[must_use]
    pub fn end_date(&self) -> String {
        self.end.format(ISO_DATE_FORMAT).to_string()
    }
}

fn parse_iso_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT).map_err(|e| {
        AppError::invalid_input(format!(
            "{field} must be a YYYY-MM-DD date, got '{value}': {e}"
        ))
    })
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    date.and_time(last_second).and_utc()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use chrono::TimeZone;

    #[test]
    fn test_same_day_window_extends_to_end_of_day() {
        let window = DateWindow::from_iso_dates("2025-03-01", "2025-03-01").unwrap();
        assert_eq!(
            window.start(),
            Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            window.end(),
            Utc.with_ymd_and_hms(2025, 3, 1, 23, 59, 59).unwrap()
        );
    }

    #[test]
    fn test_multi_day_window_is_kept() {
        let window = DateWindow::from_iso_dates("2025-03-01", "2025-03-08").unwrap();
        assert_eq!(
            window.end(),
            Utc.with_ymd_and_hms(2025, 3, 8, 0, 0, 0).unwrap()
        );
        assert_eq!(window.start_date(), "2025-03-01");
        assert_eq!(window.end_date(), "2025-03-08");
    }

    #[test]
    fn test_rejects_end_before_start() {
        let err = DateWindow::from_iso_dates("2025-03-08", "2025-03-01").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_rejects_malformed_dates() {
        for bad in ["2025/03/01", "yesterday", "2025-13-01", ""] {
            let err = DateWindow::from_iso_dates(bad, "2025-03-01").unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidInput, "{bad}");
        }
    }

    #[test]
    fn test_trailing_days() {
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap();
        let window = DateWindow::trailing_days(14, now);
        assert_eq!(window.start(), Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap());
        assert_eq!(window.end(), now);
    }
}
