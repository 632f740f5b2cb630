// ABOUTME: Typed tool requests parsed and validated from MCP tools/call arguments
// ABOUTME: Rejects unknown tools, malformed dates and out-of-range trend windows before any fetch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Number, Value};
use wellness_core::constants::trend;
use wellness_core::errors::{AppError, AppResult};
use wellness_core::models::DateWindow;

use crate::constants::tools;

/// Validated date-window arguments shared by the report tools
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowQuery {
    /// Parsed inclusive window
    pub window: DateWindow,
    /// Optional user id; resolved from the profile when absent
    pub user_id: Option<i64>,
}

/// Metric analyzed by `analyze_health_trends`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendMetric {
    /// Recovery scores
    Recovery,
    /// Sleep sessions
    Sleep,
    /// Day strain of cycles
    Strain,
}

impl TrendMetric {
    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recovery => "recovery",
            Self::Sleep => "sleep",
            Self::Strain => "strain",
        }
    }
}

impl fmt::Display for TrendMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrendMetric {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recovery" => Ok(Self::Recovery),
            "sleep" => Ok(Self::Sleep),
            "strain" => Ok(Self::Strain),
            other => Err(AppError::invalid_input(format!(
                "Unsupported metric: {other}"
            ))),
        }
    }
}

/// Validated `analyze_health_trends` arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendQuery {
    /// Metric to analyze
    pub metric: TrendMetric,
    /// Trailing days, within `[7, 90]`
    pub days: u32,
    /// Optional user id
    pub user_id: Option<i64>,
}

/// A tool invocation after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolRequest {
    /// `get_health_summary`
    HealthSummary(WindowQuery),
    /// `analyze_stress_indicators`
    StressIndicators(WindowQuery),
    /// `analyze_sleep_patterns`
    SleepPatterns(WindowQuery),
    /// `analyze_activity_patterns`
    ActivityPatterns(WindowQuery),
    /// `analyze_health_trends`
    HealthTrends(TrendQuery),
}

#[derive(Debug, Deserialize)]
struct WindowArgs {
    start_date: Option<String>,
    end_date: Option<String>,
    user_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct TrendArgs {
    metric: Option<String>,
    days: Option<Number>,
    user_id: Option<i64>,
}

impl ToolRequest {
    /// Parse and validate the arguments of a `tools/call`.
    ///
    /// Missing arguments are treated as an empty object.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an unknown tool, wrongly typed arguments,
    /// a malformed date, an end before the start, an unsupported metric or
    /// `days` outside `[7, 90]`; `MissingRequiredField` when a required
    /// argument is absent.
    pub fn parse(name: &str, arguments: Option<Value>) -> AppResult<Self> {
        let arguments = arguments.unwrap_or_else(|| Value::Object(Map::new()));
        match name {
            tools::GET_HEALTH_SUMMARY => Ok(Self::HealthSummary(window_query(name, arguments)?)),
            tools::ANALYZE_STRESS_INDICATORS => {
                Ok(Self::StressIndicators(window_query(name, arguments)?))
            }
            tools::ANALYZE_SLEEP_PATTERNS => {
                Ok(Self::SleepPatterns(window_query(name, arguments)?))
            }
            tools::ANALYZE_ACTIVITY_PATTERNS => {
                Ok(Self::ActivityPatterns(window_query(name, arguments)?))
            }
            tools::ANALYZE_HEALTH_TRENDS => Ok(Self::HealthTrends(trend_query(name, arguments)?)),
            other => Err(AppError::invalid_input(format!("Unknown tool: {other}"))),
        }
    }

    /// Tool name this request was parsed from
    #[must_use]
    pub const fn tool_name(&self) -> &'static str {
        match self {
            Self::HealthSummary(_) => tools::GET_HEALTH_SUMMARY,
            Self::StressIndicators(_) => tools::ANALYZE_STRESS_INDICATORS,
            Self::SleepPatterns(_) => tools::ANALYZE_SLEEP_PATTERNS,
            Self::ActivityPatterns(_) => tools::ANALYZE_ACTIVITY_PATTERNS,
            Self::HealthTrends(_) => tools::ANALYZE_HEALTH_TRENDS,
        }
    }
}

fn decode<T: DeserializeOwned>(tool: &str, arguments: Value) -> AppResult<T> {
    serde_json::from_value(arguments)
        .map_err(|e| AppError::invalid_input(format!("Invalid arguments for {tool}: {e}")))
}

fn window_query(tool: &str, arguments: Value) -> AppResult<WindowQuery> {
    let args: WindowArgs = decode(tool, arguments)?;
    let start_date = args
        .start_date
        .ok_or_else(|| AppError::missing_field("start_date"))?;
    let end_date = args
        .end_date
        .ok_or_else(|| AppError::missing_field("end_date"))?;

    Ok(WindowQuery {
        window: DateWindow::from_iso_dates(&start_date, &end_date)?,
        user_id: args.user_id,
    })
}

fn trend_query(tool: &str, arguments: Value) -> AppResult<TrendQuery> {
    let args: TrendArgs = decode(tool, arguments)?;
    let metric = args
        .metric
        .ok_or_else(|| AppError::missing_field("metric"))?
        .parse()?;

    let days = match args.days {
        None => trend::DEFAULT_DAYS,
        Some(days) => whole_number(&days)
            .and_then(|d| u32::try_from(d).ok())
            .filter(|d| (trend::MIN_DAYS..=trend::MAX_DAYS).contains(d))
            .ok_or_else(|| {
                AppError::invalid_input(format!(
                    "days must be between {} and {}, got {days}",
                    trend::MIN_DAYS,
                    trend::MAX_DAYS
                ))
            })?,
    };

    Ok(TrendQuery {
        metric,
        days,
        user_id: args.user_id,
    })
}

/// Integer value of a JSON number, accepting floats with no fractional part
#[allow(clippy::cast_possible_truncation)] // magnitude checked against u32::MAX first
fn whole_number(number: &Number) -> Option<i64> {
    if let Some(value) = number.as_i64() {
        return Some(value);
    }
    let value = number.as_f64()?;
    (value.fract().abs() < f64::EPSILON && value.abs() <= f64::from(u32::MAX))
        .then_some(value as i64)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use serde_json::json;
    use wellness_core::errors::ErrorCode;

    use super::*;

    #[test]
    fn test_window_tools_parse_dates() {
        let request = ToolRequest::parse(
            "analyze_sleep_patterns",
            Some(json!({"start_date": "2025-03-01", "end_date": "2025-03-14", "user_id": 7})),
        )
        .unwrap();

        let ToolRequest::SleepPatterns(query) = &request else {
            panic!("expected sleep request, got {request:?}");
        };
        assert_eq!(query.window.start_date(), "2025-03-01");
        assert_eq!(query.window.end_date(), "2025-03-14");
        assert_eq!(query.user_id, Some(7));
    }

    #[test]
    fn test_missing_dates_are_reported_by_name() {
        let err = ToolRequest::parse("get_health_summary", None).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingRequiredField);
        assert!(err.message.contains("start_date"));

        let err = ToolRequest::parse(
            "get_health_summary",
            Some(json!({"start_date": "2025-03-01"})),
        )
        .unwrap_err();
        assert!(err.message.contains("end_date"));
    }

    #[test]
    fn test_bad_dates_are_invalid_input() {
        for args in [
            json!({"start_date": "03/01/2025", "end_date": "2025-03-14"}),
            json!({"start_date": "2025-03-14", "end_date": "2025-03-01"}),
            json!({"start_date": 20_250_301, "end_date": "2025-03-14"}),
        ] {
            let err = ToolRequest::parse("analyze_stress_indicators", Some(args)).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidInput);
        }
    }

    #[test]
    fn test_trend_days_default_and_bounds() {
        let request =
            ToolRequest::parse("analyze_health_trends", Some(json!({"metric": "strain"}))).unwrap();
        assert_eq!(
            request,
            ToolRequest::HealthTrends(TrendQuery {
                metric: TrendMetric::Strain,
                days: 14,
                user_id: None,
            })
        );

        for days in [7_u32, 90] {
            let request = ToolRequest::parse(
                "analyze_health_trends",
                Some(json!({"metric": "recovery", "days": days})),
            )
            .unwrap();
            assert!(matches!(request, ToolRequest::HealthTrends(TrendQuery { days: d, .. }) if d == days));
        }

        for days in [0, 6, 91, -1] {
            let err = ToolRequest::parse(
                "analyze_health_trends",
                Some(json!({"metric": "recovery", "days": days})),
            )
            .unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidInput, "days={days}");
        }
    }

    #[test]
    fn test_trend_days_accepts_whole_floats() {
        let request = ToolRequest::parse(
            "analyze_health_trends",
            Some(json!({"metric": "recovery", "days": 14.0})),
        )
        .unwrap();
        assert!(matches!(request, ToolRequest::HealthTrends(TrendQuery { days: 14, .. })));

        for days in [json!(14.5), json!(6.0), json!("14")] {
            let err = ToolRequest::parse(
                "analyze_health_trends",
                Some(json!({"metric": "recovery", "days": days})),
            )
            .unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidInput, "days={days}");
        }
        let err = ToolRequest::parse(
            "analyze_health_trends",
            Some(json!({"metric": "sleep", "days": 14.5})),
        )
        .unwrap_err();
        assert_eq!(err.message, "days must be between 7 and 90, got 14.5");
    }

    #[test]
    fn test_unsupported_metric_and_unknown_tool() {
        let err = ToolRequest::parse("analyze_health_trends", Some(json!({"metric": "hrv"})))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.message, "Unsupported metric: hrv");

        let err = ToolRequest::parse("setup_whoop_auth", None).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.message, "Unknown tool: setup_whoop_auth");
    }
}
