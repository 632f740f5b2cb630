// ABOUTME: Markdown report rendering for health summaries and per-domain analyses
// ABOUTME: Turns structured summaries into the therapy-oriented text returned by MCP tools
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Report formatting
//!
//! Every tool answers with Markdown text. Resources answer with pretty JSON
//! through [`format_json`]. Summary fields that are absent for an empty
//! window render as zero.

use std::fmt::Write;

use serde::Serialize;
use wellness_core::errors::AppResult;
use wellness_core::models::{
    ActivityPatterns, DateWindow, HealthSummary, InsightSeverity, RecoveryTrend, SleepAnalysis,
    StrainPattern, StrainTrend, StressIndicators,
};
use wellness_intelligence::narrative;

/// Serialize a resource body as indented JSON
///
/// # Errors
///
/// Returns `SerializationError` if the value cannot be serialized
pub fn format_json<T: Serialize>(value: &T) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Full therapy-session summary
#[must_use]
pub fn format_health_summary(summary: &HealthSummary) -> String {
    let mut output = String::from("# Health Summary for Therapy Session\n\n");
    let _ = writeln!(
        output,
        "**Analysis Period:** {} to {}\n",
        summary.date_range.start_date(),
        summary.date_range.end_date()
    );

    let recovery = &summary.recovery_trend;
    output.push_str("## Recovery Trends\n");
    let _ = writeln!(
        output,
        "- **Average Score:** {:.1}% ({} trend)",
        recovery.average_score.unwrap_or_default(),
        recovery.trend
    );
    let _ = writeln!(
        output,
        "- **Consistency:** {:.1}% (higher is better)",
        percent(recovery.consistency_score)
    );
    if let Some(change) = recovery.weekly_change.filter(|c| c.abs() > f64::EPSILON) {
        let _ = writeln!(output, "- **Recent Change:** {change:.1} points");
    }
    output.push('\n');

    let sleep = &summary.sleep_analysis;
    output.push_str("## Sleep Analysis\n");
    let _ = writeln!(
        output,
        "- **Average Duration:** {:.1} hours",
        sleep.average_hours.unwrap_or_default()
    );
    let _ = writeln!(
        output,
        "- **Sleep Efficiency:** {:.1}%",
        percent(sleep.average_efficiency)
    );
    let _ = writeln!(
        output,
        "- **Sleep Debt:** {:.1} hours",
        sleep.average_debt.unwrap_or_default()
    );
    let _ = writeln!(output, "- **Quality Trend:** {}\n", sleep.sleep_quality_trend);

    let stress = &summary.stress_indicators;
    output.push_str("## Stress Indicators\n");
    let _ = writeln!(output, "- **Stress Level:** {}", stress.stress_level);
    if stress.poor_recovery_streak > 0 {
        let _ = writeln!(
            output,
            "- **Poor Recovery Streak:** {} days",
            stress.poor_recovery_streak
        );
    }
    output.push('\n');

    let activity = &summary.activity_patterns;
    output.push_str("## Activity Patterns\n");
    let _ = writeln!(output, "- **Weekly Workouts:** {}", activity.weekly_workouts);
    let _ = writeln!(output, "- **Average Strain:** {:.1}", activity.average_strain);
    let _ = writeln!(
        output,
        "- **Overtraining Risk:** {}\n",
        activity.overtraining_risk
    );

    if !summary.red_flags.is_empty() {
        output.push_str("## ⚠️ Red Flags Requiring Attention\n");
        for flag in &summary.red_flags {
            let _ = writeln!(
                output,
                "- **{}** ({}): {}",
                flag.kind.title(),
                flag.severity,
                flag.description
            );
            let _ = writeln!(output, "  *Recommendation:* {}", flag.recommendation);
        }
        output.push('\n');
    }

    if !summary.therapy_insights.is_empty() {
        output.push_str("## 💡 Therapy Discussion Points\n");
        for insight in &summary.therapy_insights {
            let _ = writeln!(
                output,
                "- {}**{}**: {}",
                severity_marker(insight.severity),
                capitalize(insight.category.as_str()),
                insight.insight
            );
            if let Some(suggestion) = &insight.suggestion {
                let _ = writeln!(output, "  *Suggestion:* {suggestion}");
            }
        }
    }

    output
}

/// Physiological stress report
#[must_use]
pub fn format_stress_report(window: &DateWindow, stress: &StressIndicators) -> String {
    format!(
        "# Stress Analysis Report\n\n\
         **Analysis Period:** {} to {}\n\n\
         ## Physiological Stress Indicators\n\n\
         - **Overall Stress Level:** {}\n\
         - **Physiological Stress Score:** {:.1}/100\n\
         - **Days with Elevated HRV:** {}\n\
         - **Days with High Resting HR:** {}\n\
         - **Poor Recovery Streak:** {} days\n\n\
         ## Interpretation\n\n\
         The physiological stress score combines multiple biomarkers including heart rate \
         variability patterns, resting heart rate elevations, and recovery consistency.\n\n\
         **Stress Level Definitions:**\n\
         - **Low (0-30):** Normal physiological stress response\n\
         - **Moderate (30-50):** Elevated stress requiring attention\n\
         - **High (50-70):** Significant stress impacting recovery\n\
         - **Critical (70+):** Severe stress requiring immediate intervention\n\n\
         ## Therapeutic Considerations\n\n\
         {}\n\n\
         *Note: This analysis is based on physiological markers and should be combined with \
         psychological assessment for comprehensive evaluation.*",
        window.start_date(),
        window.end_date(),
        stress.stress_level,
        stress.physiological_stress,
        stress.elevated_hrv_days,
        stress.high_resting_hr_days,
        stress.poor_recovery_streak,
        narrative::stress_recommendations(stress),
    )
}

/// Sleep pattern report
#[must_use]
pub fn format_sleep_report(window: &DateWindow, sessions: usize, analysis: &SleepAnalysis) -> String {
    format!(
        "# Sleep Pattern Analysis\n\n\
         **Analysis Period:** {} to {}\n\
         **Total Sleep Sessions:** {sessions}\n\n\
         ## Sleep Metrics\n\n\
         - **Average Duration:** {:.1} hours\n\
         - **Sleep Efficiency:** {:.1}%\n\
         - **Average Sleep Debt:** {:.1} hours\n\
         - **Sleep Consistency Score:** {:.1}%\n\
         - **Average Disturbances:** {:.1} per night\n\
         - **Quality Trend:** {}\n\n\
         ## Mental Health Implications\n\n\
         {}\n\n\
         ## Recommendations\n\n\
         {}",
        window.start_date(),
        window.end_date(),
        analysis.average_hours.unwrap_or_default(),
        percent(analysis.average_efficiency),
        analysis.average_debt.unwrap_or_default(),
        percent(analysis.consistency_score),
        analysis.disturbance_frequency.unwrap_or_default(),
        analysis.sleep_quality_trend,
        narrative::sleep_mental_health_implications(analysis),
        narrative::sleep_recommendations(analysis),
    )
}

/// Activity pattern report
#[must_use]
pub fn format_activity_report(
    window: &DateWindow,
    workouts: usize,
    patterns: &ActivityPatterns,
) -> String {
    format!(
        "# Activity Pattern Analysis\n\n\
         **Analysis Period:** {} to {}\n\
         **Total Workouts:** {workouts}\n\n\
         ## Activity Metrics\n\n\
         - **Weekly Workout Frequency:** {} sessions\n\
         - **Average Strain:** {:.1}\n\
         - **Workout Consistency:** {:.1}%\n\
         - **Overtraining Risk:** {}\n\
         - **Active Recovery Days:** {}\n\
         - **Intensity Balance:** {}\n\n\
         ## Behavioral Health Insights\n\n\
         {}",
        window.start_date(),
        window.end_date(),
        patterns.weekly_workouts,
        patterns.average_strain,
        patterns.workout_consistency * 100.0,
        patterns.overtraining_risk,
        patterns.active_recovery_days,
        patterns.intensity_balance,
        narrative::activity_behavioral_insights(patterns),
    )
}

/// Recovery trend over a trailing window
#[must_use]
pub fn format_recovery_trend(trend: &RecoveryTrend, days: u32) -> String {
    format!(
        "# Recovery Trend Analysis ({days} days)\n\n\
         ## Trend Summary\n\
         - **Overall Trend:** {}\n\
         - **Average Score:** {:.1}%\n\
         - **Weekly Change:** {:.1} points\n\
         - **Consistency:** {:.1}%\n\n\
         ## Recent Scores\n\
         {}\n\n\
         ## Interpretation\n\
         {}",
        trend.trend,
        trend.average_score.unwrap_or_default(),
        trend.weekly_change.unwrap_or_default(),
        percent(trend.consistency_score),
        score_list(&trend.last_seven_days),
        narrative::interpret_recovery_trend(trend),
    )
}

/// Sleep trend over a trailing window
#[must_use]
pub fn format_sleep_trend(analysis: &SleepAnalysis, days: u32) -> String {
    format!(
        "# Sleep Trend Analysis ({days} days)\n\n\
         ## Sleep Summary\n\
         - **Average Duration:** {:.1} hours\n\
         - **Sleep Efficiency:** {:.1}%\n\
         - **Quality Trend:** {}\n\
         - **Consistency:** {:.1}%\n\n\
         ## Analysis\n\
         {}",
        analysis.average_hours.unwrap_or_default(),
        percent(analysis.average_efficiency),
        analysis.sleep_quality_trend,
        percent(analysis.consistency_score),
        narrative::interpret_sleep_trend(analysis),
    )
}

/// Day-strain trend over a trailing window
#[must_use]
pub fn format_strain_trend(trend: &StrainTrend, days: u32) -> String {
    if trend.pattern == StrainPattern::NoData {
        return "No strain data available for the requested period.".to_owned();
    }

    format!(
        "# Strain Trend Analysis ({days} days)\n\n\
         ## Strain Summary\n\
         - **Average Strain:** {:.1}\n\
         - **Total Sessions:** {}\n\
         - **Strain Range:** {:.1} - {:.1}\n\n\
         ## Recent Pattern\n\
         {}",
        trend.average_strain,
        trend.session_count,
        trend.min_strain,
        trend.max_strain,
        narrative::interpret_strain_pattern(trend.pattern),
    )
}

fn percent(fraction: Option<f64>) -> f64 {
    fraction.unwrap_or_default() * 100.0
}

fn score_list(scores: &[f64]) -> String {
    if scores.is_empty() {
        return "No recent scores available".to_owned();
    }
    scores
        .iter()
        .enumerate()
        .map(|(i, score)| format!("Day {}: {score:.1}%", i + 1))
        .collect::<Vec<_>>()
        .join(", ")
}

const fn severity_marker(severity: InsightSeverity) -> &'static str {
    match severity {
        InsightSeverity::Alert => "⚠️ ",
        InsightSeverity::Concern => "⚡ ",
        InsightSeverity::Info => "ℹ️ ",
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use wellness_core::models::{
        HealthDataBatch, InsightCategory, RedFlag, RedFlagKind, RedFlagSeverity, StressLevel, TherapyInsight,
        TrendDirection,
    };
    use wellness_intelligence::HealthAnalyzer;

    use super::*;

    fn window() -> DateWindow {
        DateWindow::from_iso_dates("2025-03-01", "2025-03-14").unwrap()
    }

    fn empty_summary() -> HealthSummary {
        let batch = HealthDataBatch::default();
        HealthAnalyzer::analyze_health_summary(
            &batch,
            window(),
            42,
            Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_empty_summary_renders_zeroes() {
        let text = format_health_summary(&empty_summary());

        assert!(text.starts_with("# Health Summary for Therapy Session\n\n"));
        assert!(text.contains("**Analysis Period:** 2025-03-01 to 2025-03-14"));
        assert!(text.contains("- **Average Score:** 0.0% (no_data trend)"));
        assert!(text.contains("- **Stress Level:** unknown"));
        assert!(!text.contains("Recent Change"));
        assert!(!text.contains("Red Flags"));
        assert!(text.contains("ℹ️ **Activity**"));
    }

    #[test]
    fn test_red_flags_and_insights_are_listed() {
        let mut summary = empty_summary();
        summary.red_flags.push(RedFlag {
            kind: RedFlagKind::ChronicStress,
            description: "Physiological stress indicators are at critical levels".to_owned(),
            severity: RedFlagSeverity::Critical,
            detected_at: Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap(),
            recommendation: "Consider immediate stress reduction interventions".to_owned(),
        });
        summary.therapy_insights = vec![TherapyInsight {
            category: InsightCategory::Stress,
            insight: "Physiological markers indicate high stress levels".to_owned(),
            severity: InsightSeverity::Alert,
            actionable: true,
            suggestion: Some("Explore current stressors".to_owned()),
        }];
        summary.stress_indicators.stress_level = StressLevel::Critical;
        summary.stress_indicators.poor_recovery_streak = 8;

        let text = format_health_summary(&summary);

        assert!(text.contains("- **Poor Recovery Streak:** 8 days"));
        assert!(text.contains("- **Chronic Stress** (critical): Physiological stress"));
        assert!(text.contains("  *Recommendation:* Consider immediate"));
        assert!(text.contains("- ⚠️ **Stress**: Physiological markers"));
        assert!(text.contains("  *Suggestion:* Explore current stressors"));
    }

    #[test]
    fn test_recovery_trend_lists_scores() {
        let trend = RecoveryTrend {
            trend: TrendDirection::Improving,
            average_score: Some(75.7),
            weekly_change: Some(10.0),
            consistency_score: Some(0.9),
            last_seven_days: vec![70.0, 90.0],
        };

        let text = format_recovery_trend(&trend, 14);

        assert!(text.starts_with("# Recovery Trend Analysis (14 days)"));
        assert!(text.contains("Day 1: 70.0%, Day 2: 90.0%"));
        assert!(text.contains("Recovery is showing a improving trend suggesting"));
    }

    #[test]
    fn test_empty_strain_trend_is_one_line() {
        let trend = HealthAnalyzer::analyze_strain_trend(&[]);
        assert_eq!(
            format_strain_trend(&trend, 30),
            "No strain data available for the requested period."
        );
    }

    #[test]
    fn test_stress_report_names_the_window() {
        let text = format_stress_report(&window(), &StressIndicators::unknown());
        assert!(text.contains("**Analysis Period:** 2025-03-01 to 2025-03-14"));
        assert!(text.contains("- **Physiological Stress Score:** 0.0/100"));
        assert!(text.contains("Continue current coping strategies."));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("recovery"), "Recovery");
        assert_eq!(capitalize(""), "");
    }
}
