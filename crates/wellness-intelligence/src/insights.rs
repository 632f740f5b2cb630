// ABOUTME: Rule engine mapping health summaries to therapy insights and red flags
// ABOUTME: Fixed, order-stable rule tables; red flags are stamped with the analysis time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use wellness_core::models::{
    ActivityPatterns, InsightCategory, InsightSeverity, OvertrainingRisk, Recovery, RecoveryTrend,
    RedFlag, RedFlagKind, RedFlagSeverity, Sleep, SleepAnalysis, StressIndicators, StressLevel,
    TherapyInsight, TrendDirection,
};

use crate::analyzer::chronological_scores;
use crate::statistics::mean;
use crate::thresholds::{recovery, red_flags, sleep, stress};

fn insight(
    category: InsightCategory,
    severity: InsightSeverity,
    text: impl Into<String>,
    suggestion: &str,
) -> TherapyInsight {
    TherapyInsight {
        category,
        insight: text.into(),
        severity,
        actionable: true,
        suggestion: Some(suggestion.to_owned()),
    }
}

/// Advisory discussion points, in fixed rule order.
///
/// Rules reading a numeric field do not fire when that field is absent
/// (no data in the window).
#[must_use]
pub fn generate_therapy_insights(
    recovery_trend: &RecoveryTrend,
    sleep_analysis: &SleepAnalysis,
    stress_indicators: &StressIndicators,
    activity_patterns: &ActivityPatterns,
) -> Vec<TherapyInsight> {
    let mut insights = Vec::new();

    if recovery_trend.trend == TrendDirection::Declining {
        let change = recovery_trend.weekly_change.unwrap_or_default().abs();
        insights.push(insight(
            InsightCategory::Recovery,
            InsightSeverity::Concern,
            format!(
                "Recovery scores have declined by {change:.1}% recently, which may indicate increased stress or inadequate rest"
            ),
            "Consider discussing stress management techniques and sleep hygiene improvements",
        ));
    }

    if recovery_trend
        .consistency_score
        .is_some_and(|c| c < recovery::LOW_CONSISTENCY)
    {
        insights.push(insight(
            InsightCategory::Recovery,
            InsightSeverity::Info,
            "Recovery scores show high variability, suggesting inconsistent stress levels or sleep patterns",
            "Explore daily routine consistency and identify potential stressors causing fluctuations",
        ));
    }

    if let Some(hours) = sleep_analysis
        .average_hours
        .filter(|h| *h < sleep::RECOMMENDED_HOURS)
    {
        let severity = if hours < sleep::SHORT_HOURS {
            InsightSeverity::Alert
        } else {
            InsightSeverity::Concern
        };
        insights.push(insight(
            InsightCategory::Sleep,
            severity,
            format!("Average sleep duration of {hours:.1} hours is below recommended 7-9 hours"),
            "Discuss sleep barriers and develop a personalized sleep improvement plan",
        ));
    }

    if let Some(efficiency) = sleep_analysis
        .average_efficiency
        .filter(|e| *e < sleep::LOW_EFFICIENCY)
    {
        insights.push(insight(
            InsightCategory::Sleep,
            InsightSeverity::Concern,
            format!(
                "Sleep efficiency of {:.1}% indicates difficulty staying asleep",
                efficiency * 100.0
            ),
            "Explore factors affecting sleep quality such as anxiety, environment, or habits",
        ));
    }

    if sleep_analysis.sleep_quality_trend == TrendDirection::Declining {
        insights.push(insight(
            InsightCategory::Sleep,
            InsightSeverity::Concern,
            "Sleep quality has been declining, which may impact mood and cognitive function",
            "Investigate recent life changes or stressors that might be affecting sleep",
        ));
    }

    if matches!(
        stress_indicators.stress_level,
        StressLevel::High | StressLevel::Critical
    ) {
        insights.push(insight(
            InsightCategory::Stress,
            InsightSeverity::Alert,
            "Physiological markers indicate elevated stress levels that may be impacting overall well-being",
            "Prioritize stress reduction techniques and consider addressing underlying stressors",
        ));
    }

    if stress_indicators.poor_recovery_streak >= stress::STREAK_ALERT_DAYS {
        insights.push(insight(
            InsightCategory::Stress,
            InsightSeverity::Alert,
            format!(
                "Extended period of poor recovery ({} days) suggests chronic stress or burnout",
                stress_indicators.poor_recovery_streak
            ),
            "Evaluate workload, relationships, and coping mechanisms for signs of overwhelm",
        ));
    }

    if activity_patterns.overtraining_risk == OvertrainingRisk::High {
        insights.push(insight(
            InsightCategory::Activity,
            InsightSeverity::Concern,
            "High training load may be contributing to physical and mental stress",
            "Discuss the role of exercise in stress management and potential need for recovery time",
        ));
    }

    if activity_patterns.weekly_workouts == 0 {
        insights.push(insight(
            InsightCategory::Activity,
            InsightSeverity::Info,
            "Lack of recorded physical activity may indicate low energy or motivation",
            "Explore barriers to physical activity and discuss gentle movement as mood support",
        ));
    }

    insights
}

/// Critical patterns requiring immediate attention, in fixed rule order
#[must_use]
pub fn detect_red_flags(
    recoveries: &[Recovery],
    sleeps: &[Sleep],
    stress_indicators: &StressIndicators,
    detected_at: DateTime<Utc>,
) -> Vec<RedFlag> {
    let flag = |kind, severity, description: String, recommendation: &str| RedFlag {
        kind,
        description,
        severity,
        detected_at,
        recommendation: recommendation.to_owned(),
    };
    let mut flags = Vec::new();

    if stress_indicators.stress_level == StressLevel::Critical {
        flags.push(flag(
            RedFlagKind::ChronicStress,
            RedFlagSeverity::Critical,
            "Multiple physiological stress markers indicate potential burnout or chronic stress condition".to_owned(),
            "Consider immediate stress intervention and possible medical evaluation",
        ));
    }

    if stress_indicators.poor_recovery_streak >= red_flags::EXTENDED_POOR_RECOVERY_DAYS {
        flags.push(flag(
            RedFlagKind::ExtendedPoorRecovery,
            RedFlagSeverity::High,
            format!(
                "Recovery scores have been poor for {} consecutive days",
                stress_indicators.poor_recovery_streak
            ),
            "Evaluate for signs of depression, anxiety, or physical health issues",
        ));
    }

    if let Some((nights, hours)) = recent_sleep_hours(sleeps) {
        if hours < red_flags::SEVERE_DEPRIVATION_HOURS {
            flags.push(flag(
                RedFlagKind::SevereSleepDeprivation,
                RedFlagSeverity::Critical,
                format!("Average sleep in recent {nights} days is critically low ({hours:.1} hours)"),
                "Immediate sleep assessment and intervention required",
            ));
        }
    }

    if let Some((baseline, recent)) = recovery_decline(recoveries) {
        if recent < baseline - red_flags::DECLINE_POINTS {
            flags.push(flag(
                RedFlagKind::DramaticRecoveryDecline,
                RedFlagSeverity::High,
                format!("Recovery scores dropped dramatically from {baseline:.1} to {recent:.1}"),
                "Investigate sudden life changes, illness, or acute stressors",
            ));
        }
    }

    flags
}

/// Number of nights and their mean hours for the most recent nights by start
fn recent_sleep_hours(sleeps: &[Sleep]) -> Option<(usize, f64)> {
    let mut ordered: Vec<&Sleep> = sleeps.iter().filter(|s| s.is_scored()).collect();
    if ordered.is_empty() {
        return None;
    }
    ordered.sort_by_key(|s| s.start);
    let recent: Vec<f64> = ordered[ordered.len().saturating_sub(red_flags::RECENT_NIGHTS)..]
        .iter()
        .map(|s| s.sleep_hours())
        .collect();
    Some((recent.len(), mean(&recent)))
}

/// Baseline and recent recovery means when enough records exist
fn recovery_decline(recoveries: &[Recovery]) -> Option<(f64, f64)> {
    let scores = chronological_scores(recoveries);
    if scores.len() < red_flags::DECLINE_MIN_RECORDS {
        return None;
    }
    let split = scores.len() - red_flags::DECLINE_RECENT;
    let baseline_start = split.saturating_sub(red_flags::DECLINE_BASELINE);
    let baseline = &scores[baseline_start..split];
    if baseline.is_empty() {
        return None;
    }
    Some((mean(baseline), mean(&scores[split..])))
}
