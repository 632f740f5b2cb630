// ABOUTME: Narrative interpretation of analysis summaries for therapy-oriented reports
// ABOUTME: Recommendations and implications chosen from fixed phrases by summary thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use wellness_core::models::{
    ActivityPatterns, IntensityBalance, OvertrainingRisk, RecoveryTrend, SleepAnalysis,
    StrainPattern, StressIndicators, StressLevel, TrendDirection,
};

use crate::thresholds::{activity, recovery, sleep};

/// Therapeutic guidance for a stress level
#[must_use]
pub const fn stress_recommendations(stress: &StressIndicators) -> &'static str {
    match stress.stress_level {
        StressLevel::Critical => "Immediate intervention recommended. Consider reducing stressors, improving sleep hygiene, and potentially seeking medical evaluation for chronic stress impacts.",
        StressLevel::High => "Elevated stress levels detected. Focus on stress management techniques, relaxation practices, and identifying primary stressors in therapy.",
        StressLevel::Moderate => "Moderate stress indicators present. Discuss stress management strategies and monitor for progression.",
        StressLevel::Low | StressLevel::Unknown => "Stress levels appear within normal range. Continue current coping strategies.",
    }
}

fn below(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|v| v < threshold)
}

/// How the observed sleep may relate to mental health
#[must_use]
pub fn sleep_mental_health_implications(analysis: &SleepAnalysis) -> String {
    let mut implications = Vec::new();
    if below(analysis.average_hours, sleep::RECOMMENDED_HOURS) {
        implications.push("Insufficient sleep duration may contribute to mood instability, increased anxiety, and difficulty with emotional regulation");
    }
    if below(analysis.average_efficiency, sleep::POOR_EFFICIENCY) {
        implications.push("Poor sleep efficiency suggests difficulty maintaining sleep, which can indicate anxiety, stress, or sleep disorders");
    }
    if analysis.sleep_quality_trend == TrendDirection::Declining {
        implications.push("Declining sleep quality trend may reflect increasing stress, life changes, or developing mental health concerns");
    }

    if implications.is_empty() {
        "Sleep patterns appear supportive of mental health and emotional regulation.".to_owned()
    } else {
        implications.join(". ")
    }
}

/// Concrete sleep improvement suggestions
#[must_use]
pub fn sleep_recommendations(analysis: &SleepAnalysis) -> String {
    let mut recommendations = Vec::new();
    if below(analysis.average_hours, sleep::RECOMMENDED_HOURS) {
        recommendations.push("Focus on extending sleep duration through earlier bedtime and consistent sleep schedule");
    }
    if below(analysis.average_efficiency, sleep::LOW_EFFICIENCY) {
        recommendations
            .push("Explore sleep hygiene practices and factors affecting sleep maintenance");
    }
    if below(analysis.consistency_score, sleep::LOW_CONSISTENCY) {
        recommendations
            .push("Work on sleep schedule consistency to improve circadian rhythm regulation");
    }

    if recommendations.is_empty() {
        "Continue current sleep practices as they appear to be supporting good sleep quality."
            .to_owned()
    } else {
        recommendations.join("; ")
    }
}

/// Behavioural reading of exercise habits
#[must_use]
pub fn activity_behavioral_insights(patterns: &ActivityPatterns) -> String {
    let mut insights = Vec::new();
    if patterns.weekly_workouts == 0 {
        insights.push("Lack of recorded physical activity may indicate low motivation, energy, or potential depression symptoms");
    } else if patterns.weekly_workouts > activity::COMPULSIVE_WORKOUTS {
        insights.push("High exercise frequency might indicate compulsive exercise behaviors or use of exercise as primary coping mechanism");
    }
    if patterns.overtraining_risk == OvertrainingRisk::High {
        insights.push("High training load may contribute to physical and mental fatigue, potentially exacerbating stress and mood issues");
    }
    if patterns.intensity_balance == IntensityBalance::HighIntensityFocused {
        insights.push("Preference for high-intensity exercise may reflect need for intense stimulation or avoidance behaviors");
    }

    if insights.is_empty() {
        "Activity patterns suggest a balanced approach to exercise that likely supports mental health."
            .to_owned()
    } else {
        insights.join(". ")
    }
}

/// One-paragraph reading of a recovery trend
#[must_use]
pub fn interpret_recovery_trend(trend: &RecoveryTrend) -> String {
    if trend.trend == TrendDirection::NoData {
        return "No recovery data is available for this period.".to_owned();
    }

    let mut interpretation = format!("Recovery is showing a {} trend", trend.trend);
    match trend.trend {
        TrendDirection::Declining => interpretation.push_str(
            " which may indicate increasing stress, inadequate recovery, or developing health concerns",
        ),
        TrendDirection::Improving => interpretation
            .push_str(" suggesting effective stress management and recovery strategies"),
        TrendDirection::Stable | TrendDirection::NoData => {}
    }
    if below(trend.consistency_score, recovery::LOW_CONSISTENCY) {
        interpretation.push_str(
            ". High variability in scores suggests inconsistent stressors or recovery practices",
        );
    }
    interpretation.push('.');
    interpretation
}

/// One-paragraph reading of sleep over a trend window
#[must_use]
pub fn interpret_sleep_trend(analysis: &SleepAnalysis) -> String {
    if analysis.sleep_quality_trend == TrendDirection::NoData {
        return "No sleep data is available for this period.".to_owned();
    }

    let mut parts = Vec::new();
    if below(analysis.average_hours, sleep::RECOMMENDED_HOURS) {
        parts.push("Sleep duration is below optimal range for most adults.");
    }
    if below(analysis.average_efficiency, sleep::LOW_EFFICIENCY) {
        parts.push("Sleep efficiency suggests difficulty maintaining sleep.");
    }
    match analysis.sleep_quality_trend {
        TrendDirection::Declining => parts.push(
            "Declining quality trend requires attention to identify contributing factors.",
        ),
        TrendDirection::Improving => parts.push(
            "Improving quality trend suggests positive changes in sleep habits or stress management.",
        ),
        TrendDirection::Stable | TrendDirection::NoData => {}
    }

    if parts.is_empty() {
        "Sleep patterns appear to be within healthy ranges.".to_owned()
    } else {
        parts.join(" ")
    }
}

/// Reading of a day-strain pattern
#[must_use]
pub const fn interpret_strain_pattern(pattern: StrainPattern) -> &'static str {
    match pattern {
        StrainPattern::High => {
            "High average strain may indicate intense training that could impact recovery"
        }
        StrainPattern::Low => "Low average strain suggests minimal physical stress, which may be appropriate for recovery phases",
        StrainPattern::Balanced => {
            "Strain levels appear balanced for maintaining fitness while allowing recovery"
        }
        StrainPattern::NoData => "No strain data to analyze",
    }
}
