// ABOUTME: Derived analysis summaries for recovery, sleep, stress and activity
// ABOUTME: Classification enums, therapy insights, red flags and the composite HealthSummary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::window::DateWindow;

/// Implements `as_str` and `Display` for a snake_case classification enum
macro_rules! label_enum {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $name {
            /// Stable snake_case label
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// ============================================================================
// Classifications
// ============================================================================

/// Direction of a split-half trend comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Second half better than the first by more than the threshold
    Improving,
    /// Second half worse than the first by more than the threshold
    Declining,
    /// Within the threshold, or too few samples to compare
    Stable,
    /// No records in the window
    NoData,
}

label_enum!(TrendDirection {
    Improving => "improving",
    Declining => "declining",
    Stable => "stable",
    NoData => "no_data",
});

/// Physiological stress classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressLevel {
    /// Score 30 or below
    Low,
    /// Score above 30
    Moderate,
    /// Score above 50
    High,
    /// Score above 70
    Critical,
    /// No recovery records
    Unknown,
}

label_enum!(StressLevel {
    Low => "low",
    Moderate => "moderate",
    High => "high",
    Critical => "critical",
    Unknown => "unknown",
});

impl StressLevel {
    /// Classify a 0-100 physiological stress score
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > 70.0 {
            Self::Critical
        } else if score > 50.0 {
            Self::High
        } else if score > 30.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

/// Risk of accumulated training load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertrainingRisk {
    /// Normal load
    Low,
    /// Strain above 15 with more than 5 weekly workouts
    Moderate,
    /// Strain above 18 with more than 6 weekly workouts
    High,
    /// No activity data
    Unknown,
}

label_enum!(OvertrainingRisk {
    Low => "low",
    Moderate => "moderate",
    High => "high",
    Unknown => "unknown",
});

/// Share of high-strain samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntensityBalance {
    /// Between 20% and 50% of samples above strain 15
    Balanced,
    /// More than half of samples above strain 15
    HighIntensityFocused,
    /// Fewer than 20% of samples above strain 15
    LowIntensityFocused,
    /// No activity data
    Unknown,
}

label_enum!(IntensityBalance {
    Balanced => "balanced",
    HighIntensityFocused => "high_intensity_focused",
    LowIntensityFocused => "low_intensity_focused",
    Unknown => "unknown",
});

/// Classification of average day strain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrainPattern {
    /// Average above 15
    High,
    /// Average below 8
    Low,
    /// In between
    Balanced,
    /// No cycles
    NoData,
}

label_enum!(StrainPattern {
    High => "high",
    Low => "low",
    Balanced => "balanced",
    NoData => "no_data",
});

// ============================================================================
// Summaries
// ============================================================================

/// Recovery score trend. Numeric fields are absent when there is no data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryTrend {
    /// Trend direction
    pub trend: TrendDirection,
    /// Mean recovery score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_score: Option<f64>,
    /// Second-half mean minus first-half mean
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_change: Option<f64>,
    /// `1 - stdev/100`, floored at 0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistency_score: Option<f64>,
    /// Up to the last seven scores in chronological order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub last_seven_days: Vec<f64>,
}

impl RecoveryTrend {
    /// Trend for an empty batch
    #[must_use]
    pub const fn no_data() -> Self {
        Self {
            trend: TrendDirection::NoData,
            average_score: None,
            weekly_change: None,
            consistency_score: None,
            last_seven_days: Vec::new(),
        }
    }
}

/// Sleep quality summary. Numeric fields are absent when there is no data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepAnalysis {
    /// Quality trend over efficiency
    pub sleep_quality_trend: TrendDirection,
    /// Mean hours asleep
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_hours: Option<f64>,
    /// Mean efficiency (0-1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_efficiency: Option<f64>,
    /// Mean hours of need minus hours slept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_debt: Option<f64>,
    /// `1 - stdev(hours)/8`, floored at 0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistency_score: Option<f64>,
    /// Whole disturbances per night
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disturbance_frequency: Option<f64>,
    /// Recommended bedtime (HH:MM)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimal_bedtime: Option<String>,
}

impl SleepAnalysis {
    /// Analysis for an empty batch
    #[must_use]
    pub const fn no_data() -> Self {
        Self {
            sleep_quality_trend: TrendDirection::NoData,
            average_hours: None,
            average_efficiency: None,
            average_debt: None,
            consistency_score: None,
            disturbance_frequency: None,
            optimal_bedtime: None,
        }
    }
}

/// Physiological stress markers derived from recoveries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressIndicators {
    /// Classification of `physiological_stress`
    pub stress_level: StressLevel,
    /// Days with HRV above 120% of the running baseline
    pub elevated_hrv_days: u32,
    /// Days with resting HR more than 10 bpm above the running baseline
    pub high_resting_hr_days: u32,
    /// Longest run of recovery scores below 33
    pub poor_recovery_streak: u32,
    /// Weighted stress score (0-100)
    pub physiological_stress: f64,
}

impl StressIndicators {
    /// Indicators for an empty batch
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            stress_level: StressLevel::Unknown,
            elevated_hrv_days: 0,
            high_resting_hr_days: 0,
            poor_recovery_streak: 0,
            physiological_stress: 0.0,
        }
    }
}

/// Exercise habits derived from workouts and cycles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityPatterns {
    /// Workouts per week extrapolated over the observed span
    pub weekly_workouts: u32,
    /// Mean of workout and cycle strains
    pub average_strain: f64,
    /// `1 - stdev(gap days)/7`, floored at 0
    pub workout_consistency: f64,
    /// Overtraining risk
    pub overtraining_risk: OvertrainingRisk,
    /// Strain samples in (0, 10)
    pub active_recovery_days: u32,
    /// Intensity balance
    pub intensity_balance: IntensityBalance,
}

impl ActivityPatterns {
    /// Patterns when neither workouts nor cycles were recorded
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            weekly_workouts: 0,
            average_strain: 0.0,
            workout_consistency: 0.0,
            overtraining_risk: OvertrainingRisk::Unknown,
            active_recovery_days: 0,
            intensity_balance: IntensityBalance::Unknown,
        }
    }
}

/// Day-strain summary over cycles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrainTrend {
    /// Classification of the average
    pub pattern: StrainPattern,
    /// Mean strain
    pub average_strain: f64,
    /// Lowest strain
    pub min_strain: f64,
    /// Highest strain
    pub max_strain: f64,
    /// Number of cycles
    pub session_count: usize,
}

// ============================================================================
// Insights and red flags
// ============================================================================

/// Area an insight relates to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    /// Recovery scores
    Recovery,
    /// Sleep
    Sleep,
    /// Stress markers
    Stress,
    /// Exercise
    Activity,
}

label_enum!(InsightCategory {
    Recovery => "recovery",
    Sleep => "sleep",
    Stress => "stress",
    Activity => "activity",
});

/// How urgently an insight should be discussed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightSeverity {
    /// Worth mentioning
    Info,
    /// Worth discussing
    Concern,
    /// Needs attention
    Alert,
}

label_enum!(InsightSeverity {
    Info => "info",
    Concern => "concern",
    Alert => "alert",
});

/// Advisory discussion point produced by the rule engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TherapyInsight {
    /// Area
    pub category: InsightCategory,
    /// Observation text
    pub insight: String,
    /// Severity
    pub severity: InsightSeverity,
    /// Whether there is something to act on
    pub actionable: bool,
    /// Suggested discussion direction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Red flag categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedFlagKind {
    /// Critical stress score
    ChronicStress,
    /// Poor recovery for a week or more
    ExtendedPoorRecovery,
    /// Recent nights below five hours
    SevereSleepDeprivation,
    /// Recent recovery far below baseline
    DramaticRecoveryDecline,
}

label_enum!(RedFlagKind {
    ChronicStress => "chronic_stress",
    ExtendedPoorRecovery => "extended_poor_recovery",
    SevereSleepDeprivation => "severe_sleep_deprivation",
    DramaticRecoveryDecline => "dramatic_recovery_decline",
});

impl RedFlagKind {
    /// Title-cased label for reports
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::ChronicStress => "Chronic Stress",
            Self::ExtendedPoorRecovery => "Extended Poor Recovery",
            Self::SevereSleepDeprivation => "Severe Sleep Deprivation",
            Self::DramaticRecoveryDecline => "Dramatic Recovery Decline",
        }
    }
}

/// Red flag severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedFlagSeverity {
    /// Moderate
    Moderate,
    /// High
    High,
    /// Critical
    Critical,
}

label_enum!(RedFlagSeverity {
    Moderate => "moderate",
    High => "high",
    Critical => "critical",
});

/// High-severity pattern requiring attention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedFlag {
    /// Category
    #[serde(rename = "type")]
    pub kind: RedFlagKind,
    /// What was detected
    pub description: String,
    /// Severity
    pub severity: RedFlagSeverity,
    /// Time of analysis
    pub detected_at: DateTime<Utc>,
    /// Fixed recommendation for this kind
    pub recommendation: String,
}

// ============================================================================
// Composite
// ============================================================================

/// Full analysis of one reporting window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSummary {
    /// User the data belongs to
    pub user_id: i64,
    /// Analyzed window
    pub date_range: DateWindow,
    /// Recovery trend
    pub recovery_trend: RecoveryTrend,
    /// Sleep analysis
    pub sleep_analysis: SleepAnalysis,
    /// Stress indicators
    pub stress_indicators: StressIndicators,
    /// Activity patterns
    pub activity_patterns: ActivityPatterns,
    /// Advisory insights in rule order
    pub therapy_insights: Vec<TherapyInsight>,
    /// Red flags in rule order
    pub red_flags: Vec<RedFlag>,
}
