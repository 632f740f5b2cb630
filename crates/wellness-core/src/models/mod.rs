// ABOUTME: Core data models shared across fetch, analysis and protocol layers
// ABOUTME: Remote records, credentials, date windows and derived health summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Data models

/// Bearer credential with refresh material
pub mod credential;
/// Remote record types
pub mod records;
/// Derived analysis summaries
pub mod summary;
/// Inclusive date windows
pub mod window;

pub use credential::Credential;
pub use records::{
    Cycle, CycleScore, HealthDataBatch, Recovery, RecoveryScore, RecordKind, ScoreState, Sleep, SleepNeeded,
    SleepScore, SleepStageSummary, UserProfile, WhoopRecord, Workout, WorkoutScore,
    ZoneDurations,
};
pub use summary::{
    ActivityPatterns, HealthSummary, InsightCategory, InsightSeverity, IntensityBalance,
    OvertrainingRisk, RecoveryTrend, RedFlag, RedFlagKind, RedFlagSeverity, SleepAnalysis,
    StrainPattern, StrainTrend, StressIndicators, StressLevel, TherapyInsight, TrendDirection,
};
pub use window::DateWindow;
