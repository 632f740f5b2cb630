// ABOUTME: Thresholds and weights used by the health analysis and rule engine
// ABOUTME: Grouped by domain so rules and statistics share one source of truth
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Split-half trend comparison
pub mod trend {
    /// Fewest samples for a split-half comparison; smaller batches are stable
    pub const MIN_SAMPLES: usize = 7;
    /// Recovery points separating stable from improving/declining
    pub const RECOVERY_CHANGE_POINTS: f64 = 5.0;
    /// Efficiency fraction separating stable from improving/declining
    pub const SLEEP_EFFICIENCY_CHANGE: f64 = 0.05;
    /// Scores kept verbatim on a recovery trend
    pub const RECENT_SCORES: usize = 7;
}

/// Recovery scoring
pub mod recovery {
    /// Stdev normalizer for recovery consistency
    pub const CONSISTENCY_SCALE: f64 = 100.0;
    /// Scores below this are poor recoveries
    pub const POOR_SCORE: f64 = 33.0;
    /// Consistency below this is flagged as variable
    pub const LOW_CONSISTENCY: f64 = 0.6;
}

/// Sleep scoring
pub mod sleep {
    /// Stdev normalizer for sleep consistency (hours)
    pub const CONSISTENCY_SCALE_HOURS: f64 = 8.0;
    /// Recommended minimum nightly sleep
    pub const RECOMMENDED_HOURS: f64 = 7.0;
    /// Nightly sleep below this escalates to an alert
    pub const SHORT_HOURS: f64 = 6.0;
    /// Efficiency below this indicates trouble staying asleep
    pub const LOW_EFFICIENCY: f64 = 0.85;
    /// Efficiency below this indicates a possible sleep disorder
    pub const POOR_EFFICIENCY: f64 = 0.8;
    /// Consistency below this suggests an irregular schedule
    pub const LOW_CONSISTENCY: f64 = 0.7;
    /// Fixed bedtime recommendation
    pub const OPTIMAL_BEDTIME: &str = "22:00";
}

/// Physiological stress score
pub mod stress {
    /// HRV above this multiple of the running baseline counts as elevated
    pub const ELEVATED_HRV_RATIO: f64 = 1.2;
    /// Resting HR this many bpm above baseline counts as high
    pub const HIGH_RHR_DELTA_BPM: f64 = 10.0;
    /// Weight of the elevated-HRV day ratio
    pub const HRV_WEIGHT: f64 = 30.0;
    /// Weight of the high-RHR day ratio
    pub const RHR_WEIGHT: f64 = 25.0;
    /// Weight of the poor-recovery streak (per week)
    pub const STREAK_WEIGHT: f64 = 25.0;
    /// Streak normalizer (days)
    pub const STREAK_SCALE_DAYS: f64 = 7.0;
    /// Weight of the recovery shortfall
    pub const SHORTFALL_WEIGHT: f64 = 20.0;
    /// Mean recovery below which the shortfall counts
    pub const SHORTFALL_BASELINE: f64 = 50.0;
    /// Streak length that raises an insight
    pub const STREAK_ALERT_DAYS: u32 = 3;
}

/// Activity scoring
pub mod activity {
    /// Gap stdev normalizer (days)
    pub const CONSISTENCY_SCALE_DAYS: f64 = 7.0;
    /// Strain above which a sample is high intensity
    pub const HIGH_INTENSITY_STRAIN: f64 = 15.0;
    /// Strain below which a positive sample is active recovery
    pub const ACTIVE_RECOVERY_STRAIN: f64 = 10.0;
    /// High-intensity share above which training is high-intensity focused
    pub const HIGH_INTENSITY_SHARE: f64 = 0.5;
    /// High-intensity share below which training is low-intensity focused
    pub const LOW_INTENSITY_SHARE: f64 = 0.2;
    /// Mean strain for high overtraining risk
    pub const HIGH_RISK_STRAIN: f64 = 18.0;
    /// Weekly workouts for high overtraining risk (exclusive)
    pub const HIGH_RISK_WORKOUTS: u32 = 6;
    /// Mean strain for moderate overtraining risk
    pub const MODERATE_RISK_STRAIN: f64 = 15.0;
    /// Weekly workouts for moderate overtraining risk (exclusive)
    pub const MODERATE_RISK_WORKOUTS: u32 = 5;
    /// Weekly workouts above which exercise may be compulsive
    pub const COMPULSIVE_WORKOUTS: u32 = 7;
    /// Average day strain above which load is high
    pub const HIGH_DAY_STRAIN: f64 = 15.0;
    /// Average day strain below which load is low
    pub const LOW_DAY_STRAIN: f64 = 8.0;
}

/// Red flag rules
pub mod red_flags {
    /// Streak length for extended poor recovery
    pub const EXTENDED_POOR_RECOVERY_DAYS: u32 = 7;
    /// Most recent nights averaged for sleep deprivation
    pub const RECENT_NIGHTS: usize = 3;
    /// Mean hours below which sleep deprivation is severe
    pub const SEVERE_DEPRIVATION_HOURS: f64 = 5.0;
    /// Recoveries required before checking for a decline
    pub const DECLINE_MIN_RECORDS: usize = 7;
    /// Most recent recoveries compared against the baseline
    pub const DECLINE_RECENT: usize = 3;
    /// Recoveries preceding the recent ones used as baseline
    pub const DECLINE_BASELINE: usize = 7;
    /// Drop in points that counts as dramatic
    pub const DECLINE_POINTS: f64 = 30.0;
}
