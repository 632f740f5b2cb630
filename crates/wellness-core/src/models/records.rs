// ABOUTME: WHOOP v2 record models for recovery, sleep, workout and physiological cycles
// ABOUTME: Immutable deserialized views of remote records with kind metadata for generic fetching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::constants::whoop_api;

/// Milliseconds in one hour, used for duration conversions
pub const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// The four record collections exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Daily recovery scores
    Recovery,
    /// Sleep sessions
    Sleep,
    /// Workouts
    Workout,
    /// Physiological cycles (days)
    Cycle,
}

impl RecordKind {
    /// Collection path relative to the API base URL
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Recovery => whoop_api::RECOVERY_PATH,
            Self::Sleep => whoop_api::SLEEP_PATH,
            Self::Workout => whoop_api::WORKOUT_PATH,
            Self::Cycle => whoop_api::CYCLE_PATH,
        }
    }

    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recovery => "recovery",
            Self::Sleep => "sleep",
            Self::Workout => "workout",
            Self::Cycle => "cycle",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record type that can be fetched from one collection endpoint
pub trait WhoopRecord: DeserializeOwned + Send + Sync + 'static {
    /// Collection this record lives in
    const KIND: RecordKind;
}

/// Scoring state reported by the remote system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreState {
    /// Score is complete
    Scored,
    /// Score not yet computed
    PendingScore,
    /// Score cannot be computed for this record
    Unscorable,
    /// Unrecognized or missing state
    #[default]
    #[serde(other)]
    Unknown,
}

impl ScoreState {
    /// Whether a record in this state may carry a usable score.
    ///
    /// Unknown states are trusted when a payload is present.
    #[must_use]
    pub const fn has_score(self) -> bool {
        !matches!(self, Self::PendingScore | Self::Unscorable)
    }
}

/// Authenticated user's basic profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// WHOOP user id
    pub user_id: i64,
    /// Email address
    #[serde(default)]
    pub email: String,
    /// First name
    #[serde(default)]
    pub first_name: String,
    /// Last name
    #[serde(default)]
    pub last_name: String,
}

// ============================================================================
// Recovery
// ============================================================================

/// Daily recovery record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recovery {
    /// Cycle this recovery belongs to
    pub cycle_id: i64,
    /// Sleep that produced this recovery (UUID)
    #[serde(default)]
    pub sleep_id: String,
    /// Owning user
    pub user_id: i64,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
    /// Scoring state
    #[serde(default)]
    pub score_state: ScoreState,
    /// Score payload, absent until scored
    #[serde(default)]
    pub score: Option<RecoveryScore>,
}

/// Recovery score payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryScore {
    /// Whether the user is still calibrating
    pub user_calibrating: bool,
    /// Recovery percentage (0-100)
    pub recovery_score: f64,
    /// Resting heart rate (bpm)
    pub resting_heart_rate: f64,
    /// Heart rate variability RMSSD (ms)
    pub hrv_rmssd_milli: f64,
    /// Skin temperature (Celsius)
    pub skin_temp_celsius: Option<f64>,
    /// Blood oxygen saturation (%)
    pub spo2_percentage: Option<f64>,
}

impl Recovery {
    /// Whether the score payload is present and final
    #[must_use]
    pub const fn is_scored(&self) -> bool {
        self.score.is_some() && self.score_state.has_score()
    }

    /// Recovery percentage, 0 when unscored
    #[must_use]
    pub fn recovery_score(&self) -> f64 {
        self.score.as_ref().map_or(0.0, |s| s.recovery_score)
    }

    /// HRV RMSSD in milliseconds, 0 when unscored
    #[must_use]
    pub fn hrv_rmssd(&self) -> f64 {
        self.score.as_ref().map_or(0.0, |s| s.hrv_rmssd_milli)
    }

    /// Resting heart rate in bpm, 0 when unscored
    #[must_use]
    pub fn resting_heart_rate(&self) -> f64 {
        self.score.as_ref().map_or(0.0, |s| s.resting_heart_rate)
    }
}

impl WhoopRecord for Recovery {
    const KIND: RecordKind = RecordKind::Recovery;
}

// ============================================================================
// Sleep
// ============================================================================

/// Sleep session record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sleep {
    /// Sleep id (UUID)
    pub id: String,
    /// Legacy v1 id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v1_id: Option<i64>,
    /// Owning user
    pub user_id: i64,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
    /// Sleep start
    pub start: DateTime<Utc>,
    /// Sleep end
    pub end: DateTime<Utc>,
    /// Offset from UTC at sleep time
    #[serde(default)]
    pub timezone_offset: String,
    /// Whether this is a nap
    #[serde(default)]
    pub nap: bool,
    /// Scoring state
    #[serde(default)]
    pub score_state: ScoreState,
    /// Score payload, absent until scored
    #[serde(default)]
    pub score: Option<SleepScore>,
}

/// Sleep score payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleepScore {
    /// Stage durations and counts
    pub stage_summary: SleepStageSummary,
    /// Sleep need breakdown
    pub sleep_needed: SleepNeeded,
    /// Breaths per minute
    pub respiratory_rate: Option<f64>,
    /// Sleep performance (%)
    pub sleep_performance_percentage: Option<f64>,
    /// Sleep consistency (%)
    pub sleep_consistency_percentage: Option<f64>,
    /// Sleep efficiency (%)
    pub sleep_efficiency_percentage: f64,
}

/// Sleep stage summary (durations in milliseconds)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleepStageSummary {
    /// Total time in bed
    pub total_in_bed_time_milli: i64,
    /// Total time awake while in bed
    pub total_awake_time_milli: i64,
    /// Time with no data
    pub total_no_data_time_milli: i64,
    /// Light sleep
    pub total_light_sleep_time_milli: i64,
    /// Slow wave (deep) sleep
    pub total_slow_wave_sleep_time_milli: i64,
    /// REM sleep
    pub total_rem_sleep_time_milli: i64,
    /// Number of sleep cycles
    pub sleep_cycle_count: i32,
    /// Number of disturbances
    pub disturbance_count: i32,
}

/// Sleep need breakdown (milliseconds)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleepNeeded {
    /// Baseline need
    pub baseline_milli: i64,
    /// Additional need from accumulated debt
    pub need_from_sleep_debt_milli: i64,
    /// Additional need from recent strain
    pub need_from_recent_strain_milli: i64,
    /// Reduction from recent naps
    pub need_from_recent_nap_milli: i64,
}

#[allow(clippy::cast_precision_loss)]
impl Sleep {
    /// Whether the score payload is present and final
    #[must_use]
    pub const fn is_scored(&self) -> bool {
        self.score.is_some() && self.score_state.has_score()
    }

    /// Time asleep in hours (in bed minus awake)
    #[must_use]
    pub fn sleep_hours(&self) -> f64 {
        self.score.as_ref().map_or(0.0, |s| {
            let summary = &s.stage_summary;
            (summary.total_in_bed_time_milli - summary.total_awake_time_milli) as f64
                / MILLIS_PER_HOUR
        })
    }

    /// Sleep efficiency as a fraction (0-1)
    #[must_use]
    pub fn efficiency(&self) -> f64 {
        self.score
            .as_ref()
            .map_or(0.0, |s| s.sleep_efficiency_percentage / 100.0)
    }

    /// Needed sleep in hours (baseline plus debt-driven need)
    #[must_use]
    pub fn needed_hours(&self) -> f64 {
        self.score.as_ref().map_or(0.0, |s| {
            let needed = &s.sleep_needed;
            (needed.baseline_milli + needed.need_from_sleep_debt_milli) as f64 / MILLIS_PER_HOUR
        })
    }

    /// Disturbance count, 0 when unscored
    #[must_use]
    pub fn disturbances(&self) -> i32 {
        self.score
            .as_ref()
            .map_or(0, |s| s.stage_summary.disturbance_count)
    }
}

impl WhoopRecord for Sleep {
    const KIND: RecordKind = RecordKind::Sleep;
}

// ============================================================================
// Workout
// ============================================================================

/// Workout record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Workout id (UUID)
    pub id: String,
    /// Legacy v1 id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v1_id: Option<i64>,
    /// Owning user
    pub user_id: i64,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
    /// Workout start
    pub start: DateTime<Utc>,
    /// Workout end
    pub end: DateTime<Utc>,
    /// Offset from UTC at workout time
    #[serde(default)]
    pub timezone_offset: String,
    /// Sport name
    #[serde(default)]
    pub sport_name: String,
    /// Legacy sport id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport_id: Option<i32>,
    /// Scoring state
    #[serde(default)]
    pub score_state: ScoreState,
    /// Score payload, absent until scored
    #[serde(default)]
    pub score: Option<WorkoutScore>,
}

/// Workout score payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkoutScore {
    /// Strain (0-21)
    pub strain: f64,
    /// Average heart rate (bpm)
    pub average_heart_rate: Option<u32>,
    /// Maximum heart rate (bpm)
    pub max_heart_rate: Option<u32>,
    /// Energy expenditure
    pub kilojoule: Option<f64>,
    /// Share of the workout with heart-rate data (%)
    pub percent_recorded: Option<f64>,
    /// Distance (meters)
    pub distance_meter: Option<f64>,
    /// Altitude gain (meters)
    pub altitude_gain_meter: Option<f64>,
    /// Net altitude change (meters)
    pub altitude_change_meter: Option<f64>,
    /// Time in each heart-rate zone
    pub zone_durations: ZoneDurations,
}

/// Heart-rate zone durations (milliseconds)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneDurations {
    /// Zone 0
    pub zone_zero_milli: i64,
    /// Zone 1
    pub zone_one_milli: i64,
    /// Zone 2
    pub zone_two_milli: i64,
    /// Zone 3
    pub zone_three_milli: i64,
    /// Zone 4
    pub zone_four_milli: i64,
    /// Zone 5
    pub zone_five_milli: i64,
}

impl Workout {
    /// Whether the score payload is present and final
    #[must_use]
    pub const fn is_scored(&self) -> bool {
        self.score.is_some() && self.score_state.has_score()
    }

    /// Strain, 0 when unscored
    #[must_use]
    pub fn strain(&self) -> f64 {
        self.score.as_ref().map_or(0.0, |s| s.strain)
    }
}

impl WhoopRecord for Workout {
    const KIND: RecordKind = RecordKind::Workout;
}

// ============================================================================
// Cycle
// ============================================================================

/// Physiological cycle (one waking day)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cycle {
    /// Cycle id
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
    /// Cycle start
    pub start: DateTime<Utc>,
    /// Cycle end, absent for the current cycle
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    /// Offset from UTC
    #[serde(default)]
    pub timezone_offset: String,
    /// Scoring state
    #[serde(default)]
    pub score_state: ScoreState,
    /// Score payload, absent until scored
    #[serde(default)]
    pub score: Option<CycleScore>,
}

/// Cycle score payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleScore {
    /// Day strain (0-21)
    pub strain: f64,
    /// Energy expenditure
    pub kilojoule: Option<f64>,
    /// Average heart rate (bpm)
    pub average_heart_rate: Option<u32>,
    /// Maximum heart rate (bpm)
    pub max_heart_rate: Option<u32>,
}

impl Cycle {
    /// Whether the score payload is present and final
    #[must_use]
    pub const fn is_scored(&self) -> bool {
        self.score.is_some() && self.score_state.has_score()
    }

    /// Day strain, 0 when unscored
    #[must_use]
    pub fn strain(&self) -> f64 {
        self.score.as_ref().map_or(0.0, |s| s.strain)
    }
}

impl WhoopRecord for Cycle {
    const KIND: RecordKind = RecordKind::Cycle;
}

// ============================================================================
// Batches
// ============================================================================

/// The four record batches fetched for one reporting window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthDataBatch {
    /// Recovery records
    pub recoveries: Vec<Recovery>,
    /// Sleep records
    pub sleeps: Vec<Sleep>,
    /// Workout records
    pub workouts: Vec<Workout>,
    /// Cycle records
    pub cycles: Vec<Cycle>,
}

impl HealthDataBatch {
    /// Total number of records across all kinds
    #[must_use]
    pub fn len(&self) -> usize {
        self.recoveries.len() + self.sleeps.len() + self.workouts.len() + self.cycles.len()
    }

    /// Whether no records of any kind were returned
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sleep_derivations() {
        let sleep: Sleep = serde_json::from_value(json!({
            "id": "s-1",
            "user_id": 10,
            "created_at": "2025-03-02T07:00:00Z",
            "updated_at": "2025-03-02T07:00:00Z",
            "start": "2025-03-01T23:00:00Z",
            "end": "2025-03-02T07:00:00Z",
            "score_state": "SCORED",
            "score": {
                "stage_summary": {
                    "total_in_bed_time_milli": 28_800_000,
                    "total_awake_time_milli": 1_800_000,
                    "disturbance_count": 4
                },
                "sleep_needed": {
                    "baseline_milli": 27_000_000,
                    "need_from_sleep_debt_milli": 3_600_000
                },
                "sleep_efficiency_percentage": 92.0
            }
        }))
        .unwrap();

        assert!((sleep.sleep_hours() - 7.5).abs() < 1e-9);
        assert!((sleep.efficiency() - 0.92).abs() < 1e-9);
        assert!((sleep.needed_hours() - 8.5).abs() < 1e-9);
        assert_eq!(sleep.disturbances(), 4);
        assert_eq!(sleep.score_state, ScoreState::Scored);
    }

    #[test]
    fn test_unscored_records_contribute_zero() {
        let recovery: Recovery = serde_json::from_value(json!({
            "cycle_id": 1,
            "user_id": 10,
            "created_at": "2025-03-02T07:00:00Z",
            "updated_at": "2025-03-02T07:00:00Z",
            "score_state": "PENDING_SCORE"
        }))
        .unwrap();

        assert_eq!(recovery.score_state, ScoreState::PendingScore);
        assert!(recovery.recovery_score().abs() < f64::EPSILON);
        assert!(recovery.hrv_rmssd().abs() < f64::EPSILON);
        assert!(!recovery.is_scored());
    }

    #[test]
    fn test_pending_state_with_stale_payload_is_not_scored() {
        let recovery: Recovery = serde_json::from_value(json!({
            "cycle_id": 2,
            "user_id": 10,
            "created_at": "2025-03-02T07:00:00Z",
            "updated_at": "2025-03-02T07:00:00Z",
            "score_state": "PENDING_SCORE",
            "score": {"recovery_score": 40.0}
        }))
        .unwrap();
        assert!(!recovery.is_scored());
    }

    #[test]
    fn test_unknown_score_state_is_tolerated() {
        let cycle: Cycle = serde_json::from_value(json!({
            "id": 5,
            "user_id": 10,
            "created_at": "2025-03-02T07:00:00Z",
            "updated_at": "2025-03-02T07:00:00Z",
            "start": "2025-03-02T07:00:00Z",
            "score_state": "SOMETHING_NEW",
            "score": {"strain": 12.5}
        }))
        .unwrap();

        assert_eq!(cycle.score_state, ScoreState::Unknown);
        assert!(cycle.end.is_none());
        assert!((cycle.strain() - 12.5).abs() < f64::EPSILON);
        assert!(cycle.is_scored());
    }

    #[test]
    fn test_record_kind_endpoints() {
        assert_eq!(RecordKind::Recovery.endpoint(), "/v2/recovery");
        assert_eq!(RecordKind::Sleep.endpoint(), "/v2/activity/sleep");
        assert_eq!(RecordKind::Workout.endpoint(), "/v2/activity/workout");
        assert_eq!(RecordKind::Cycle.endpoint(), "/v2/cycle");
        assert_eq!(Workout::KIND, RecordKind::Workout);
    }
}
