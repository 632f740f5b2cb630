// ABOUTME: Health analyzer turning WHOOP record batches into trend and pattern summaries
// ABOUTME: Stateless recovery, sleep, stress, activity and strain computations for one window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Clippy allowances for this module:
// - cast_precision_loss: record counts are far below 2^52
// - cast_possible_truncation, cast_sign_loss: weekly workout estimate is a
//   non-negative value floored before conversion
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use chrono::{DateTime, Utc};
use tracing::debug;
use wellness_core::models::{
    ActivityPatterns, Cycle, DateWindow, HealthDataBatch, HealthSummary, IntensityBalance,
    OvertrainingRisk, Recovery, RecoveryTrend, Sleep, SleepAnalysis, StrainPattern, StrainTrend,
    StressIndicators, StressLevel, TrendDirection, Workout,
};

use crate::insights::{detect_red_flags, generate_therapy_insights};
use crate::statistics::{
    self, classify_change, consistency, mean, mean_truncated, ratio, split_half_change,
};
use crate::thresholds::{activity, recovery, sleep, stress, trend};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Stateless health analysis engine.
///
/// Every function is a pure computation over already-fetched records; empty
/// input degrades to "no data" / "unknown" summaries instead of failing.
/// Records still pending a score, or unscorable, are skipped.
pub struct HealthAnalyzer;

impl HealthAnalyzer {
    /// Full summary for one reporting window.
    ///
    /// `analyzed_at` stamps any red flags raised.
    #[must_use]
    pub fn analyze_health_summary(
        batch: &HealthDataBatch,
        window: DateWindow,
        user_id: i64,
        analyzed_at: DateTime<Utc>,
    ) -> HealthSummary {
        let recovery_trend = Self::analyze_recovery_trend(&batch.recoveries);
        let sleep_analysis = Self::analyze_sleep_patterns(&batch.sleeps);
        let stress_indicators = Self::analyze_stress_indicators(&batch.recoveries);
        let activity_patterns = Self::analyze_activity_patterns(&batch.workouts, &batch.cycles);

        let therapy_insights = generate_therapy_insights(
            &recovery_trend,
            &sleep_analysis,
            &stress_indicators,
            &activity_patterns,
        );
        let red_flags = detect_red_flags(
            &batch.recoveries,
            &batch.sleeps,
            &stress_indicators,
            analyzed_at,
        );

        debug!(
            user_id,
            records = batch.len(),
            insights = therapy_insights.len(),
            red_flags = red_flags.len(),
            "health summary computed"
        );

        HealthSummary {
            user_id,
            date_range: window,
            recovery_trend,
            sleep_analysis,
            stress_indicators,
            activity_patterns,
            therapy_insights,
            red_flags,
        }
    }

    /// Recovery trend over records ordered by creation time
    #[must_use]
    pub fn analyze_recovery_trend(recoveries: &[Recovery]) -> RecoveryTrend {
        let scores = chronological_scores(recoveries);
        if scores.is_empty() {
            return RecoveryTrend::no_data();
        }
        let (direction, weekly_change) = if scores.len() >= trend::MIN_SAMPLES {
            let change = split_half_change(&scores);
            (
                classify_change(change, trend::RECOVERY_CHANGE_POINTS),
                change,
            )
        } else {
            (TrendDirection::Stable, 0.0)
        };

        RecoveryTrend {
            trend: direction,
            average_score: Some(mean(&scores)),
            weekly_change: Some(weekly_change),
            consistency_score: Some(consistency(&scores, recovery::CONSISTENCY_SCALE)),
            last_seven_days: scores[scores.len().saturating_sub(trend::RECENT_SCORES)..].to_vec(),
        }
    }

    /// Sleep duration, efficiency, debt and quality trend
    #[must_use]
    pub fn analyze_sleep_patterns(sleeps: &[Sleep]) -> SleepAnalysis {
        let mut ordered: Vec<&Sleep> = sleeps.iter().filter(|s| s.is_scored()).collect();
        if ordered.is_empty() {
            return SleepAnalysis::no_data();
        }
        ordered.sort_by_key(|s| s.start);

        let hours: Vec<f64> = ordered.iter().map(|s| s.sleep_hours()).collect();
        let efficiencies: Vec<f64> = ordered.iter().map(|s| s.efficiency()).collect();
        let debts: Vec<f64> = ordered
            .iter()
            .map(|s| s.needed_hours() - s.sleep_hours())
            .collect();
        let disturbances: Vec<i32> = ordered.iter().map(|s| s.disturbances()).collect();

        let quality_trend = if efficiencies.len() >= trend::MIN_SAMPLES {
            classify_change(
                split_half_change(&efficiencies),
                trend::SLEEP_EFFICIENCY_CHANGE,
            )
        } else {
            TrendDirection::Stable
        };

        SleepAnalysis {
            sleep_quality_trend: quality_trend,
            average_hours: Some(mean(&hours)),
            average_efficiency: Some(mean(&efficiencies)),
            average_debt: Some(mean(&debts)),
            consistency_score: Some(consistency(&hours, sleep::CONSISTENCY_SCALE_HOURS)),
            disturbance_frequency: Some(mean_truncated(&disturbances) as f64),
            optimal_bedtime: Some(sleep::OPTIMAL_BEDTIME.to_owned()),
        }
    }

    /// Stress markers from a chronological walk over recoveries.
    ///
    /// Baselines for day `i` are the means of days `0..i`, so the first day
    /// never counts as elevated.
    #[must_use]
    pub fn analyze_stress_indicators(recoveries: &[Recovery]) -> StressIndicators {
        let mut ordered: Vec<&Recovery> = recoveries.iter().filter(|r| r.is_scored()).collect();
        if ordered.is_empty() {
            return StressIndicators::unknown();
        }
        ordered.sort_by_key(|r| r.created_at);

        let mut hrv_sum = 0.0;
        let mut rhr_sum = 0.0;
        let mut elevated_hrv_days = 0_u32;
        let mut high_rhr_days = 0_u32;
        let mut longest_streak = 0_u32;
        let mut current_streak = 0_u32;
        let mut scores = Vec::with_capacity(ordered.len());

        for (seen, record) in ordered.iter().enumerate() {
            let hrv = record.hrv_rmssd();
            let rhr = record.resting_heart_rate();
            let score = record.recovery_score();

            if seen > 0 {
                let prior = seen as f64;
                if hrv > hrv_sum / prior * stress::ELEVATED_HRV_RATIO {
                    elevated_hrv_days += 1;
                }
                if rhr > rhr_sum / prior + stress::HIGH_RHR_DELTA_BPM {
                    high_rhr_days += 1;
                }
            }
            hrv_sum += hrv;
            rhr_sum += rhr;

            if score < recovery::POOR_SCORE {
                current_streak += 1;
                longest_streak = longest_streak.max(current_streak);
            } else {
                current_streak = 0;
            }
            scores.push(score);
        }

        let total = ordered.len();
        let average_recovery = mean(&scores);
        let mut stress_score = ratio(elevated_hrv_days as usize, total) * stress::HRV_WEIGHT
            + ratio(high_rhr_days as usize, total) * stress::RHR_WEIGHT
            + f64::from(longest_streak) / stress::STREAK_SCALE_DAYS * stress::STREAK_WEIGHT;
        if average_recovery < stress::SHORTFALL_BASELINE {
            stress_score += (stress::SHORTFALL_BASELINE - average_recovery)
                / stress::SHORTFALL_BASELINE
                * stress::SHORTFALL_WEIGHT;
        }

        StressIndicators {
            stress_level: StressLevel::from_score(stress_score),
            elevated_hrv_days,
            high_resting_hr_days: high_rhr_days,
            poor_recovery_streak: longest_streak,
            physiological_stress: stress_score,
        }
    }

    /// Workout frequency, strain distribution and overtraining risk
    #[must_use]
    pub fn analyze_activity_patterns(workouts: &[Workout], cycles: &[Cycle]) -> ActivityPatterns {
        let mut ordered: Vec<&Workout> = workouts.iter().filter(|w| w.is_scored()).collect();
        let scored_cycles: Vec<&Cycle> = cycles.iter().filter(|c| c.is_scored()).collect();
        if ordered.is_empty() && scored_cycles.is_empty() {
            return ActivityPatterns::unknown();
        }
        ordered.sort_by_key(|w| w.start);

        let weekly_workouts = weekly_frequency(&ordered);

        let strains: Vec<f64> = ordered
            .iter()
            .map(|w| w.strain())
            .chain(scored_cycles.iter().map(|c| c.strain()))
            .collect();
        let average_strain = mean(&strains);

        let workout_consistency = if ordered.len() > 1 {
            let gaps: Vec<f64> = ordered
                .windows(2)
                .map(|pair| days_between(pair[0].start, pair[1].start))
                .collect();
            consistency(&gaps, activity::CONSISTENCY_SCALE_DAYS)
        } else {
            0.0
        };

        let overtraining_risk = if average_strain > activity::HIGH_RISK_STRAIN
            && weekly_workouts > activity::HIGH_RISK_WORKOUTS
        {
            OvertrainingRisk::High
        } else if average_strain > activity::MODERATE_RISK_STRAIN
            && weekly_workouts > activity::MODERATE_RISK_WORKOUTS
        {
            OvertrainingRisk::Moderate
        } else {
            OvertrainingRisk::Low
        };

        let active_recovery_days = strains
            .iter()
            .filter(|&&s| s > 0.0 && s < activity::ACTIVE_RECOVERY_STRAIN)
            .count();
        let high_intensity = strains
            .iter()
            .filter(|&&s| s > activity::HIGH_INTENSITY_STRAIN)
            .count();
        let high_share = ratio(high_intensity, strains.len());
        let intensity_balance = if high_share > activity::HIGH_INTENSITY_SHARE {
            IntensityBalance::HighIntensityFocused
        } else if high_share < activity::LOW_INTENSITY_SHARE {
            IntensityBalance::LowIntensityFocused
        } else {
            IntensityBalance::Balanced
        };

        ActivityPatterns {
            weekly_workouts,
            average_strain,
            workout_consistency,
            overtraining_risk,
            active_recovery_days: u32::try_from(active_recovery_days).unwrap_or(u32::MAX),
            intensity_balance,
        }
    }

    /// Day-strain statistics over cycles
    #[must_use]
    pub fn analyze_strain_trend(cycles: &[Cycle]) -> StrainTrend {
        let strains: Vec<f64> = cycles
            .iter()
            .filter(|c| c.is_scored())
            .map(Cycle::strain)
            .collect();
        if strains.is_empty() {
            return StrainTrend {
                pattern: StrainPattern::NoData,
                average_strain: 0.0,
                min_strain: 0.0,
                max_strain: 0.0,
                session_count: 0,
            };
        }

        let average_strain = mean(&strains);
        let pattern = if average_strain > activity::HIGH_DAY_STRAIN {
            StrainPattern::High
        } else if average_strain < activity::LOW_DAY_STRAIN {
            StrainPattern::Low
        } else {
            StrainPattern::Balanced
        };

        StrainTrend {
            pattern,
            average_strain,
            min_strain: statistics::min(&strains),
            max_strain: statistics::max(&strains),
            session_count: strains.len(),
        }
    }
}

/// Scored recovery percentages sorted by creation time
pub(crate) fn chronological_scores(recoveries: &[Recovery]) -> Vec<f64> {
    let mut ordered: Vec<&Recovery> = recoveries.iter().filter(|r| r.is_scored()).collect();
    ordered.sort_by_key(|r| r.created_at);
    ordered.iter().map(|r| r.recovery_score()).collect()
}

/// Workouts per week over the span between first and last workout
fn weekly_frequency(ordered: &[&Workout]) -> u32 {
    let count = u32::try_from(ordered.len()).unwrap_or(u32::MAX);
    let (Some(first), Some(last)) = (ordered.first(), ordered.last()) else {
        return count;
    };
    let span_days = days_between(first.start, last.start);
    if span_days > 0.0 {
        (f64::from(count) * 7.0 / span_days).floor() as u32
    } else {
        count
    }
}

fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 1000.0 / SECONDS_PER_DAY
}
