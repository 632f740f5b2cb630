// ABOUTME: Descriptive statistics helpers for health time series
// ABOUTME: Division-safe mean, sample standard deviation, split-half change and extrema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Clippy allowances for this module:
// - cast_precision_loss: sample counts are far below 2^52
#![allow(clippy::cast_precision_loss)]

use wellness_core::models::TrendDirection;

/// Arithmetic mean, 0 for an empty slice
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Integer mean truncated toward zero, 0 for an empty slice
#[must_use]
pub fn mean_truncated(values: &[i32]) -> i64 {
    if values.is_empty() {
        return 0;
    }
    let sum: i64 = values.iter().copied().map(i64::from).sum();
    sum / i64::try_from(values.len()).unwrap_or(i64::MAX)
}

/// Sample standard deviation (n - 1), 0 for fewer than two values
#[must_use]
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }
    let avg = mean(values);
    let sum_squared: f64 = values.iter().map(|v| (v - avg).powi(2)).sum();
    (sum_squared / (values.len() - 1) as f64).sqrt()
}

/// `1 - stdev/scale`, floored at zero
#[must_use]
pub fn consistency(values: &[f64], scale: f64) -> f64 {
    (1.0 - sample_std_dev(values) / scale).max(0.0)
}

/// Mean of the second half minus mean of the first half.
///
/// The split is at `len / 2`, so an odd middle element lands in the second half.
#[must_use]
pub fn split_half_change(values: &[f64]) -> f64 {
    let (first, second) = values.split_at(values.len() / 2);
    mean(second) - mean(first)
}

/// Classify a change against a symmetric threshold
#[must_use]
pub fn classify_change(change: f64, threshold: f64) -> TrendDirection {
    if change > threshold {
        TrendDirection::Improving
    } else if change < -threshold {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    }
}

/// Smallest value, 0 for an empty slice
#[must_use]
pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

/// Largest value, 0 for an empty slice
#[must_use]
pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

/// Share of `count` over `total`, 0 when `total` is zero
#[must_use]
pub fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_inputs_are_zero() {
        assert!(mean(&[]).abs() < f64::EPSILON);
        assert_eq!(mean_truncated(&[]), 0);
        assert!(sample_std_dev(&[]).abs() < f64::EPSILON);
        assert!(sample_std_dev(&[4.0]).abs() < f64::EPSILON);
        assert!(min(&[]).abs() < f64::EPSILON);
        assert!(ratio(3, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sample_std_dev() {
        // Sample variance of 2,4,4,4,5,5,7,9 is 32/7
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((sample_std_dev(&values) - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_mean_truncated() {
        assert_eq!(mean_truncated(&[1, 2, 2]), 1);
        assert_eq!(mean_truncated(&[3, 4]), 3);
    }

    #[test]
    fn test_split_half_change_puts_middle_in_second_half() {
        let values = [70.0, 70.0, 70.0, 70.0, 70.0, 90.0, 90.0];
        // first = 3 x 70, second = 70, 70, 90, 90
        assert!((split_half_change(&values) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_consistency_is_floored() {
        assert!(consistency(&[0.0, 100.0, 0.0, 100.0], 10.0).abs() < f64::EPSILON);
        assert!((consistency(&[5.0, 5.0], 10.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_extrema() {
        assert!((min(&[3.0, 1.5, 9.0]) - 1.5).abs() < f64::EPSILON);
        assert!((max(&[3.0, 1.5, 9.0]) - 9.0).abs() < f64::EPSILON);
    }
}
