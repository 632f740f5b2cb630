// ABOUTME: Health analysis engine for WHOOP recovery, sleep, workout and cycle records
// ABOUTME: Trend statistics, stress and activity patterns, therapy insights and red flags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Wellness Intelligence
//!
//! Pure computations over record batches already fetched from WHOOP. Nothing
//! in this crate performs I/O, so every function is deterministic given its
//! input and an analysis timestamp.
//!
//! ## Modules
//!
//! - **analyzer**: [`HealthAnalyzer`] summaries for recovery, sleep, stress, activity and strain
//! - **insights**: ordered rule tables producing therapy insights and red flags
//! - **narrative**: therapy-oriented interpretation text for reports
//! - **statistics**: means, deviations and split-half trend helpers
//! - **thresholds**: the numeric boundaries shared by the rules

/// Health summary computations
pub mod analyzer;
/// Therapy insight and red flag rules
pub mod insights;
/// Interpretation text for reports
pub mod narrative;
/// Descriptive statistics
pub mod statistics;
/// Rule thresholds and weights
pub mod thresholds;

pub use analyzer::HealthAnalyzer;
pub use insights::{detect_red_flags, generate_therapy_insights};
