// ABOUTME: Executes validated tool requests against the fetch client and analysis engine
// ABOUTME: Fetches only the record kinds each tool needs and renders the Markdown report
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};
use wellness_core::errors::AppResult;
use wellness_core::models::DateWindow;
use wellness_intelligence::HealthAnalyzer;
use wellness_providers::WhoopClient;

use super::requests::{ToolRequest, TrendMetric, TrendQuery, WindowQuery};
use crate::aggregator::HealthDataAggregator;
use crate::formatters;

/// Runs tool requests and produces report text
#[derive(Clone)]
pub struct ToolExecutor {
    aggregator: HealthDataAggregator,
}

impl ToolExecutor {
    /// Executor sharing the aggregator's fetch client
    #[must_use]
    pub const fn new(aggregator: HealthDataAggregator) -> Self {
        Self { aggregator }
    }

    fn client(&self) -> &Arc<WhoopClient> {
        self.aggregator.client()
    }

    /// Execute one request.
    ///
    /// `now` anchors trailing trend windows and stamps red flags.
    ///
    /// # Errors
    ///
    /// Propagates fetch failures; no partial report is produced.
    #[instrument(skip(self, request, now), fields(tool = request.tool_name()))]
    pub async fn execute(&self, request: &ToolRequest, now: DateTime<Utc>) -> AppResult<String> {
        match request {
            ToolRequest::HealthSummary(query) => {
                let summary = self
                    .aggregator
                    .summarize(query.window, query.user_id, now)
                    .await?;
                Ok(formatters::format_health_summary(&summary))
            }
            ToolRequest::StressIndicators(query) => self.stress_report(query).await,
            ToolRequest::SleepPatterns(query) => self.sleep_report(query).await,
            ToolRequest::ActivityPatterns(query) => self.activity_report(query).await,
            ToolRequest::HealthTrends(query) => self.trend_report(query, now).await,
        }
    }

    async fn stress_report(&self, query: &WindowQuery) -> AppResult<String> {
        let recoveries = self.client().get_recoveries(&query.window).await?;
        debug!(user_id = ?query.user_id, recoveries = recoveries.len(), "analyzing stress");

        let stress = HealthAnalyzer::analyze_stress_indicators(&recoveries);
        Ok(formatters::format_stress_report(&query.window, &stress))
    }

    async fn sleep_report(&self, query: &WindowQuery) -> AppResult<String> {
        let sleeps = self.client().get_sleeps(&query.window).await?;
        debug!(user_id = ?query.user_id, sleeps = sleeps.len(), "analyzing sleep");

        let analysis = HealthAnalyzer::analyze_sleep_patterns(&sleeps);
        Ok(formatters::format_sleep_report(
            &query.window,
            sleeps.len(),
            &analysis,
        ))
    }

    async fn activity_report(&self, query: &WindowQuery) -> AppResult<String> {
        let client = self.client();
        let (workouts, cycles) = tokio::try_join!(
            client.get_workouts(&query.window),
            client.get_cycles(&query.window)
        )?;
        debug!(
            user_id = ?query.user_id,
            workouts = workouts.len(),
            cycles = cycles.len(),
            "analyzing activity"
        );

        let patterns = HealthAnalyzer::analyze_activity_patterns(&workouts, &cycles);
        Ok(formatters::format_activity_report(
            &query.window,
            workouts.len(),
            &patterns,
        ))
    }

    async fn trend_report(&self, query: &TrendQuery, now: DateTime<Utc>) -> AppResult<String> {
        let window = DateWindow::trailing_days(query.days, now);
        debug!(
            user_id = ?query.user_id,
            metric = %query.metric,
            days = query.days,
            "analyzing trend"
        );

        let report = match query.metric {
            TrendMetric::Recovery => {
                let recoveries = self.client().get_recoveries(&window).await?;
                let trend = HealthAnalyzer::analyze_recovery_trend(&recoveries);
                formatters::format_recovery_trend(&trend, query.days)
            }
            TrendMetric::Sleep => {
                let sleeps = self.client().get_sleeps(&window).await?;
                let analysis = HealthAnalyzer::analyze_sleep_patterns(&sleeps);
                formatters::format_sleep_trend(&analysis, query.days)
            }
            TrendMetric::Strain => {
                let cycles = self.client().get_cycles(&window).await?;
                let trend = HealthAnalyzer::analyze_strain_trend(&cycles);
                formatters::format_strain_trend(&trend, query.days)
            }
        };
        Ok(report)
    }
}
