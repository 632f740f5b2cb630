// ABOUTME: Concurrent collection of the four WHOOP record kinds for one reporting window
// ABOUTME: Fans out fetches on a JoinSet and fails the whole request if any kind fails
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health data aggregation.
//!
//! One aggregated request resolves the user, then fetches recoveries, sleeps,
//! workouts and cycles concurrently through a single shared [`WhoopClient`].
//! Partial results are never returned: a failure of any kind discards the
//! batches that did succeed.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::task::JoinSet;
use tracing::{debug, instrument, warn};
use wellness_core::errors::{AppError, AppResult, ProviderResult};
use wellness_core::models::{
    Cycle, DateWindow, HealthDataBatch, HealthSummary, RecordKind, Recovery, Sleep, Workout,
};
use wellness_intelligence::HealthAnalyzer;
use wellness_providers::WhoopClient;

/// Output of one fetch task
enum Fetched {
    Recoveries(Vec<Recovery>),
    Sleeps(Vec<Sleep>),
    Workouts(Vec<Workout>),
    Cycles(Vec<Cycle>),
}

impl Fetched {
    const fn kind(&self) -> RecordKind {
        match self {
            Self::Recoveries(_) => RecordKind::Recovery,
            Self::Sleeps(_) => RecordKind::Sleep,
            Self::Workouts(_) => RecordKind::Workout,
            Self::Cycles(_) => RecordKind::Cycle,
        }
    }

    fn store(self, batch: &mut HealthDataBatch) {
        match self {
            Self::Recoveries(records) => batch.recoveries = records,
            Self::Sleeps(records) => batch.sleeps = records,
            Self::Workouts(records) => batch.workouts = records,
            Self::Cycles(records) => batch.cycles = records,
        }
    }
}

/// Collects complete record batches for analysis
#[derive(Clone)]
pub struct HealthDataAggregator {
    client: Arc<WhoopClient>,
}

impl HealthDataAggregator {
    /// Aggregator over a shared fetch client
    #[must_use]
    pub const fn new(client: Arc<WhoopClient>) -> Self {
        Self { client }
    }

    /// Underlying fetch client
    #[must_use]
    pub const fn client(&self) -> &Arc<WhoopClient> {
        &self.client
    }

    /// Fetch all four record kinds for `window`.
    ///
    /// When `user_id` is `None` it is resolved with one profile call first.
    /// The four fetches run concurrently and are all awaited; the first
    /// failure in completion order is returned.
    ///
    /// # Errors
    ///
    /// Returns the mapped provider error of the profile call or of the first
    /// failed fetch, or `InternalError` if a fetch task panicked.
    #[instrument(skip(self), fields(start = %window.start_date(), end = %window.end_date()))]
    pub async fn collect(
        &self,
        window: DateWindow,
        user_id: Option<i64>,
    ) -> AppResult<(i64, HealthDataBatch)> {
        let user_id = match user_id {
            Some(id) => id,
            None => self.client.get_user_profile().await?.user_id,
        };

        let mut tasks = self.spawn_fetches(window);
        let mut batch = HealthDataBatch::default();
        let mut first_error: Option<AppError> = None;

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(fetched)) => {
                    debug!(kind = %fetched.kind(), "record fetch completed");
                    fetched.store(&mut batch);
                }
                Ok(Err(e)) => {
                    warn!("record fetch failed: {e}");
                    if first_error.is_none() {
                        first_error = Some(AppError::from(e));
                    }
                }
                Err(e) => {
                    warn!("record fetch task aborted: {e}");
                    if first_error.is_none() {
                        first_error = Some(AppError::internal(format!("fetch task failed: {e}")));
                    }
                }
            }
        }

        if let Some(error) = first_error {
            return Err(error);
        }

        debug!(
            user_id,
            recoveries = batch.recoveries.len(),
            sleeps = batch.sleeps.len(),
            workouts = batch.workouts.len(),
            cycles = batch.cycles.len(),
            "health data collected"
        );
        Ok((user_id, batch))
    }

    /// Collect and analyze one window.
    ///
    /// # Errors
    ///
    /// Propagates any [`collect`](Self::collect) failure; analysis itself
    /// cannot fail.
    pub async fn summarize(
        &self,
        window: DateWindow,
        user_id: Option<i64>,
        analyzed_at: DateTime<Utc>,
    ) -> AppResult<HealthSummary> {
        let (user_id, batch) = self.collect(window, user_id).await?;
        Ok(HealthAnalyzer::analyze_health_summary(
            &batch,
            window,
            user_id,
            analyzed_at,
        ))
    }

    fn spawn_fetches(&self, window: DateWindow) -> JoinSet<ProviderResult<Fetched>> {
        let mut tasks = JoinSet::new();

        let client = Arc::clone(&self.client);
        tasks.spawn(async move {
            client
                .get_recoveries(&window)
                .await
                .map(Fetched::Recoveries)
        });

        let client = Arc::clone(&self.client);
        tasks.spawn(async move { client.get_sleeps(&window).await.map(Fetched::Sleeps) });

        let client = Arc::clone(&self.client);
        tasks.spawn(async move { client.get_workouts(&window).await.map(Fetched::Workouts) });

        let client = Arc::clone(&self.client);
        tasks.spawn(async move { client.get_cycles(&window).await.map(Fetched::Cycles) });

        tasks
    }
}
