// ABOUTME: Integration tests for concurrent health data aggregation against a mock WHOOP API
// ABOUTME: Covers user resolution, complete batches and all-or-nothing failure semantics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use common::{mount_collection, mount_profile, recovery, sleep, workout};
use serde_json::json;
use wellness_core::errors::ErrorCode;
use wellness_core::models::{Credential, DateWindow};
use wellness_mcp_server::aggregator::HealthDataAggregator;
use wellness_providers::WhoopClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn window() -> DateWindow {
    DateWindow::from_iso_dates("2025-03-01", "2025-03-07").unwrap()
}

fn aggregator_for(server: &MockServer) -> HealthDataAggregator {
    let client =
        WhoopClient::new(Credential::bearer("token-a"), common::config_for(server)).unwrap();
    HealthDataAggregator::new(Arc::new(client))
}

#[tokio::test]
async fn test_collect_resolves_user_and_fills_every_kind() {
    let server = MockServer::start().await;
    mount_profile(&server, 42).await;
    mount_collection(&server, "/v2/recovery", vec![recovery(1, 70.0), recovery(2, 55.0)]).await;
    mount_collection(&server, "/v2/activity/sleep", vec![sleep("s-1", 2)]).await;
    mount_collection(&server, "/v2/activity/workout", vec![workout("w-1", 3, 12.5)]).await;
    mount_collection(&server, "/v2/cycle", vec![]).await;

    let (user_id, batch) = aggregator_for(&server)
        .collect(window(), None)
        .await
        .unwrap();

    assert_eq!(user_id, 42);
    assert_eq!(batch.recoveries.len(), 2);
    assert_eq!(batch.sleeps.len(), 1);
    assert_eq!(batch.workouts.len(), 1);
    assert!(batch.cycles.is_empty());
}

#[tokio::test]
async fn test_explicit_user_id_skips_profile_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/user/profile/basic"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user_id": 1})))
        .expect(0)
        .mount(&server)
        .await;
    for collection in ["/v2/recovery", "/v2/activity/sleep", "/v2/activity/workout", "/v2/cycle"] {
        mount_collection(&server, collection, vec![]).await;
    }

    let (user_id, batch) = aggregator_for(&server)
        .collect(window(), Some(7))
        .await
        .unwrap();

    assert_eq!(user_id, 7);
    assert!(batch.is_empty());
}

#[tokio::test]
async fn test_workout_failure_fails_whole_collection() {
    let server = MockServer::start().await;
    mount_profile(&server, 42).await;
    mount_collection(&server, "/v2/recovery", vec![recovery(1, 70.0)]).await;
    mount_collection(&server, "/v2/activity/sleep", vec![sleep("s-1", 2)]).await;
    mount_collection(&server, "/v2/cycle", vec![]).await;
    Mock::given(method("GET"))
        .and(path("/v2/activity/workout"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let err = aggregator_for(&server)
        .collect(window(), None)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert!(err.provider_error().is_some());
}

#[tokio::test]
async fn test_summarize_produces_no_summary_on_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/user/profile/basic"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let analyzed_at = Utc.with_ymd_and_hms(2025, 3, 8, 9, 0, 0).unwrap();
    let result = aggregator_for(&server)
        .summarize(window(), None, analyzed_at)
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_summarize_reports_window_and_user() {
    let server = MockServer::start().await;
    mount_profile(&server, 42).await;
    mount_collection(&server, "/v2/recovery", vec![recovery(1, 70.0)]).await;
    mount_collection(&server, "/v2/activity/sleep", vec![sleep("s-1", 2)]).await;
    mount_collection(&server, "/v2/activity/workout", vec![]).await;
    mount_collection(&server, "/v2/cycle", vec![]).await;

    let analyzed_at = Utc.with_ymd_and_hms(2025, 3, 8, 9, 0, 0).unwrap();
    let summary = aggregator_for(&server)
        .summarize(window(), None, analyzed_at)
        .await
        .unwrap();

    assert_eq!(summary.user_id, 42);
    assert_eq!(summary.date_range, window());
}
