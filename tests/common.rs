// ABOUTME: Shared fixtures for root integration tests: mock WHOOP endpoints and record payloads
// ABOUTME: Builds client configs pointed at a wiremock server and canned JSON records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `wellness_mcp_server`

use serde_json::{json, Value};
use wellness_providers::WhoopClientConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Client config whose API and token URLs point at `server`
pub fn config_for(server: &MockServer) -> WhoopClientConfig {
    WhoopClientConfig {
        base_url: server.uri(),
        token_url: format!("{}/oauth/oauth2/token", server.uri()),
        ..WhoopClientConfig::default()
    }
}

pub async fn mount_profile(server: &MockServer, user_id: i64) {
    Mock::given(method("GET"))
        .and(path("/v2/user/profile/basic"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_id": user_id,
            "email": "member@example.com",
            "first_name": "Sam",
            "last_name": "Rivera"
        })))
        .mount(server)
        .await;
}

/// Single-page collection response for `collection_path`
pub async fn mount_collection(server: &MockServer, collection_path: &str, records: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(collection_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": records,
            "next_token": null
        })))
        .mount(server)
        .await;
}

pub fn recovery(cycle_id: i64, score: f64) -> Value {
    json!({
        "cycle_id": cycle_id,
        "sleep_id": format!("sleep-{cycle_id}"),
        "user_id": 42,
        "created_at": format!("2025-03-0{cycle_id}T07:00:00Z"),
        "updated_at": format!("2025-03-0{cycle_id}T07:00:00Z"),
        "score_state": "SCORED",
        "score": {
            "user_calibrating": false,
            "recovery_score": score,
            "resting_heart_rate": 55.0,
            "hrv_rmssd_milli": 60.0
        }
    })
}

pub fn sleep(id: &str, day: u32) -> Value {
    json!({
        "id": id,
        "user_id": 42,
        "created_at": format!("2025-03-0{day}T07:00:00Z"),
        "updated_at": format!("2025-03-0{day}T07:00:00Z"),
        "start": format!("2025-03-0{}T23:00:00Z", day - 1),
        "end": format!("2025-03-0{day}T07:00:00Z"),
        "timezone_offset": "+00:00",
        "nap": false,
        "score_state": "SCORED",
        "score": {
            "stage_summary": {
                "total_in_bed_time_milli": 28_800_000,
                "total_awake_time_milli": 1_800_000,
                "disturbance_count": 3
            },
            "sleep_needed": {
                "baseline_milli": 28_800_000
            },
            "sleep_efficiency_percentage": 92.0
        }
    })
}

pub fn workout(id: &str, day: u32, strain: f64) -> Value {
    json!({
        "id": id,
        "user_id": 42,
        "created_at": format!("2025-03-0{day}T18:00:00Z"),
        "updated_at": format!("2025-03-0{day}T18:00:00Z"),
        "start": format!("2025-03-0{day}T17:00:00Z"),
        "end": format!("2025-03-0{day}T18:00:00Z"),
        "timezone_offset": "+00:00",
        "sport_name": "running",
        "score_state": "SCORED",
        "score": {
            "strain": strain,
            "average_heart_rate": 140,
            "max_heart_rate": 172
        }
    })
}
