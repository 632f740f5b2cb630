// ABOUTME: Integration tests for MCP request dispatch over the line-delimited JSON-RPC transport
// ABOUTME: Covers the initialization gate, error code mapping, tool calls, resources and the stdio loop
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use common::{config_for, mount_collection, mount_profile, recovery, sleep, workout};
use serde_json::{json, Value};
use tokio::io::BufReader;
use wellness_core::models::Credential;
use wellness_mcp_server::aggregator::HealthDataAggregator;
use wellness_mcp_server::jsonrpc::{error_codes, JsonRpcResponse};
use wellness_mcp_server::mcp::McpServer;
use wellness_providers::WhoopClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn server_for(mock: &MockServer) -> McpServer {
    let client = WhoopClient::new(Credential::bearer("token-a"), config_for(mock)).unwrap();
    McpServer::new(HealthDataAggregator::new(Arc::new(client)))
}

fn request(id: i64, method_name: &str, params: Value) -> String {
    json!({"jsonrpc": "2.0", "id": id, "method": method_name, "params": params}).to_string()
}

async fn call(server: &McpServer, line: &str) -> JsonRpcResponse {
    server
        .handle_message(line)
        .await
        .expect("request should be answered")
}

fn error_code(response: &JsonRpcResponse) -> i32 {
    response.error.as_ref().expect("error response").code
}

async fn initialized(mock: &MockServer) -> McpServer {
    mount_profile(mock, 42).await;
    let server = server_for(mock);
    let response = call(&server, &request(1, "initialize", json!({}))).await;
    assert!(response.is_success(), "initialize failed: {response:?}");
    server
}

async fn mount_all_collections(mock: &MockServer) {
    mount_collection(mock, "/v2/recovery", vec![recovery(1, 72.0), recovery(2, 48.0)]).await;
    mount_collection(mock, "/v2/activity/sleep", vec![sleep("s-1", 2), sleep("s-2", 3)]).await;
    mount_collection(mock, "/v2/activity/workout", vec![workout("w-1", 2, 11.0)]).await;
    mount_collection(mock, "/v2/cycle", vec![]).await;
}

fn tool_text(response: &JsonRpcResponse) -> String {
    let result = response.result.as_ref().expect("tool result");
    result["content"][0]["text"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn test_methods_rejected_before_initialize() {
    let mock = MockServer::start().await;
    let server = server_for(&mock);

    let response = call(&server, &request(1, "tools/list", json!({}))).await;

    assert_eq!(error_code(&response), error_codes::NOT_INITIALIZED);
    assert_eq!(response.id, Some(json!(1)));
    assert!(!server.processor().is_initialized());
}

#[tokio::test]
async fn test_ping_allowed_before_initialize() {
    let mock = MockServer::start().await;
    let server = server_for(&mock);

    let response = call(&server, &request(4, "ping", json!({}))).await;

    assert!(response.is_success());
}

#[tokio::test]
async fn test_unparseable_line_gets_parse_error_with_null_id() {
    let mock = MockServer::start().await;
    let server = server_for(&mock);

    let response = call(&server, "{not json").await;

    assert_eq!(error_code(&response), error_codes::PARSE_ERROR);
    assert_eq!(response.id, None);
    let line = serde_json::to_value(&response).unwrap();
    assert_eq!(line["id"], Value::Null);
}

#[tokio::test]
async fn test_non_request_json_is_invalid_request() {
    let mock = MockServer::start().await;
    let server = server_for(&mock);

    let response = call(&server, r#"{"jsonrpc":"2.0","id":9}"#).await;

    assert_eq!(error_code(&response), error_codes::INVALID_REQUEST);
    assert_eq!(response.id, Some(json!(9)));
}

#[tokio::test]
async fn test_notifications_and_blank_lines_are_not_answered() {
    let mock = MockServer::start().await;
    let server = server_for(&mock);

    let notification = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});
    assert!(server.handle_message(&notification.to_string()).await.is_none());
    assert!(server.handle_message("   ").await.is_none());
}

#[tokio::test]
async fn test_initialize_reports_server_info() {
    let mock = MockServer::start().await;
    mount_profile(&mock, 42).await;
    let server = server_for(&mock);

    let response = call(&server, &request(1, "initialize", json!({}))).await;

    let result = response.result.expect("initialize result");
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "whoop-mcp-server");
    assert!(result["capabilities"]["tools"].is_object());
    assert!(server.processor().is_initialized());
}

#[tokio::test]
async fn test_initialize_fails_when_whoop_unreachable() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/user/profile/basic"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock)
        .await;
    let server = server_for(&mock);

    let response = call(&server, &request(1, "initialize", json!({}))).await;

    assert_eq!(error_code(&response), error_codes::INTERNAL_ERROR);
    let data = response.error.unwrap().data.unwrap();
    assert!(data
        .as_str()
        .unwrap()
        .starts_with("Failed to connect to WHOOP API"));
    assert!(!server.processor().is_initialized());
}

#[tokio::test]
async fn test_tools_list_returns_all_tools() {
    let mock = MockServer::start().await;
    let server = initialized(&mock).await;

    let response = call(&server, &request(2, "tools/list", json!({}))).await;

    let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec![
            "get_health_summary",
            "analyze_stress_indicators",
            "analyze_sleep_patterns",
            "analyze_activity_patterns",
            "analyze_health_trends"
        ]
    );
    assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
}

#[tokio::test]
async fn test_bad_dates_are_invalid_params() {
    let mock = MockServer::start().await;
    let server = initialized(&mock).await;

    let params = json!({
        "name": "get_health_summary",
        "arguments": {"start_date": "03/01/2025", "end_date": "2025-03-07"}
    });
    let response = call(&server, &request(3, "tools/call", params)).await;

    assert_eq!(error_code(&response), error_codes::INVALID_PARAMS);
}

#[tokio::test]
async fn test_unknown_tool_is_invalid_params() {
    let mock = MockServer::start().await;
    let server = initialized(&mock).await;

    let params = json!({"name": "get_weather", "arguments": {}});
    let response = call(&server, &request(3, "tools/call", params)).await;

    assert_eq!(error_code(&response), error_codes::INVALID_PARAMS);
    let data = response.error.unwrap().data.unwrap();
    assert_eq!(data, "Unknown tool: get_weather");
}

#[tokio::test]
async fn test_unknown_method_is_method_not_found() {
    let mock = MockServer::start().await;
    let server = initialized(&mock).await;

    let response = call(&server, &request(5, "prompts/list", json!({}))).await;

    assert_eq!(error_code(&response), error_codes::METHOD_NOT_FOUND);
    assert_eq!(response.error.unwrap().data, Some(json!("prompts/list")));
}

#[tokio::test]
async fn test_health_summary_tool_returns_markdown() {
    let mock = MockServer::start().await;
    mount_all_collections(&mock).await;
    let server = initialized(&mock).await;

    let params = json!({
        "name": "get_health_summary",
        "arguments": {"start_date": "2025-03-01", "end_date": "2025-03-07"}
    });
    let response = call(&server, &request(6, "tools/call", params)).await;

    let text = tool_text(&response);
    assert!(text.starts_with("# Health Summary for Therapy Session"));
    assert!(text.contains("## Recovery Trends"));
    assert!(text.contains("## Sleep Analysis"));
}

#[tokio::test]
async fn test_upstream_failure_is_internal_error() {
    let mock = MockServer::start().await;
    mount_collection(&mock, "/v2/recovery", vec![]).await;
    mount_collection(&mock, "/v2/activity/sleep", vec![]).await;
    mount_collection(&mock, "/v2/cycle", vec![]).await;
    Mock::given(method("GET"))
        .and(path("/v2/activity/workout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock)
        .await;
    let server = initialized(&mock).await;

    let params = json!({
        "name": "get_health_summary",
        "arguments": {"start_date": "2025-03-01", "end_date": "2025-03-07"}
    });
    let response = call(&server, &request(7, "tools/call", params)).await;

    assert_eq!(error_code(&response), error_codes::INTERNAL_ERROR);
    assert!(response.result.is_none());
    let data = response.error.unwrap().data.unwrap();
    assert_eq!(data["retryable"], true);
    assert_eq!(data["upstreamStatus"], 500);
    assert!(data["message"].is_string());
}

#[tokio::test]
async fn test_upstream_forbidden_is_not_retryable() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/recovery"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock)
        .await;
    let server = initialized(&mock).await;

    let params = json!({
        "name": "analyze_stress_indicators",
        "arguments": {"start_date": "2025-03-01", "end_date": "2025-03-07"}
    });
    let response = call(&server, &request(11, "tools/call", params)).await;

    assert_eq!(error_code(&response), error_codes::INTERNAL_ERROR);
    let data = response.error.unwrap().data.unwrap();
    assert_eq!(data["retryable"], false);
    assert_eq!(data["upstreamStatus"], 403);
}

#[tokio::test]
async fn test_resources_list_and_unknown_uri() {
    let mock = MockServer::start().await;
    let server = initialized(&mock).await;

    let listed = call(&server, &request(8, "resources/list", json!({}))).await;
    let resources = listed.result.unwrap()["resources"].as_array().unwrap().len();
    assert_eq!(resources, 2);

    let params = json!({"uri": "whoop://nowhere"});
    let response = call(&server, &request(9, "resources/read", params)).await;
    assert_eq!(error_code(&response), error_codes::INVALID_PARAMS);
}

#[tokio::test]
async fn test_profile_resource_is_json() {
    let mock = MockServer::start().await;
    let server = initialized(&mock).await;

    let params = json!({"uri": "whoop://user/profile"});
    let response = call(&server, &request(10, "resources/read", params)).await;

    let contents = &response.result.unwrap()["contents"][0];
    assert_eq!(contents["mimeType"], "application/json");
    let profile: Value = serde_json::from_str(contents["text"].as_str().unwrap()).unwrap();
    assert_eq!(profile["user_id"], 42);
}

#[tokio::test]
async fn test_run_answers_each_request_on_its_own_line() {
    let mock = MockServer::start().await;
    mount_profile(&mock, 42).await;
    let server = server_for(&mock);

    let input = [
        request(1, "initialize", json!({})),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string(),
        String::new(),
        request(2, "ping", json!({})),
        "garbage".to_owned(),
    ]
    .join("\n");
    let mut output = Vec::new();

    server
        .run(BufReader::new(input.as_bytes()), &mut output)
        .await
        .unwrap();

    let lines: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["id"], 1);
    assert_eq!(lines[1]["id"], 2);
    assert_eq!(lines[2]["error"]["code"], error_codes::PARSE_ERROR);
}
