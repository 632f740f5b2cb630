// ABOUTME: MCP request processing for the stdio server: lifecycle gate, routing and error mapping
// ABOUTME: Validates JSON-RPC requests, runs tools and resources, and maps AppError codes to JSON-RPC
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};
use wellness_core::errors::{AppError, ErrorCode};

use super::resources::{get_resources, ResourceReader};
use crate::aggregator::HealthDataAggregator;
use crate::constants::protocol::{MCP_PROTOCOL_VERSION, SERVER_NAME, SERVER_VERSION};
use crate::jsonrpc::{error_codes, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
use crate::logging::AppLogger;
use crate::tools::{get_tools, ToolExecutor, ToolRequest};

#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ResourceReadParams {
    uri: String,
}

/// Processes MCP protocol requests with validation, routing, and execution.
///
/// Only `initialize` and `ping` are served before a successful
/// initialization; everything else is answered with `NOT_INITIALIZED`.
pub struct McpRequestProcessor {
    aggregator: HealthDataAggregator,
    executor: ToolExecutor,
    resources: ResourceReader,
    initialized: AtomicBool,
}

impl McpRequestProcessor {
    /// Processor sharing one fetch client across tools and resources
    #[must_use]
    pub fn new(aggregator: HealthDataAggregator) -> Self {
        Self {
            executor: ToolExecutor::new(aggregator.clone()),
            resources: ResourceReader::new(Arc::clone(aggregator.client())),
            aggregator,
            initialized: AtomicBool::new(false),
        }
    }

    /// Whether `initialize` has succeeded
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Handle an MCP request and return a response.
    ///
    /// Notifications are acknowledged in the log only and never answered.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let start_time = Instant::now();
        Self::log_request(&request);

        if request.is_notification() {
            Self::handle_notification(&request);
            Self::log_completion("notification", start_time);
            return None;
        }

        let response = self.process_request(&request).await;
        Self::log_completion("request", start_time);
        Some(response)
    }

    async fn process_request(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        if request.jsonrpc != JSONRPC_VERSION {
            return JsonRpcResponse::error_with_data(
                request.id.clone(),
                error_codes::INVALID_REQUEST,
                "Invalid Request",
                json!(format!(
                    "Invalid JSON-RPC version: got '{}', expected '{JSONRPC_VERSION}'",
                    request.jsonrpc
                )),
            );
        }

        match request.method.as_str() {
            "initialize" => self.handle_initialize(request).await,
            "ping" => JsonRpcResponse::success(request.id.clone(), json!({})),
            _ if !self.is_initialized() => JsonRpcResponse::error_with_data(
                request.id.clone(),
                error_codes::NOT_INITIALIZED,
                "Not initialized",
                json!("Server not initialized"),
            ),
            "tools/list" => Self::handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request).await,
            "resources/list" => Self::handle_resources_list(request),
            "resources/read" => self.handle_resources_read(request).await,
            _ => Self::handle_unknown_method(request),
        }
    }

    /// Validate the WHOOP connection, then report capabilities
    async fn handle_initialize(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        debug!("Handling initialize request");

        if let Err(e) = self.aggregator.client().validate_connection().await {
            warn!("initialize failed: {e}");
            return JsonRpcResponse::error_with_data(
                request.id.clone(),
                error_codes::INTERNAL_ERROR,
                "Internal error",
                json!(format!("Failed to connect to WHOOP API: {e}")),
            );
        }

        self.initialized.store(true, Ordering::Release);
        info!("MCP session initialized");

        JsonRpcResponse::success(
            request.id.clone(),
            json!({
                "protocolVersion": MCP_PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {},
                    "resources": {}
                },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": SERVER_VERSION
                }
            }),
        )
    }

    fn handle_tools_list(request: &JsonRpcRequest) -> JsonRpcResponse {
        debug!("Handling tools/list request");
        JsonRpcResponse::success(request.id.clone(), json!({ "tools": get_tools() }))
    }

    async fn handle_tools_call(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let params: ToolCallParams = match Self::params(request) {
            Ok(params) => params,
            Err(response) => return *response,
        };
        debug!(tool = %params.name, "Handling tools/call request");

        let tool_request = match ToolRequest::parse(&params.name, params.arguments) {
            Ok(tool_request) => tool_request,
            Err(e) => {
                AppLogger::log_mcp_tool_call(&params.name, false, 0);
                return Self::error_response(request, &e);
            }
        };

        let start_time = Instant::now();
        let outcome = self.executor.execute(&tool_request, Utc::now()).await;
        let duration_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX);
        AppLogger::log_mcp_tool_call(&params.name, outcome.is_ok(), duration_ms);

        match outcome {
            Ok(text) => JsonRpcResponse::success(
                request.id.clone(),
                json!({ "content": [{ "type": "text", "text": text }] }),
            ),
            Err(e) => Self::error_response(request, &e),
        }
    }

    fn handle_resources_list(request: &JsonRpcRequest) -> JsonRpcResponse {
        debug!("Handling resources/list request");
        JsonRpcResponse::success(
            request.id.clone(),
            json!({ "resources": get_resources() }),
        )
    }

    async fn handle_resources_read(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let params: ResourceReadParams = match Self::params(request) {
            Ok(params) => params,
            Err(response) => return *response,
        };
        debug!(uri = %params.uri, "Handling resources/read request");

        match self.resources.read(&params.uri, Utc::now()).await {
            Ok(contents) => {
                JsonRpcResponse::success(request.id.clone(), json!({ "contents": [contents] }))
            }
            Err(e) => Self::error_response(request, &e),
        }
    }

    fn handle_unknown_method(request: &JsonRpcRequest) -> JsonRpcResponse {
        warn!("Unknown MCP method: {}", request.method);
        JsonRpcResponse::error_with_data(
            request.id.clone(),
            error_codes::METHOD_NOT_FOUND,
            "Method not found",
            json!(request.method),
        )
    }

    fn handle_notification(request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" => debug!("Client finished initialization"),
            "notifications/cancelled" => debug!("Request cancelled notification received"),
            method => debug!("Ignoring notification: {method}"),
        }
    }

    /// Decode request params, or the `INVALID_PARAMS` response to send instead
    fn params<T: DeserializeOwned>(
        request: &JsonRpcRequest,
    ) -> Result<T, Box<JsonRpcResponse>> {
        let params = request.params.clone().unwrap_or(Value::Null);
        serde_json::from_value(params).map_err(|e| {
            Box::new(JsonRpcResponse::error_with_data(
                request.id.clone(),
                error_codes::INVALID_PARAMS,
                "Invalid params",
                json!(format!("Invalid params for {}: {e}", request.method)),
            ))
        })
    }

    /// Caller mistakes map to `INVALID_PARAMS`, everything else (including
    /// upstream 404s) to `INTERNAL_ERROR`.
    ///
    /// `data` is the error message, or for WHOOP API failures an object that
    /// also says whether retrying later may help.
    fn error_response(request: &JsonRpcRequest, error: &AppError) -> JsonRpcResponse {
        let unknown_local_resource =
            error.code == ErrorCode::ResourceNotFound && error.provider_error().is_none();
        let (code, message) =
            if error.code.is_client_error() || unknown_local_resource {
                (error_codes::INVALID_PARAMS, "Invalid params")
            } else {
                (error_codes::INTERNAL_ERROR, "Internal error")
            };
        warn!(
            method = %request.method,
            error_code = ?error.code,
            "MCP request failed: {error}"
        );
        JsonRpcResponse::error_with_data(request.id.clone(), code, message, Self::error_data(error))
    }

    fn error_data(error: &AppError) -> Value {
        let Some(provider_error) = error.provider_error() else {
            return json!(error.message);
        };
        let mut data = json!({
            "message": error.message,
            "retryable": provider_error.is_retryable(),
        });
        if let Some(status) = provider_error.status_code() {
            data["upstreamStatus"] = json!(status);
        }
        data
    }

    fn log_request(request: &JsonRpcRequest) {
        debug!(
            mcp_method = %request.method,
            mcp_id = ?request.id,
            mcp_params_preview = ?request.params.as_ref().map(|p| {
                let s = p.to_string();
                if s.len() > 100 {
                    format!("{}...[truncated]", s.chars().take(100).collect::<String>())
                } else {
                    s
                }
            }),
            "Received MCP request"
        );
    }

    fn log_completion(request_type: &str, start_time: Instant) {
        debug!(
            duration_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(0),
            "Completed MCP {request_type} processing"
        );
    }
}
