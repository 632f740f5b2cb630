// ABOUTME: Line-delimited JSON-RPC transport over stdio for the MCP server
// ABOUTME: Reads one request per line, answers parse failures, and writes one response per line
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Stdio transport.
//!
//! Requests are handled one at a time in arrival order. Stdout carries only
//! JSON-RPC responses; diagnostics go to stderr through `tracing`.

use serde_json::{json, Value};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};
use wellness_core::errors::{AppError, AppResult};

use super::request_processor::McpRequestProcessor;
use crate::aggregator::HealthDataAggregator;
use crate::jsonrpc::{error_codes, JsonRpcRequest, JsonRpcResponse};

/// MCP server bound to a line-oriented reader and writer
pub struct McpServer {
    processor: McpRequestProcessor,
}

impl McpServer {
    /// Server over a shared aggregator
    #[must_use]
    pub fn new(aggregator: HealthDataAggregator) -> Self {
        Self {
            processor: McpRequestProcessor::new(aggregator),
        }
    }

    /// Request processor behind this transport
    #[must_use]
    pub const fn processor(&self) -> &McpRequestProcessor {
        &self.processor
    }

    /// Handle one inbound line.
    ///
    /// Blank lines and notifications yield `None`. Invalid JSON yields a
    /// `PARSE_ERROR` with a null id; JSON that is not a request object
    /// yields `INVALID_REQUEST`, echoing its id when one can be read.
    pub async fn handle_message(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!("Discarding unparseable message: {e}");
                return Some(JsonRpcResponse::error_with_data(
                    None,
                    error_codes::PARSE_ERROR,
                    "Parse error",
                    json!(e.to_string()),
                ));
            }
        };

        let id = value.get("id").cloned().filter(|id| !id.is_null());
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.processor.handle_request(request).await,
            Err(e) => {
                warn!("Discarding malformed request: {e}");
                Some(JsonRpcResponse::error_with_data(
                    id,
                    error_codes::INVALID_REQUEST,
                    "Invalid Request",
                    json!(e.to_string()),
                ))
            }
        }
    }

    /// Serve until the reader reaches end of input.
    ///
    /// # Errors
    ///
    /// Returns an error when reading input or writing a response fails.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> AppResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| AppError::internal(format!("Transport error: {e}")))?
        {
            if let Some(response) = self.handle_message(&line).await {
                write_response(&mut writer, &response).await?;
            }
        }

        info!("Input closed, MCP server stopping");
        Ok(())
    }

    /// Serve on the process stdin and stdout.
    ///
    /// # Errors
    ///
    /// Returns an error when stdio fails.
    pub async fn run_stdio(&self) -> AppResult<()> {
        info!("MCP server listening on stdio");
        self.run(BufReader::new(io::stdin()), io::stdout()).await
    }
}

/// Write one response as a single line and flush
///
/// # Errors
///
/// Returns an error if JSON serialization fails or I/O operations fail
pub async fn write_response<W>(writer: &mut W, response: &JsonRpcResponse) -> AppResult<()>
where
    W: AsyncWrite + Unpin,
{
    let response_json = serde_json::to_string(response)
        .map_err(|e| AppError::internal(format!("JSON serialization failed: {e}")))?;
    debug!("Sending MCP response: {response_json}");

    let transport = |e: io::Error| AppError::internal(format!("Transport error: {e}"));
    writer
        .write_all(response_json.as_bytes())
        .await
        .map_err(transport)?;
    writer.write_all(b"\n").await.map_err(transport)?;
    writer.flush().await.map_err(transport)?;
    Ok(())
}
