// ABOUTME: Main library entry point for the WHOOP wellness MCP server
// ABOUTME: Aggregation, tool execution, report formatting and the stdio MCP protocol
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Wellness MCP Server
//!
//! A Model Context Protocol (MCP) server that turns WHOOP recovery, sleep,
//! workout and cycle records into therapy-oriented health reports.
//!
//! ## Architecture
//!
//! - **`wellness-core`**: errors, record models, date windows, summaries
//! - **`wellness-providers`**: rate-limited, paginated WHOOP client with token refresh
//! - **`wellness-intelligence`**: statistics, insights and red-flag rules
//! - **this crate**: concurrent aggregation, validated tool requests, Markdown
//!   reports and the JSON-RPC stdio transport
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use wellness_core::errors::AppResult;
//! use wellness_mcp_server::aggregator::HealthDataAggregator;
//! use wellness_mcp_server::config::ServerConfig;
//! use wellness_mcp_server::mcp::McpServer;
//! use wellness_providers::WhoopClient;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     let client = WhoopClient::new(config.credential, config.client)?;
//!     let server = McpServer::new(HealthDataAggregator::new(Arc::new(client)));
//!     server.run_stdio().await
//! }
//! ```

/// Concurrent collection of record batches
pub mod aggregator;

/// Environment configuration
pub mod config;

/// Protocol, tool, resource and environment constants
pub mod constants;

/// Markdown and JSON report rendering
pub mod formatters;

/// JSON-RPC 2.0 envelope types
pub mod jsonrpc;

/// Structured logging setup
pub mod logging;

/// MCP request processing, resources and stdio transport
pub mod mcp;

/// Tool requests, schemas and execution
pub mod tools;
