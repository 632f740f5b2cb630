// ABOUTME: Wellness tool surface: typed requests, advertised schemas and execution
// ABOUTME: Arguments are validated into ToolRequest variants before any remote call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Tool execution against the fetch client and analyzer
pub mod executor;
/// Argument parsing and validation
pub mod requests;
/// Schemas advertised by `tools/list`
pub mod schema;

pub use executor::ToolExecutor;
pub use requests::{ToolRequest, TrendMetric, TrendQuery, WindowQuery};
pub use schema::{get_tools, ToolSchema};
