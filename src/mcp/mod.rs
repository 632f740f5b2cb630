// ABOUTME: Model Context Protocol surface of the wellness server
// ABOUTME: Request processing, resources and the stdio transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Lifecycle gate, routing and error mapping
pub mod request_processor;
/// Profile and recent-data resources
pub mod resources;
/// Line-delimited stdio transport
pub mod server;

pub use request_processor::McpRequestProcessor;
pub use server::McpServer;
