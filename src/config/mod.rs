// ABOUTME: Configuration module for the wellness MCP server
// ABOUTME: Environment-only settings for credentials, endpoints and throttling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment variable loading
pub mod environment;

pub use environment::ServerConfig;
