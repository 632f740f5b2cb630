// ABOUTME: Server-level constants for the MCP protocol surface and environment configuration
// ABOUTME: Protocol version, server identity, tool names, resource URIs and variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module organized by domain

/// MCP protocol identity
pub mod protocol {
    /// MCP protocol revision spoken over stdio
    pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";
    /// Name reported in `serverInfo`
    pub const SERVER_NAME: &str = "whoop-mcp-server";
    /// Version reported in `serverInfo`
    pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// Tool names accepted by `tools/call`
pub mod tools {
    /// Full therapy-session health summary
    pub const GET_HEALTH_SUMMARY: &str = "get_health_summary";
    /// Physiological stress report
    pub const ANALYZE_STRESS_INDICATORS: &str = "analyze_stress_indicators";
    /// Sleep pattern report
    pub const ANALYZE_SLEEP_PATTERNS: &str = "analyze_sleep_patterns";
    /// Activity pattern report
    pub const ANALYZE_ACTIVITY_PATTERNS: &str = "analyze_activity_patterns";
    /// Trailing-window trend report
    pub const ANALYZE_HEALTH_TRENDS: &str = "analyze_health_trends";
}

/// Resource URIs served by `resources/read`
pub mod resources {
    /// Authenticated user's profile
    pub const USER_PROFILE_URI: &str = "whoop://user/profile";
    /// Recent recovery, sleep and workout records
    pub const RECENT_HEALTH_URI: &str = "whoop://health/recent";
    /// MIME type of every resource body
    pub const JSON_MIME_TYPE: &str = "application/json";
}

/// Environment variable names
pub mod env_config {
    /// Bearer access token
    pub const ACCESS_TOKEN: &str = "WHOOP_ACCESS_TOKEN";
    /// Legacy name for the access token
    pub const LEGACY_ACCESS_TOKEN: &str = "WHOOP_API_KEY";
    /// Refresh token
    pub const REFRESH_TOKEN: &str = "WHOOP_REFRESH_TOKEN";
    /// OAuth client id
    pub const CLIENT_ID: &str = "WHOOP_CLIENT_ID";
    /// OAuth client secret
    pub const CLIENT_SECRET: &str = "WHOOP_CLIENT_SECRET";
    /// API base URL override
    pub const API_BASE_URL: &str = "WHOOP_API_BASE_URL";
    /// Token endpoint override
    pub const TOKEN_URL: &str = "WHOOP_TOKEN_URL";
    /// Sustained requests per minute
    pub const RATE_LIMIT: &str = "WHOOP_RATE_LIMIT";
    /// Burst capacity
    pub const RATE_BURST: &str = "WHOOP_RATE_BURST";
    /// Longest rate-limiter wait in seconds
    pub const RATE_LIMIT_WAIT_SECS: &str = "WHOOP_RATE_LIMIT_WAIT_SECS";
    /// Per-call HTTP timeout in seconds
    pub const REQUEST_TIMEOUT: &str = "WHOOP_REQUEST_TIMEOUT";
    /// Records per page
    pub const PAGE_SIZE: &str = "WHOOP_PAGE_SIZE";
    /// File receiving refreshed tokens
    pub const ENV_FILE: &str = "WHOOP_ENV_FILE";
    /// Default for [`ENV_FILE`]
    pub const DEFAULT_ENV_FILE: &str = ".env";
}
