// ABOUTME: Application constants for the WHOOP API and request defaults
// ABOUTME: Endpoint paths, OAuth URLs, pagination and throttling defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module organized by domain

/// Provider identifiers used in logs and errors
pub mod providers {
    /// WHOOP provider name
    pub const WHOOP: &str = "whoop";
}

/// WHOOP developer API endpoints
pub mod whoop_api {
    /// Production API base URL
    pub const BASE_URL: &str = "https://api.prod.whoop.com/developer";
    /// OAuth token endpoint used for refresh-token grants
    pub const TOKEN_URL: &str = "https://api.prod.whoop.com/oauth/oauth2/token";
    /// Basic profile of the authenticated user
    pub const USER_PROFILE_PATH: &str = "/v2/user/profile/basic";
    /// Recovery collection
    pub const RECOVERY_PATH: &str = "/v2/recovery";
    /// Sleep collection
    pub const SLEEP_PATH: &str = "/v2/activity/sleep";
    /// Workout collection
    pub const WORKOUT_PATH: &str = "/v2/activity/workout";
    /// Physiological cycle collection
    pub const CYCLE_PATH: &str = "/v2/cycle";
    /// Query parameter carrying the pagination cursor
    pub const CURSOR_PARAM: &str = "nextToken";
    /// Scope requested on refresh
    pub const REFRESH_SCOPE: &str = "offline";
    /// User agent sent with every request
    pub const USER_AGENT: &str = concat!("wellness-mcp-server/", env!("CARGO_PKG_VERSION"));
}

/// Request defaults
pub mod defaults {
    /// Records requested per page
    pub const PAGE_SIZE: u32 = 25;
    /// Largest page the API accepts
    pub const MAX_PAGE_SIZE: u32 = 50;
    /// Sustained outbound rate (requests per minute)
    pub const REQUESTS_PER_MINUTE: u32 = 100;
    /// Burst allowance above the sustained rate
    pub const BURST_CAPACITY: u32 = 10;
    /// Longest a caller waits for a rate-limiter slot
    pub const RATE_LIMIT_MAX_WAIT_SECS: u64 = 60;
    /// Per-call HTTP timeout
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Connection timeout
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Trend request limits
pub mod trend {
    /// Default number of days analyzed
    pub const DEFAULT_DAYS: u32 = 14;
    /// Smallest accepted window
    pub const MIN_DAYS: u32 = 7;
    /// Largest accepted window
    pub const MAX_DAYS: u32 = 90;
    /// Window used by the recent-health resource
    pub const RECENT_DAYS: u32 = 7;
}
