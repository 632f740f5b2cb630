// ABOUTME: WHOOP data provider for the wellness insights server
// ABOUTME: Rate limiter, HTTP client setup, credential persistence and the paginated fetch client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Remote data access for the wellness insights server.
//!
//! [`WhoopClient`] retrieves recovery, sleep, workout and cycle records over a
//! date window. All requests of one client share a token-bucket
//! [`RateLimiter`] and one credential, which is refreshed transparently when
//! the API answers 401.

/// Refreshed-credential persistence
pub mod credentials;
/// HTTP client construction
pub mod http_client;
/// Token-bucket throttling for outbound requests
pub mod rate_limiter;
/// Paginated WHOOP API client
pub mod whoop_client;

pub use credentials::{
    CredentialStore, CredentialStoreError, EnvFileCredentialStore, NoopCredentialStore,
};
pub use http_client::{build_client, HttpClientConfig};
pub use rate_limiter::{RateLimiter, RateLimiterConfig};
pub use wellness_core::errors::{ProviderError, ProviderResult};
pub use whoop_client::{WhoopClient, WhoopClientConfig};
