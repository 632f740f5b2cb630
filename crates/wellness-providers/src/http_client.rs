// ABOUTME: HTTP client construction for WHOOP API calls
// ABOUTME: Applies per-call and connect timeouts plus the user agent to a pooled reqwest client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use wellness_core::constants::{defaults, providers, whoop_api};
use wellness_core::errors::{ProviderError, ProviderResult};

/// Timeouts applied to every outbound call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Whole-request timeout
    pub timeout: Duration,
    /// TCP/TLS connect timeout
    pub connect_timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(defaults::CONNECT_TIMEOUT_SECS),
        }
    }
}

/// Build a pooled client with the configured timeouts.
///
/// One client is shared by all concurrent fetch tasks of a `WhoopClient`.
///
/// # Errors
///
/// Returns `ConfigurationError` if the TLS backend cannot be initialized.
pub fn build_client(config: &HttpClientConfig) -> ProviderResult<Client> {
    ClientBuilder::new()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(whoop_api::USER_AGENT)
        .build()
        .map_err(|e| ProviderError::ConfigurationError {
            provider: providers::WHOOP.to_owned(),
            details: format!("failed to build HTTP client: {e}"),
        })
}

/// Translate a transport failure into the provider taxonomy
pub(crate) fn network_error(err: &reqwest::Error) -> ProviderError {
    let message = if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        format!("request failed: {err}")
    };
    ProviderError::Network {
        provider: providers::WHOOP.to_owned(),
        message,
    }
}
