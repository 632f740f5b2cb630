// ABOUTME: Environment configuration for the WHOOP credential, endpoints and throttling
// ABOUTME: Reads process variables after an optional dotenv load, with logged fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration.
//!
//! All settings come from process variables. A dotenv file (default `.env`,
//! overridable with `WHOOP_ENV_FILE`) is loaded first when present; it never
//! overrides variables already set in the environment.

use std::env;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use tracing::{debug, warn};
use wellness_core::constants::{defaults, whoop_api};
use wellness_core::errors::{AppError, AppResult};
use wellness_core::models::Credential;
use wellness_providers::{HttpClientConfig, RateLimiterConfig, WhoopClientConfig};

use crate::constants::env_config;

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Initial WHOOP credential
    pub credential: Credential,
    /// Fetch client endpoints, paging and throttling
    pub client: WhoopClientConfig,
    /// Dotenv file that receives refreshed tokens
    pub env_file: PathBuf,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when neither `WHOOP_ACCESS_TOKEN` nor
    /// `WHOOP_API_KEY` is set.
    pub fn from_env() -> AppResult<Self> {
        let env_file = env::var(env_config::ENV_FILE)
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map_or_else(|| PathBuf::from(env_config::DEFAULT_ENV_FILE), PathBuf::from);
        Self::from_env_file(env_file)
    }

    /// Load configuration after reading the given dotenv file.
    ///
    /// Refreshed tokens are written back to the same file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when no access token is available.
    pub fn from_env_file(env_file: PathBuf) -> AppResult<Self> {
        load_env_file(&env_file);

        let mut config = Self::from_lookup(|key| env::var(key).ok())?;
        config.env_file = env_file;
        Ok(config)
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when no access token is available.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let access_token = get(env_config::ACCESS_TOKEN)
            .or_else(|| get(env_config::LEGACY_ACCESS_TOKEN))
            .ok_or_else(|| {
                AppError::config_missing(format!(
                    "{} (or {}) must be set",
                    env_config::ACCESS_TOKEN,
                    env_config::LEGACY_ACCESS_TOKEN
                ))
            })?;

        let credential = Credential {
            access_token,
            refresh_token: get(env_config::REFRESH_TOKEN),
            client_id: get(env_config::CLIENT_ID),
            client_secret: get(env_config::CLIENT_SECRET),
        };
        if !credential.can_refresh() {
            debug!("refresh material incomplete; 401 responses will not be retried");
        }

        let client = WhoopClientConfig {
            base_url: get(env_config::API_BASE_URL)
                .unwrap_or_else(|| whoop_api::BASE_URL.to_owned()),
            token_url: get(env_config::TOKEN_URL)
                .unwrap_or_else(|| whoop_api::TOKEN_URL.to_owned()),
            page_size: parse_or_default(&get, env_config::PAGE_SIZE, defaults::PAGE_SIZE),
            http: HttpClientConfig {
                timeout: Duration::from_secs(parse_or_default(
                    &get,
                    env_config::REQUEST_TIMEOUT,
                    defaults::REQUEST_TIMEOUT_SECS,
                )),
                ..HttpClientConfig::default()
            },
            rate_limit: RateLimiterConfig {
                requests_per_minute: parse_or_default(
                    &get,
                    env_config::RATE_LIMIT,
                    defaults::REQUESTS_PER_MINUTE,
                ),
                burst: parse_or_default(&get, env_config::RATE_BURST, defaults::BURST_CAPACITY),
                max_wait: Duration::from_secs(parse_or_default(
                    &get,
                    env_config::RATE_LIMIT_WAIT_SECS,
                    defaults::RATE_LIMIT_MAX_WAIT_SECS,
                )),
            },
        };

        Ok(Self {
            credential,
            client,
            env_file: get(env_config::ENV_FILE)
                .map_or_else(|| PathBuf::from(env_config::DEFAULT_ENV_FILE), PathBuf::from),
        })
    }

    /// One-paragraph description safe for logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Wellness MCP Server Configuration:\n\
             - API Base URL: {}\n\
             - Token Refresh: {}\n\
             - Page Size: {}\n\
             - Rate Limit: {} req/min (burst {}, max wait {}s)\n\
             - Request Timeout: {}s\n\
             - Credential File: {}",
            self.client.base_url,
            if self.credential.can_refresh() {
                "Enabled"
            } else {
                "Disabled"
            },
            self.client.page_size,
            self.client.rate_limit.requests_per_minute,
            self.client.rate_limit.burst,
            self.client.rate_limit.max_wait.as_secs(),
            self.client.http.timeout.as_secs(),
            self.env_file.display(),
        )
    }
}

fn load_env_file(path: &Path) {
    match dotenvy::from_path(path) {
        Ok(()) => debug!(path = %path.display(), "loaded dotenv file"),
        Err(e) if e.not_found() => debug!(path = %path.display(), "no dotenv file"),
        Err(e) => warn!(path = %path.display(), "failed to load dotenv file: {e}"),
    }
}

fn parse_or_default<T, G>(get: &G, key: &str, default: T) -> T
where
    T: FromStr + Display + Copy,
    T::Err: Display,
    G: Fn(&str) -> Option<String>,
{
    get(key).map_or(default, |raw| {
        raw.trim().parse().unwrap_or_else(|e| {
            warn!("{key}={raw} is not valid ({e}); using default {default}");
            default
        })
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use wellness_core::errors::ErrorCode;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> AppResult<ServerConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_missing_token_is_config_missing() {
        let err = config_from(&[]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigMissing);

        let err = config_from(&[("WHOOP_ACCESS_TOKEN", "  ")]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigMissing);
    }

    #[test]
    fn test_defaults_applied() {
        let config = config_from(&[("WHOOP_API_KEY", "legacy-token")]).unwrap();

        assert_eq!(config.credential.access_token, "legacy-token");
        assert!(!config.credential.can_refresh());
        assert_eq!(config.client.base_url, whoop_api::BASE_URL);
        assert_eq!(config.client.page_size, defaults::PAGE_SIZE);
        assert_eq!(config.client.rate_limit.requests_per_minute, 100);
        assert_eq!(config.client.rate_limit.burst, 10);
        assert_eq!(config.client.http.timeout, Duration::from_secs(30));
        assert_eq!(config.env_file, PathBuf::from(".env"));
    }

    #[test]
    fn test_access_token_wins_over_legacy_name() {
        let config = config_from(&[
            ("WHOOP_ACCESS_TOKEN", "primary"),
            ("WHOOP_API_KEY", "legacy"),
            ("WHOOP_REFRESH_TOKEN", "refresh"),
            ("WHOOP_CLIENT_ID", "id"),
            ("WHOOP_CLIENT_SECRET", "secret"),
        ])
        .unwrap();

        assert_eq!(config.credential.access_token, "primary");
        assert!(config.credential.can_refresh());
        assert!(config.summary().contains("Token Refresh: Enabled"));
        assert!(!config.summary().contains("primary"));
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = config_from(&[
            ("WHOOP_ACCESS_TOKEN", "t"),
            ("WHOOP_RATE_LIMIT", "fast"),
            ("WHOOP_RATE_BURST", "4"),
            ("WHOOP_REQUEST_TIMEOUT", "-3"),
            ("WHOOP_PAGE_SIZE", "50"),
        ])
        .unwrap();

        assert_eq!(config.client.rate_limit.requests_per_minute, 100);
        assert_eq!(config.client.rate_limit.burst, 4);
        assert_eq!(config.client.http.timeout, Duration::from_secs(30));
        assert_eq!(config.client.page_size, 50);
    }
}
