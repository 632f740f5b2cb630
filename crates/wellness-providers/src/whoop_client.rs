// ABOUTME: WHOOP API fetch client with cursor pagination and transparent token refresh
// ABOUTME: Rate-limited GETs per record kind, single-flight refresh on 401, categorized errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use chrono::SecondsFormat;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, instrument, warn};
use wellness_core::constants::{defaults, providers, whoop_api};
use wellness_core::errors::{ProviderError, ProviderResult};
use wellness_core::models::{
    Credential, Cycle, DateWindow, Recovery, Sleep, UserProfile, WhoopRecord, Workout,
};
use wellness_core::pagination::{Page, PageCursor};

use crate::credentials::{CredentialStore, NoopCredentialStore};
use crate::http_client::{build_client, network_error, HttpClientConfig};
use crate::rate_limiter::{RateLimiter, RateLimiterConfig};

/// Endpoints, paging and throttling for a `WhoopClient`
#[derive(Debug, Clone)]
pub struct WhoopClientConfig {
    /// API base URL, without trailing slash
    pub base_url: String,
    /// OAuth token endpoint for refresh-token grants
    pub token_url: String,
    /// Records requested per page
    pub page_size: u32,
    /// HTTP timeouts
    pub http: HttpClientConfig,
    /// Outbound throttling
    pub rate_limit: RateLimiterConfig,
}

impl Default for WhoopClientConfig {
    fn default() -> Self {
        Self {
            base_url: whoop_api::BASE_URL.to_owned(),
            token_url: whoop_api::TOKEN_URL.to_owned(),
            page_size: defaults::PAGE_SIZE,
            http: HttpClientConfig::default(),
            rate_limit: RateLimiterConfig::default(),
        }
    }
}

/// Live credential plus a counter bumped on every replacement
#[derive(Debug)]
struct CredentialSlot {
    credential: Credential,
    generation: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// WHOOP developer API client.
///
/// One instance is shared (behind an `Arc`) by all fetch tasks of a request.
/// The credential is read under an `RwLock`; refreshes are serialized by a
/// separate mutex so concurrent 401s trigger a single token exchange.
pub struct WhoopClient {
    http: Client,
    config: WhoopClientConfig,
    limiter: RateLimiter,
    credential: RwLock<CredentialSlot>,
    refresh_lock: Mutex<()>,
    store: Arc<dyn CredentialStore>,
}

impl WhoopClient {
    /// Create a client with the given credential and configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` for an empty token or base URL, or when
    /// the HTTP client cannot be built.
    pub fn new(credential: Credential, config: WhoopClientConfig) -> ProviderResult<Self> {
        Self::with_store(credential, config, Arc::new(NoopCredentialStore))
    }

    /// Create a client that persists refreshed credentials through `store`
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` for an empty token or base URL, or when
    /// the HTTP client cannot be built.
    pub fn with_store(
        credential: Credential,
        mut config: WhoopClientConfig,
        store: Arc<dyn CredentialStore>,
    ) -> ProviderResult<Self> {
        if credential.access_token.trim().is_empty() {
            return Err(configuration_error("access token is empty"));
        }
        if config.base_url.trim().is_empty() {
            return Err(configuration_error("API base URL is empty"));
        }
        config.base_url = config.base_url.trim_end_matches('/').to_owned();
        config.page_size = config.page_size.clamp(1, defaults::MAX_PAGE_SIZE);

        Ok(Self {
            http: build_client(&config.http)?,
            limiter: RateLimiter::new(providers::WHOOP, config.rate_limit),
            config,
            credential: RwLock::new(CredentialSlot {
                credential,
                generation: 0,
            }),
            refresh_lock: Mutex::new(()),
            store,
        })
    }

    /// Client configuration after normalization
    #[must_use]
    pub const fn config(&self) -> &WhoopClientConfig {
        &self.config
    }

    /// Copy of the live credential
    pub async fn credential(&self) -> Credential {
        self.credential.read().await.credential.clone()
    }

    // ------------------------------------------------------------------
    // Public API
    // ------------------------------------------------------------------

    /// Basic profile of the authenticated user
    ///
    /// # Errors
    ///
    /// Propagates request, authentication and parse failures.
    #[instrument(skip(self), fields(provider = providers::WHOOP, api_call = "get_user_profile"))]
    pub async fn get_user_profile(&self) -> ProviderResult<UserProfile> {
        let body = self.get_authorized(whoop_api::USER_PROFILE_PATH, &[]).await?;
        parse_body(&body, "user profile")
    }

    /// Check that the API is reachable and the credential is accepted
    ///
    /// # Errors
    ///
    /// Returns the failure of the identity call.
    pub async fn validate_connection(&self) -> ProviderResult<()> {
        let profile = self.get_user_profile().await?;
        info!(user_id = profile.user_id, "WHOOP connection validated");
        Ok(())
    }

    /// Every record of kind `T` inside `window`, in page order.
    ///
    /// Pages are requested strictly in sequence; each page waits for a
    /// rate-limiter slot first.
    ///
    /// # Errors
    ///
    /// Fails on the first page that fails; records already received are
    /// discarded.
    #[instrument(
        skip_all,
        fields(
            provider = providers::WHOOP,
            kind = T::KIND.as_str(),
            start = %window.start_date(),
            end = %window.end_date(),
        )
    )]
    pub async fn fetch_all<T: WhoopRecord>(&self, window: &DateWindow) -> ProviderResult<Vec<T>> {
        let mut records = Vec::new();
        let mut cursor: Option<PageCursor> = None;
        let mut pages = 0_usize;

        loop {
            let query = self.page_query(window, cursor.as_ref());
            let body = self.get_authorized(T::KIND.endpoint(), &query).await?;
            let page: Page<T> = parse_body(&body, T::KIND.as_str())?;
            pages += 1;

            cursor = page.next_cursor();
            records.extend(page.records);

            if cursor.is_none() {
                break;
            }
        }

        debug!(pages, records = records.len(), "fetch complete");
        Ok(records)
    }

    /// Recovery records in `window`
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_all`].
    pub async fn get_recoveries(&self, window: &DateWindow) -> ProviderResult<Vec<Recovery>> {
        self.fetch_all(window).await
    }

    /// Sleep records in `window`
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_all`].
    pub async fn get_sleeps(&self, window: &DateWindow) -> ProviderResult<Vec<Sleep>> {
        self.fetch_all(window).await
    }

    /// Workout records in `window`
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_all`].
    pub async fn get_workouts(&self, window: &DateWindow) -> ProviderResult<Vec<Workout>> {
        self.fetch_all(window).await
    }

    /// Cycle records in `window`
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_all`].
    pub async fn get_cycles(&self, window: &DateWindow) -> ProviderResult<Vec<Cycle>> {
        self.fetch_all(window).await
    }

    // ------------------------------------------------------------------
    // Request plumbing
    // ------------------------------------------------------------------

    fn page_query(
        &self,
        window: &DateWindow,
        cursor: Option<&PageCursor>,
    ) -> Vec<(&'static str, String)> {
        let mut query = vec![
            (
                "start",
                window.start().to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
            ("end", window.end().to_rfc3339_opts(SecondsFormat::Secs, true)),
            ("limit", self.config.page_size.to_string()),
        ];
        if let Some(cursor) = cursor {
            query.push((whoop_api::CURSOR_PARAM, cursor.as_str().to_owned()));
        }
        query
    }

    /// GET with the live credential; on 401 refresh once and retry the same request
    async fn get_authorized(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> ProviderResult<String> {
        let url = format!("{}{path}", self.config.base_url);

        self.limiter.acquire().await?;
        let (token, generation, can_refresh) = self.current_token().await;
        let response = self.send_get(&url, query, &token).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return read_body(response).await;
        }

        if !can_refresh {
            return Err(authentication_failed(
                "access token rejected and no refresh credentials are configured",
            ));
        }

        warn!(path, "access token rejected, refreshing");
        self.refresh_after_rejection(generation).await?;

        self.limiter.acquire().await?;
        let (token, _, _) = self.current_token().await;
        let retry = self.send_get(&url, query, &token).await?;
        if retry.status() == StatusCode::UNAUTHORIZED {
            error!(path, "access token rejected after refresh");
            return Err(authentication_failed("access token rejected after refresh"));
        }
        read_body(retry).await
    }

    async fn current_token(&self) -> (String, u64, bool) {
        let slot = self.credential.read().await;
        (
            slot.credential.access_token.clone(),
            slot.generation,
            slot.credential.can_refresh(),
        )
    }

    async fn send_get(
        &self,
        url: &str,
        query: &[(&'static str, String)],
        token: &str,
    ) -> ProviderResult<Response> {
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await
            .map_err(|e| network_error(&e))?;
        debug!(status = %response.status(), url, "WHOOP API response");
        Ok(response)
    }

    /// Replace the credential unless another task already did since `stale_generation`
    async fn refresh_after_rejection(&self, stale_generation: u64) -> ProviderResult<()> {
        let _refreshing = self.refresh_lock.lock().await;

        let current = {
            let slot = self.credential.read().await;
            if slot.generation != stale_generation {
                debug!("credential already refreshed by a concurrent request");
                return Ok(());
            }
            slot.credential.clone()
        };

        let refreshed = self.exchange_refresh_token(&current).await?;

        {
            let mut slot = self.credential.write().await;
            slot.credential = refreshed.clone();
            slot.generation += 1;
        }
        info!("refreshed WHOOP access token");

        if let Err(e) = self.store.save(&refreshed).await {
            warn!(error = %e, "could not persist refreshed credentials");
        }
        Ok(())
    }

    async fn exchange_refresh_token(&self, current: &Credential) -> ProviderResult<Credential> {
        let (Some(refresh_token), Some(client_id), Some(client_secret)) = (
            current.refresh_token.as_deref(),
            current.client_id.as_deref(),
            current.client_secret.as_deref(),
        ) else {
            return Err(authentication_failed("refresh credentials are incomplete"));
        };

        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("scope", whoop_api::REFRESH_SCOPE),
        ];

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| network_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(%status, body_length = text.len(), "token refresh rejected");
            return Err(authentication_failed(&format!(
                "token refresh failed with status {status}"
            )));
        }

        let body = response.text().await.map_err(|e| network_error(&e))?;
        let token: TokenResponse = parse_body(&body, "token response")?;
        if let Some(expires_in) = token.expires_in {
            debug!(expires_in, "received refreshed token");
        }

        // WHOOP may omit the rotated refresh token; keep the old one then
        let next_refresh = token
            .refresh_token
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| refresh_token.to_owned());
        Ok(Credential::bearer(token.access_token).with_refresh(
            next_refresh,
            client_id,
            client_secret,
        ))
    }
}

async fn read_body(response: Response) -> ProviderResult<String> {
    let status = response.status();
    let body = response.text().await.map_err(|e| network_error(&e))?;
    if status.is_success() {
        Ok(body)
    } else {
        error!(%status, body_length = body.len(), "WHOOP API request failed");
        Err(ProviderError::from_status(
            providers::WHOOP,
            status.as_u16(),
            &body,
        ))
    }
}

fn parse_body<T: DeserializeOwned>(body: &str, field: &'static str) -> ProviderResult<T> {
    serde_json::from_str(body).map_err(|source| ProviderError::ParseError {
        provider: providers::WHOOP.to_owned(),
        field,
        source,
    })
}

fn authentication_failed(reason: &str) -> ProviderError {
    ProviderError::AuthenticationFailed {
        provider: providers::WHOOP.to_owned(),
        reason: reason.to_owned(),
    }
}

fn configuration_error(details: &str) -> ProviderError {
    ProviderError::ConfigurationError {
        provider: providers::WHOOP.to_owned(),
        details: details.to_owned(),
    }
}
