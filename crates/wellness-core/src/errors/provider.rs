// ABOUTME: Structured error types for WHOOP API operations
// ABOUTME: Categorizes transport, auth, status and parse failures with diagnostics for retry decisions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use thiserror::Error;

/// Maximum number of body bytes kept on an error for diagnostics
const BODY_SNIPPET_LIMIT: usize = 512;

/// Errors raised while talking to the remote wellness API.
///
/// Every variant that originates from an HTTP response carries the status code
/// and a truncated body so callers can decide between retrying and aborting.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure (DNS, connect, TLS, per-call timeout)
    #[error("{provider} network error: {message}")]
    Network {
        /// Provider name
        provider: String,
        /// Underlying transport message
        message: String,
    },

    /// Credential rejected and could not be recovered by a refresh
    #[error("{provider} authentication failed: {reason}")]
    AuthenticationFailed {
        /// Provider name
        provider: String,
        /// Why authentication failed
        reason: String,
    },

    /// 403 from the remote API
    #[error("{provider} denied access (status {status_code}): {body}")]
    Forbidden {
        /// Provider name
        provider: String,
        /// HTTP status code
        status_code: u16,
        /// Response body snippet
        body: String,
    },

    /// 400 from the remote API
    #[error("{provider} rejected request parameters (status {status_code}): {body}")]
    BadRequest {
        /// Provider name
        provider: String,
        /// HTTP status code
        status_code: u16,
        /// Response body snippet
        body: String,
    },

    /// 404 from the remote API
    #[error("{provider} resource not found (status {status_code}): {body}")]
    NotFound {
        /// Provider name
        provider: String,
        /// HTTP status code
        status_code: u16,
        /// Response body snippet
        body: String,
    },

    /// 429 from the remote API (distinct from local throttling)
    #[error("{provider} rate limit exceeded (status {status_code}): {body}")]
    RateLimitExceeded {
        /// Provider name
        provider: String,
        /// HTTP status code
        status_code: u16,
        /// Response body snippet
        body: String,
    },

    /// 5xx from the remote API
    #[error("{provider} server error (status {status_code}): {body}")]
    ServerError {
        /// Provider name
        provider: String,
        /// HTTP status code
        status_code: u16,
        /// Response body snippet
        body: String,
    },

    /// Any other non-success status
    #[error("{provider} returned unexpected status {status_code}: {body}")]
    UnexpectedStatus {
        /// Provider name
        provider: String,
        /// HTTP status code
        status_code: u16,
        /// Response body snippet
        body: String,
    },

    /// Malformed JSON body
    #[error("{provider} returned malformed {field}: {source}")]
    ParseError {
        /// Provider name
        provider: String,
        /// What was being parsed
        field: &'static str,
        /// Underlying serde error
        #[source]
        source: serde_json::Error,
    },

    /// Local rate limiter could not grant a slot within the configured wait
    #[error("{provider} request slot not available within {waited:?}")]
    RateLimiterTimeout {
        /// Provider name
        provider: String,
        /// How long the caller waited
        waited: Duration,
    },

    /// Client misconfiguration detected before any request
    #[error("{provider} configuration error: {details}")]
    ConfigurationError {
        /// Provider name
        provider: String,
        /// What is wrong
        details: String,
    },
}

impl ProviderError {
    /// Map a non-success, non-401 HTTP status onto its error category
    #[must_use]
    pub fn from_status(provider: &str, status_code: u16, body: &str) -> Self {
        let provider = provider.to_owned();
        let body = body_snippet(body);
        match status_code {
            400 => Self::BadRequest {
                provider,
                status_code,
                body,
            },
            403 => Self::Forbidden {
                provider,
                status_code,
                body,
            },
            404 => Self::NotFound {
                provider,
                status_code,
                body,
            },
            429 => Self::RateLimitExceeded {
                provider,
                status_code,
                body,
            },
            500..=599 => Self::ServerError {
                provider,
                status_code,
                body,
            },
            _ => Self::UnexpectedStatus {
                provider,
                status_code,
                body,
            },
        }
    }

    /// HTTP status code carried by this error, if it came from a response
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Forbidden { status_code, .. }
            | Self::BadRequest { status_code, .. }
            | Self::NotFound { status_code, .. }
            | Self::RateLimitExceeded { status_code, .. }
            | Self::ServerError { status_code, .. }
            | Self::UnexpectedStatus { status_code, .. } => Some(*status_code),
            Self::AuthenticationFailed { .. } => Some(401),
            Self::Network { .. }
            | Self::ParseError { .. }
            | Self::RateLimiterTimeout { .. }
            | Self::ConfigurationError { .. } => None,
        }
    }

    /// Whether a caller may reasonably retry the same request later.
    ///
    /// The client never retries on its own; this only informs the caller.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network { .. }
                | Self::RateLimitExceeded { .. }
                | Self::ServerError { .. }
                | Self::RateLimiterTimeout { .. }
        )
    }
}

/// Truncate a response body on a char boundary for inclusion in an error
fn body_snippet(body: &str) -> String {
    if body.len() <= BODY_SNIPPET_LIMIT {
        return body.to_owned();
    }
    let mut end = BODY_SNIPPET_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

/// Result alias for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_status_categories() {
        assert!(matches!(
            ProviderError::from_status("whoop", 400, ""),
            ProviderError::BadRequest { .. }
        ));
        assert!(matches!(
            ProviderError::from_status("whoop", 403, ""),
            ProviderError::Forbidden { .. }
        ));
        assert!(matches!(
            ProviderError::from_status("whoop", 404, ""),
            ProviderError::NotFound { .. }
        ));
        assert!(matches!(
            ProviderError::from_status("whoop", 429, ""),
            ProviderError::RateLimitExceeded { .. }
        ));
        assert!(matches!(
            ProviderError::from_status("whoop", 503, ""),
            ProviderError::ServerError { .. }
        ));
        assert!(matches!(
            ProviderError::from_status("whoop", 418, ""),
            ProviderError::UnexpectedStatus { .. }
        ));
    }

    #[test]
    fn test_status_code_and_body_are_kept() {
        let err = ProviderError::from_status("whoop", 502, "upstream down");
        assert_eq!(err.status_code(), Some(502));
        assert!(err.to_string().contains("upstream down"));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_long_body_is_truncated() {
        let body = "x".repeat(2_000);
        let err = ProviderError::from_status("whoop", 500, &body);
        let ProviderError::ServerError { body, .. } = err else {
            panic!("expected server error");
        };
        assert!(body.len() < 600);
        assert!(body.ends_with("..."));
    }

    #[test]
    fn test_client_errors_are_not_retryable() {
        assert!(!ProviderError::from_status("whoop", 400, "").is_retryable());
        assert!(!ProviderError::from_status("whoop", 403, "").is_retryable());
    }
}
