// ABOUTME: Bearer credential with optional refresh-token grant material
// ABOUTME: One live value per client instance, replaced wholesale after a refresh
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use serde::{Deserialize, Serialize};

/// Access token plus the material needed to exchange it for a new one
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Bearer token sent on every request
    pub access_token: String,
    /// Refresh token for the refresh-token grant
    pub refresh_token: Option<String>,
    /// OAuth client id
    pub client_id: Option<String>,
    /// OAuth client secret
    pub client_secret: Option<String>,
}

impl Credential {
    /// Credential with only a bearer token (no refresh possible)
    #[must_use]
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            client_id: None,
            client_secret: None,
        }
    }

    /// Attach refresh-grant material
    #[must_use]
    pub fn with_refresh(
        mut self,
        refresh_token: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self.client_id = Some(client_id.into());
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Whether a refresh-token grant can be attempted
    #[must_use]
    pub fn can_refresh(&self) -> bool {
        [&self.refresh_token, &self.client_id, &self.client_secret]
            .iter()
            .all(|field| field.as_deref().is_some_and(|v| !v.is_empty()))
    }
}

// Tokens never reach logs
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_refresh_requires_all_material() {
        assert!(!Credential::bearer("t").can_refresh());
        assert!(Credential::bearer("t").with_refresh("r", "id", "secret").can_refresh());
        assert!(!Credential::bearer("t").with_refresh("", "id", "secret").can_refresh());
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let cred = Credential::bearer("super-secret").with_refresh("refresh-me", "id", "s3cr3t");
        let out = format!("{cred:?}");
        assert!(!out.contains("super-secret"));
        assert!(!out.contains("refresh-me"));
        assert!(!out.contains("s3cr3t"));
    }
}
