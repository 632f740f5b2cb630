// ABOUTME: Credential persistence collaborator invoked after a successful token refresh
// ABOUTME: Env-file store that rewrites token keys in place and a no-op store for tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;
use wellness_core::models::Credential;

/// Key holding the access token
pub const ACCESS_TOKEN_KEY: &str = "WHOOP_ACCESS_TOKEN";
/// Legacy key accepted in place of `WHOOP_ACCESS_TOKEN`
pub const LEGACY_ACCESS_TOKEN_KEY: &str = "WHOOP_API_KEY";
/// Key holding the refresh token
pub const REFRESH_TOKEN_KEY: &str = "WHOOP_REFRESH_TOKEN";

/// Failure to persist refreshed credentials
#[derive(Debug, Error)]
pub enum CredentialStoreError {
    /// Reading or writing the backing file failed
    #[error("credential file {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Receives credentials after every successful refresh.
///
/// Saving is best-effort: the fetch client logs a failure and carries on.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persist the refreshed credential
    async fn save(&self, credential: &Credential) -> Result<(), CredentialStoreError>;
}

/// Store that discards credentials
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCredentialStore;

#[async_trait]
impl CredentialStore for NoopCredentialStore {
    async fn save(&self, _credential: &Credential) -> Result<(), CredentialStoreError> {
        Ok(())
    }
}

/// Store that updates token keys in a dotenv file.
///
/// Other lines (comments, client id, unrelated settings) are preserved. The
/// access token is written under whichever access key the file already uses.
/// On unix the file is owner-only (0600) before any token bytes reach it.
#[derive(Debug, Clone)]
pub struct EnvFileCredentialStore {
    path: PathBuf,
}

impl EnvFileCredentialStore {
    /// Store backed by `path`; the file is created if missing
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> CredentialStoreError {
        CredentialStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl CredentialStore for EnvFileCredentialStore {
    async fn save(&self, credential: &Credential) -> Result<(), CredentialStoreError> {
        let existing = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(self.io_error(e)),
        };

        let updated = rewrite_env(&existing, credential);
        let mut file = open_private(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        file.write_all(updated.as_bytes())
            .await
            .map_err(|e| self.io_error(e))?;
        file.flush().await.map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), "persisted refreshed credentials");
        Ok(())
    }
}

/// Open for rewrite with owner-only permissions.
///
/// New files are created 0600; an existing file is tightened before it is
/// truncated.
#[cfg(unix)]
async fn open_private(path: &Path) -> io::Result<File> {
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .mode(0o600)
        .open(path)
        .await?;
    file.set_permissions(Permissions::from_mode(0o600)).await?;
    file.set_len(0).await?;
    Ok(file)
}

#[cfg(not(unix))]
async fn open_private(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .await
}

/// Replace token assignments in dotenv content, appending missing keys
fn rewrite_env(content: &str, credential: &Credential) -> String {
    let access_key = if has_key(content, ACCESS_TOKEN_KEY) || !has_key(content, LEGACY_ACCESS_TOKEN_KEY)
    {
        ACCESS_TOKEN_KEY
    } else {
        LEGACY_ACCESS_TOKEN_KEY
    };

    let mut replacements: Vec<(&str, &str)> = vec![(access_key, credential.access_token.as_str())];
    if let Some(refresh) = credential.refresh_token.as_deref() {
        replacements.push((REFRESH_TOKEN_KEY, refresh));
    }

    let mut written = vec![false; replacements.len()];
    let mut lines: Vec<String> = content
        .lines()
        .map(|line| {
            let key = assignment_key(line);
            replacements
                .iter()
                .zip(written.iter_mut())
                .find(|((name, _), _)| Some(*name) == key)
                .map_or_else(
                    || line.to_owned(),
                    |((name, value), done)| {
                        *done = true;
                        format!("{name}={value}")
                    },
                )
        })
        .collect();

    for ((name, value), done) in replacements.iter().zip(&written) {
        if !done {
            lines.push(format!("{name}={value}"));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn assignment_key(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        return None;
    }
    let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
    trimmed.split_once('=').map(|(key, _)| key.trim())
}

fn has_key(content: &str, key: &str) -> bool {
    content.lines().any(|line| assignment_key(line) == Some(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_preserves_unrelated_lines() {
        let content = "# config\nWHOOP_ACCESS_TOKEN=old\nWHOOP_CLIENT_ID=abc\nWHOOP_REFRESH_TOKEN=r0\n";
        let cred = Credential::bearer("new").with_refresh("r1", "abc", "secret");
        let out = rewrite_env(content, &cred);
        assert_eq!(
            out,
            "# config\nWHOOP_ACCESS_TOKEN=new\nWHOOP_CLIENT_ID=abc\nWHOOP_REFRESH_TOKEN=r1\n"
        );
    }

    #[test]
    fn test_rewrite_keeps_legacy_key_name() {
        let content = "WHOOP_API_KEY=old\n";
        let out = rewrite_env(content, &Credential::bearer("new"));
        assert_eq!(out, "WHOOP_API_KEY=new\n");
    }

    #[test]
    fn test_rewrite_appends_missing_keys() {
        let cred = Credential::bearer("a").with_refresh("r", "id", "s");
        let out = rewrite_env("", &cred);
        assert_eq!(out, "WHOOP_ACCESS_TOKEN=a\nWHOOP_REFRESH_TOKEN=r\n");
    }

    #[test]
    fn test_commented_keys_are_not_replaced() {
        let out = rewrite_env("# WHOOP_ACCESS_TOKEN=example\n", &Credential::bearer("t"));
        assert_eq!(out, "# WHOOP_ACCESS_TOKEN=example\nWHOOP_ACCESS_TOKEN=t\n");
    }
}
