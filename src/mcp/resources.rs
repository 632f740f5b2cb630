// ABOUTME: MCP resources exposing the WHOOP profile and the last week of raw records
// ABOUTME: Resource listing plus reads that serialize remote data as pretty JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use wellness_core::constants::trend;
use wellness_core::errors::{AppError, AppResult};
use wellness_core::models::{DateWindow, Recovery, Sleep, Workout};
use wellness_providers::WhoopClient;

use crate::constants::resources::{JSON_MIME_TYPE, RECENT_HEALTH_URI, USER_PROFILE_URI};
use crate::formatters::format_json;

/// Resource advertised by `resources/list`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSchema {
    /// Resource URI
    pub uri: String,
    /// Display name
    pub name: String,
    /// Description
    pub description: String,
    /// Body MIME type
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

/// One entry of a `resources/read` result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceContents {
    /// URI that was read
    pub uri: String,
    /// Body MIME type
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    /// Body
    pub text: String,
}

#[derive(Serialize)]
struct RecentHealth<'a> {
    recovery: &'a [Recovery],
    sleep: &'a [Sleep],
    workouts: &'a [Workout],
}

/// Every resource this server exposes
#[must_use]
pub fn get_resources() -> Vec<ResourceSchema> {
    vec![
        ResourceSchema {
            uri: USER_PROFILE_URI.to_owned(),
            name: "User Profile".into(),
            description: "Basic user profile information".into(),
            mime_type: JSON_MIME_TYPE.to_owned(),
        },
        ResourceSchema {
            uri: RECENT_HEALTH_URI.to_owned(),
            name: "Recent Health Data".into(),
            description: "Most recent recovery, sleep, and activity data".into(),
            mime_type: JSON_MIME_TYPE.to_owned(),
        },
    ]
}

/// Reads resources through the shared fetch client
#[derive(Clone)]
pub struct ResourceReader {
    client: Arc<WhoopClient>,
}

impl ResourceReader {
    /// Reader over a shared client
    #[must_use]
    pub const fn new(client: Arc<WhoopClient>) -> Self {
        Self { client }
    }

    /// Read the resource at `uri`.
    ///
    /// The recent-health window is the seven days before `now`.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown URI and propagates fetch
    /// failures of any record kind.
    pub async fn read(&self, uri: &str, now: DateTime<Utc>) -> AppResult<ResourceContents> {
        let text = match uri {
            USER_PROFILE_URI => {
                let profile = self.client.get_user_profile().await?;
                format_json(&profile)?
            }
            RECENT_HEALTH_URI => {
                let window = DateWindow::trailing_days(trend::RECENT_DAYS, now);
                let (recovery, sleep, workouts) = tokio::try_join!(
                    self.client.get_recoveries(&window),
                    self.client.get_sleeps(&window),
                    self.client.get_workouts(&window)
                )?;
                debug!(
                    recoveries = recovery.len(),
                    sleeps = sleep.len(),
                    workouts = workouts.len(),
                    "recent health data fetched"
                );
                format_json(&RecentHealth {
                    recovery: &recovery,
                    sleep: &sleep,
                    workouts: &workouts,
                })?
            }
            other => return Err(AppError::not_found(format!("Unknown resource URI: {other}"))),
        };

        Ok(ResourceContents {
            uri: uri.to_owned(),
            mime_type: JSON_MIME_TYPE.to_owned(),
            text,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_listing_wire_format() {
        let wire = serde_json::to_value(get_resources()).unwrap();
        assert_eq!(wire[0]["uri"], "whoop://user/profile");
        assert_eq!(wire[0]["mimeType"], "application/json");
        assert_eq!(wire[1]["name"], "Recent Health Data");
    }
}
