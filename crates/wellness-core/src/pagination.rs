// ABOUTME: Cursor pagination types for the remote wellness API
// ABOUTME: Opaque continuation tokens and the page envelope returned by collection endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Opaque continuation token returned alongside a page of records.
///
/// The remote system owns the encoding; this type only distinguishes a live
/// cursor from the end of the sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PageCursor(String);

impl PageCursor {
    /// Wrap a raw token. Empty tokens mean "no more pages" and yield `None`.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    /// Raw token value sent back to the API
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PageCursor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One page of a collection endpoint.
///
/// Accepts both the WHOOP v2 field names (`records`, `next_token`) and the
/// generic `data` / `next_cursor` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    /// Records in remote order
    #[serde(alias = "data", default = "Vec::new")]
    pub records: Vec<T>,

    /// Raw continuation token, absent or empty on the last page
    #[serde(alias = "next_cursor", alias = "nextToken", default)]
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// Cursor for the following page, if any
    #[must_use]
    pub fn next_cursor(&self) -> Option<PageCursor> {
        self.next_token.clone().and_then(PageCursor::new)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_ends_sequence() {
        assert!(PageCursor::new("").is_none());
        assert_eq!(PageCursor::new("abc").unwrap().as_str(), "abc");
    }

    #[test]
    fn test_page_accepts_both_envelopes() {
        let whoop: Page<u32> =
            serde_json::from_str(r#"{"records":[1,2],"next_token":"c1"}"#).unwrap();
        assert_eq!(whoop.records, vec![1, 2]);
        assert_eq!(whoop.next_cursor().unwrap().as_str(), "c1");

        let generic: Page<u32> =
            serde_json::from_str(r#"{"data":[3],"next_cursor":""}"#).unwrap();
        assert_eq!(generic.records, vec![3]);
        assert!(generic.next_cursor().is_none());

        let bare: Page<u32> = serde_json::from_str(r#"{"records":[]}"#).unwrap();
        assert!(bare.next_cursor().is_none());
    }
}
