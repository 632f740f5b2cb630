// ABOUTME: Core types and constants for the wellness insights server
// ABOUTME: Foundation crate with error handling, record models, pagination, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Wellness Core
//!
//! Foundation crate shared by the provider client, the intelligence engine and
//! the server. It changes infrequently so the heavier crates can compile in
//! parallel against a stable set of types.
//!
//! ## Modules
//!
//! - **errors**: `ProviderError` taxonomy for remote calls and the unified `AppError`
//! - **models**: WHOOP record kinds, credentials, date windows, analysis summaries
//! - **pagination**: opaque page cursors returned by the remote API
//! - **constants**: API endpoints and request defaults

/// Unified error handling with provider-specific error taxonomy
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Opaque cursor pagination for remote result sets
pub mod pagination;

/// Core data models (records, credentials, date windows, summaries)
pub mod models;
