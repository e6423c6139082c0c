// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Lingo locale routing server.
//!
//! This crate wires the pure locale detection and redirect policy from
//! `lingo-common-i18n` into an axum router: a root redirect middleware, a
//! [`DetectedLocale`](extract::DetectedLocale) extractor and a few routes
//! that expose the configured locales.

pub mod api;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;

pub use api::{create_app_state, create_router, AppState};
pub use error::ServerError;
pub use extract::DetectedLocale;
pub use lingo_server_config::ServerConfig;
