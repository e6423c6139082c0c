// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application state and router construction.

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use lingo_common_i18n::{LocaleDetector, RedirectConfig, RoutingConfig};
use lingo_server_config::ServerConfig;

use crate::middleware::root_redirect_layer;
use crate::routes;

/// Shared, immutable per-process state.
#[derive(Clone)]
pub struct AppState {
	pub config: Arc<ServerConfig>,
	pub detector: Arc<LocaleDetector>,
	pub routing: Arc<RoutingConfig>,
	pub redirect: Arc<RedirectConfig>,
}

pub fn create_app_state(config: &ServerConfig) -> AppState {
	AppState {
		detector: Arc::new(config.i18n.detector()),
		routing: Arc::new(config.i18n.routing()),
		redirect: Arc::new(config.i18n.redirect()),
		config: Arc::new(config.clone()),
	}
}

pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(routes::health::health_check))
		.route("/api/locales", get(routes::locales::list_locales))
		.route("/api/locale", get(routes::locales::current_locale))
		.route("/", get(routes::pages::index))
		.route("/{locale}", get(routes::pages::localized_index))
		.layer(from_fn_with_state(state.clone(), root_redirect_layer))
		.with_state(state)
}
