// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale detection from browser preferences and the locale cookie.
//!
//! Client and server code paths are modelled as an explicit
//! [`DetectionContext`] rather than ambient environment flags, so both are
//! exercised the same way in tests.

use http::header::ACCEPT_LANGUAGE;
use http::HeaderMap;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::accept_language::parse_accept_language;
use crate::cookie::{resolve_cookie_locale, CookieConfig, CookieSource, RequestCookies};
use crate::locale::{LocaleCode, LocaleRegistry, ResolvedLocale};
use crate::matcher::find_browser_locale;

/// Inputs available in a browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientContext {
	/// Value of the locale cookie as read from the client cookie store.
	pub cookie: Option<String>,
	/// `navigator.languages`, most preferred first.
	pub navigator_languages: Vec<String>,
}

/// Inputs available while handling an HTTP request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerContext {
	pub accept_language: Option<String>,
	pub cookies: RequestCookies,
}

impl ServerContext {
	pub fn from_headers(headers: &HeaderMap) -> Self {
		Self {
			accept_language: headers
				.get(ACCEPT_LANGUAGE)
				.and_then(|v| v.to_str().ok())
				.map(str::to_string),
			cookies: RequestCookies::from_headers(headers),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionContext {
	Client(ClientContext),
	Server(ServerContext),
}

/// Result of running both detectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Detection {
	/// Best match for the browser's language preferences.
	pub browser: ResolvedLocale,
	/// Registered locale stored in the locale cookie.
	pub cookie: ResolvedLocale,
}

impl Detection {
	/// The effective detected locale: a stored cookie choice overrides the
	/// browser match.
	pub fn resolved(&self) -> Option<&LocaleCode> {
		self.cookie.as_ref().or(self.browser.as_ref())
	}
}

/// Runs browser and cookie detection against a fixed registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleDetector {
	registry: LocaleRegistry,
	cookie: CookieConfig,
}

impl LocaleDetector {
	pub fn new(registry: LocaleRegistry, cookie: CookieConfig) -> Self {
		Self { registry, cookie }
	}

	pub fn registry(&self) -> &LocaleRegistry {
		&self.registry
	}

	pub fn cookie_config(&self) -> &CookieConfig {
		&self.cookie
	}

	/// Registered locale best matching the browser's language preferences.
	pub fn browser_locale(&self, context: &DetectionContext) -> ResolvedLocale {
		match context {
			DetectionContext::Client(client) => {
				find_browser_locale(&self.registry, &client.navigator_languages)
			}
			DetectionContext::Server(server) => {
				let preferences = parse_accept_language(server.accept_language.as_deref().unwrap_or(""));
				find_browser_locale(&self.registry, &preferences)
			}
		}
	}

	/// Registered locale persisted in the locale cookie.
	pub fn cookie_locale(&self, context: &DetectionContext) -> ResolvedLocale {
		let source = match context {
			DetectionContext::Client(client) => CookieSource::Client {
				value: client.cookie.as_deref(),
			},
			DetectionContext::Server(server) => CookieSource::Server(&server.cookies),
		};
		resolve_cookie_locale(&self.cookie, source, &self.registry)
	}

	#[instrument(level = "debug", skip_all)]
	pub fn detect(&self, context: &DetectionContext) -> Detection {
		let detection = Detection {
			browser: self.browser_locale(context),
			cookie: self.cookie_locale(context),
		};

		debug!(
			browser = ?detection.browser,
			cookie = ?detection.cookie,
			"locale detection finished"
		);

		detection
	}
}
