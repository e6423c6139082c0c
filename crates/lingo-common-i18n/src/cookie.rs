// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Persisted locale choice read from the locale cookie.

use http::header::COOKIE;
use http::HeaderMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::locale::{LocaleRegistry, ResolvedLocale};

/// Default name of the cookie holding the user's locale choice.
pub const DEFAULT_COOKIE_KEY: &str = "i18n_redirected";

/// Cookie-based detection settings (`detect_browser_language` in config).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieConfig {
	pub use_cookie: bool,
	pub cookie_key: String,
}

impl Default for CookieConfig {
	fn default() -> Self {
		Self {
			use_cookie: true,
			cookie_key: DEFAULT_COOKIE_KEY.to_string(),
		}
	}
}

/// Name/value pairs parsed from a request's `Cookie` header(s).
///
/// Values are percent-decoded. When a name appears more than once the first
/// occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestCookies {
	pairs: Vec<(String, String)>,
}

impl RequestCookies {
	/// Parse a raw `Cookie` header value. Malformed pairs are skipped.
	pub fn parse(header: &str) -> Self {
		let mut cookies = Self::default();
		cookies.extend_from_header(header);
		cookies
	}

	/// Collect cookies from every `Cookie` header in the map.
	pub fn from_headers(headers: &HeaderMap) -> Self {
		let mut cookies = Self::default();
		for value in headers.get_all(COOKIE) {
			if let Ok(header) = value.to_str() {
				cookies.extend_from_header(header);
			}
		}
		cookies
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.pairs
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.as_str())
	}

	pub fn len(&self) -> usize {
		self.pairs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.pairs.is_empty()
	}

	fn extend_from_header(&mut self, header: &str) {
		self.pairs.extend(header.split(';').filter_map(|cookie| {
			let (name, value) = cookie.trim().split_once('=')?;
			let name = name.trim();
			if name.is_empty() {
				return None;
			}

			let value = value.trim();
			let value = value
				.strip_prefix('"')
				.and_then(|v| v.strip_suffix('"'))
				.unwrap_or(value);
			let value = urlencoding::decode(value)
				.map(|decoded| decoded.into_owned())
				.unwrap_or_else(|_| value.to_string());

			Some((name.to_string(), value))
		}));
	}
}

/// Where the cookie value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieSource<'a> {
	/// Client-side cookie store read of the configured key.
	Client { value: Option<&'a str> },
	/// Server-side cookies parsed from the incoming request.
	Server(&'a RequestCookies),
}

/// Resolve the persisted locale choice, validated against the registry.
///
/// Returns `None` when cookie detection is disabled, when the cookie is
/// missing, or when its value is not a registered locale. Never writes.
pub fn resolve_cookie_locale(
	config: &CookieConfig,
	source: CookieSource<'_>,
	registry: &LocaleRegistry,
) -> ResolvedLocale {
	if !config.use_cookie {
		return None;
	}

	let raw = match source {
		CookieSource::Client { value } => value,
		CookieSource::Server(cookies) => cookies.get(&config.cookie_key),
	}?;

	match registry.canonical(raw.trim()) {
		Some(code) => Some(code.clone()),
		None => {
			debug!(
				cookie_key = %config.cookie_key,
				value = raw,
				"ignoring locale cookie that names an unregistered locale"
			);
			None
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use http::HeaderValue;

	fn registry() -> LocaleRegistry {
		LocaleRegistry::from_codes(["en", "fr", "zh-Hant"]).unwrap()
	}

	fn enabled() -> CookieConfig {
		CookieConfig::default()
	}

	#[test]
	fn test_default_config() {
		let config = CookieConfig::default();
		assert!(config.use_cookie);
		assert_eq!(config.cookie_key, "i18n_redirected");
	}

	#[test]
	fn test_parse_cookie_header() {
		let cookies = RequestCookies::parse("session=abc; i18n_redirected=fr;theme=dark");
		assert_eq!(cookies.len(), 3);
		assert_eq!(cookies.get("i18n_redirected"), Some("fr"));
		assert_eq!(cookies.get("theme"), Some("dark"));
		assert_eq!(cookies.get("missing"), None);
	}

	#[test]
	fn test_parse_skips_malformed_pairs() {
		let cookies = RequestCookies::parse("novalue; =orphan; ok=1;;");
		assert_eq!(cookies.len(), 1);
		assert_eq!(cookies.get("ok"), Some("1"));
	}

	#[test]
	fn test_parse_decodes_and_unquotes_values() {
		let cookies = RequestCookies::parse("a=\"fr\"; b=zh%2DHant");
		assert_eq!(cookies.get("a"), Some("fr"));
		assert_eq!(cookies.get("b"), Some("zh-Hant"));
	}

	#[test]
	fn test_first_occurrence_wins() {
		let cookies = RequestCookies::parse("lang=fr; lang=en");
		assert_eq!(cookies.get("lang"), Some("fr"));
	}

	#[test]
	fn test_from_headers_reads_every_cookie_header() {
		let mut headers = HeaderMap::new();
		headers.append(COOKIE, HeaderValue::from_static("a=1"));
		headers.append(COOKIE, HeaderValue::from_static("i18n_redirected=en"));
		let cookies = RequestCookies::from_headers(&headers);
		assert_eq!(cookies.get("a"), Some("1"));
		assert_eq!(cookies.get("i18n_redirected"), Some("en"));
	}

	#[test]
	fn test_disabled_always_none() {
		let config = CookieConfig {
			use_cookie: false,
			..CookieConfig::default()
		};
		let cookies = RequestCookies::parse("i18n_redirected=fr");
		assert!(resolve_cookie_locale(&config, CookieSource::Server(&cookies), &registry()).is_none());
		assert!(
			resolve_cookie_locale(&config, CookieSource::Client { value: Some("fr") }, &registry())
				.is_none()
		);
	}

	#[test]
	fn test_server_cookie_resolves() {
		let cookies = RequestCookies::parse("i18n_redirected=fr");
		let resolved = resolve_cookie_locale(&enabled(), CookieSource::Server(&cookies), &registry());
		assert_eq!(resolved.unwrap(), "fr");
	}

	#[test]
	fn test_client_cookie_resolves_to_canonical_code() {
		let resolved = resolve_cookie_locale(
			&enabled(),
			CookieSource::Client {
				value: Some("ZH-hant"),
			},
			&registry(),
		);
		assert_eq!(resolved.unwrap(), "zh-Hant");
	}

	#[test]
	fn test_unknown_value_treated_as_absent() {
		let cookies = RequestCookies::parse("i18n_redirected=de");
		assert!(resolve_cookie_locale(&enabled(), CookieSource::Server(&cookies), &registry()).is_none());
		assert!(
			resolve_cookie_locale(&enabled(), CookieSource::Client { value: Some("") }, &registry())
				.is_none()
		);
	}

	#[test]
	fn test_custom_cookie_key() {
		let config = CookieConfig {
			use_cookie: true,
			cookie_key: "lang".to_string(),
		};
		let cookies = RequestCookies::parse("i18n_redirected=en; lang=fr");
		let resolved = resolve_cookie_locale(&config, CookieSource::Server(&cookies), &registry());
		assert_eq!(resolved.unwrap(), "fr");
	}
}
