// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-request locale extractor.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use lingo_common_i18n::{
	resolve_locale, strip_locale_prefix, Detection, DetectionContext, LocaleCode, ServerContext,
	Strategy,
};
use tracing::instrument;

use crate::api::AppState;

/// The locale a request should be served in.
///
/// Prefixed strategies take the locale from the path, and an unprefixed path
/// means the default locale. Under `no_prefix` the URL carries no locale, so
/// the detected locale (cookie, then `Accept-Language`) is used.
///
/// ```ignore
/// async fn handler(locale: DetectedLocale) -> String {
///     format!("serving {}", locale.locale)
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedLocale {
	pub locale: LocaleCode,
	/// Whether the locale came from the request path.
	pub from_path: bool,
	pub detection: Detection,
}

impl FromRequestParts<AppState> for DetectedLocale {
	type Rejection = Infallible;

	#[instrument(name = "DetectedLocale::from_request_parts", skip_all)]
	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let registry = state.detector.registry();
		let default_locale = &state.routing.default_locale;

		let context = DetectionContext::Server(ServerContext::from_headers(&parts.headers));
		let detection = state.detector.detect(&context);

		let path_locale = match state.routing.strategy {
			Strategy::NoPrefix => None,
			_ => strip_locale_prefix(parts.uri.path(), registry).0,
		};

		let (locale, from_path) = match path_locale {
			Some(locale) => (locale, true),
			None => {
				let preferred = match state.routing.strategy {
					Strategy::NoPrefix => detection.resolved().map(LocaleCode::as_str),
					_ => None,
				};
				let locale = resolve_locale(registry, preferred, default_locale.as_str())
					.cloned()
					.unwrap_or_else(|| default_locale.clone());
				(locale, false)
			}
		};

		tracing::debug!(locale = %locale, from_path, "resolved request locale");

		Ok(DetectedLocale {
			locale,
			from_path,
			detection,
		})
	}
}
