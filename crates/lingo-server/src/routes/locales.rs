// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale API handlers.

use axum::{extract::State, Json};
use lingo_common_i18n::{resolve_locale, Detection, LocaleCode, LocaleRecord, Strategy};
use serde::Serialize;

use crate::{api::AppState, extract::DetectedLocale};

#[derive(Debug, Serialize)]
pub struct LocalesResponse {
	pub strategy: Strategy,
	pub default_locale: LocaleCode,
	pub locales: Vec<LocaleRecord>,
}

#[derive(Debug, Serialize)]
pub struct CurrentLocaleResponse {
	pub locale: LocaleCode,
	pub from_path: bool,
	pub detection: Detection,
}

/// GET /api/locales - Configured locales in configuration order.
pub async fn list_locales(State(state): State<AppState>) -> Json<LocalesResponse> {
	Json(LocalesResponse {
		strategy: state.routing.strategy,
		default_locale: state.routing.default_locale.clone(),
		locales: state.detector.registry().records().to_vec(),
	})
}

/// GET /api/locale - Locale detected for this request.
///
/// `/api` paths carry no locale prefix, so outside of a prefixed path the
/// reported locale is the detected one (cookie, then `Accept-Language`)
/// rather than the default locale an unprefixed page would be served in.
pub async fn current_locale(
	State(state): State<AppState>,
	locale: DetectedLocale,
) -> Json<CurrentLocaleResponse> {
	let effective = if locale.from_path {
		locale.locale
	} else {
		let default_locale = &state.routing.default_locale;
		resolve_locale(
			state.detector.registry(),
			locale.detection.resolved().map(LocaleCode::as_str),
			default_locale.as_str(),
		)
		.cloned()
		.unwrap_or_else(|| default_locale.clone())
	};

	Json(CurrentLocaleResponse {
		locale: effective,
		from_path: locale.from_path,
		detection: locale.detection,
	})
}
