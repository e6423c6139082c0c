// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Localized landing pages.

use std::fmt::Write as _;

use axum::{
	extract::{Path, State},
	http::Uri,
	response::Html,
};
use lingo_common_i18n::{
	escape_html, locale_head, switch_locale_path, HeadContext, LocaleCode, LocaleHeadOptions,
	Strategy,
};
use tracing::instrument;

use crate::{api::AppState, error::ServerError, extract::DetectedLocale};

/// GET / - Landing page in the request's locale.
///
/// Only reached when the root redirect middleware lets the request through.
pub async fn index(State(state): State<AppState>, locale: DetectedLocale, uri: Uri) -> Html<String> {
	render_landing(&state, &locale.locale, uri.path())
}

/// GET /{locale} - Landing page under a locale prefix.
#[instrument(skip(state, uri))]
pub async fn localized_index(
	State(state): State<AppState>,
	Path(locale): Path<String>,
	uri: Uri,
) -> Result<Html<String>, ServerError> {
	let code = state
		.detector
		.registry()
		.canonical(&locale)
		.filter(|code| serves_prefixed(state.routing.strategy, code, &state.routing.default_locale))
		.ok_or_else(|| ServerError::LocaleNotFound(locale.clone()))?;

	Ok(render_landing(&state, code, uri.path()))
}

/// Whether `/<locale>` is a route under `strategy`.
///
/// `prefix_and_default` serves the default locale both with and without the
/// prefix; `prefix_except_default` only without.
fn serves_prefixed(strategy: Strategy, locale: &LocaleCode, default_locale: &LocaleCode) -> bool {
	match strategy {
		Strategy::NoPrefix => false,
		Strategy::Prefix | Strategy::PrefixAndDefault => true,
		Strategy::PrefixExceptDefault => !locale.matches(default_locale.as_str()),
	}
}

fn render_landing(state: &AppState, locale: &LocaleCode, current_path: &str) -> Html<String> {
	let registry = state.detector.registry();
	let options = LocaleHeadOptions {
		add_dir_attribute: true,
		add_seo_attributes: true,
		..LocaleHeadOptions::default()
	};
	let head = locale_head(
		&options,
		&HeadContext {
			registry,
			routing: &state.routing,
			current_locale: locale,
			current_path,
			base_url: Some(state.config.http.base_url.as_str()),
		},
	);

	let title = registry
		.get(locale.as_str())
		.and_then(|record| record.name.as_deref())
		.unwrap_or(locale.as_str());

	let mut page = String::new();
	let _ = writeln!(page, "<!DOCTYPE html>");
	let _ = writeln!(page, "<html {}>", head.html_attributes());
	let _ = writeln!(page, "<head>\n<meta charset=\"utf-8\">");
	let _ = writeln!(page, "<title>{}</title>", escape_html(title));
	page.push_str(&head.to_html_tags());
	let _ = writeln!(page, "</head>\n<body>\n<nav>\n<ul>");

	for record in registry.records() {
		let href = switch_locale_path(current_path, &record.code, &state.routing, registry);
		let label = record.name.as_deref().unwrap_or(record.code.as_str());
		let _ = writeln!(
			page,
			"<li><a href=\"{}\" hreflang=\"{}\">{}</a></li>",
			escape_html(&href),
			escape_html(&record.normalized_tag),
			escape_html(label)
		);
	}

	let _ = writeln!(page, "</ul>\n</nav>\n</body>\n</html>");
	Html(page)
}
