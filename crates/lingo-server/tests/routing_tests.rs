// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Integration tests for root redirects, locale pages and the locale API.

use axum::{
	body::Body,
	http::{
		header::{ACCEPT_LANGUAGE, CONTENT_TYPE, COOKIE, LOCATION},
		Request, StatusCode,
	},
	response::Response,
};
use lingo_server::{create_app_state, create_router, ServerConfig};
use lingo_server_config::ServerConfigLayer;
use tower::ServiceExt;

fn config(toml_str: &str) -> ServerConfig {
	let layer: ServerConfigLayer = toml::from_str(toml_str).unwrap();
	lingo_server_config::finalize(layer).unwrap()
}

fn app(toml_str: &str) -> axum::Router {
	create_router(create_app_state(&config(toml_str)))
}

async fn get(app: axum::Router, uri: &str, headers: &[(&str, &str)]) -> Response {
	let mut builder = Request::builder().uri(uri);
	for (name, value) in headers {
		builder = builder.header(*name, *value);
	}
	app.oneshot(builder.body(Body::empty()).unwrap())
		.await
		.unwrap()
}

async fn body_string(response: Response) -> String {
	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	String::from_utf8(body.to_vec()).unwrap()
}

fn location(response: &Response) -> Option<&str> {
	response
		.headers()
		.get(LOCATION)
		.and_then(|v| v.to_str().ok())
}

const PREFIX_EN_FR: &str = r#"
[i18n]
strategy = "prefix"
default_locale = "en"
locales = ["en", "fr"]
"#;

// ============================================================================
// Root redirect
// ============================================================================

#[tokio::test]
async fn test_root_redirect_to_configured_locale() {
	let app = app(
		r#"
[i18n]
strategy = "prefix"
default_locale = "en"
locales = ["en", "fr"]
root_redirect = "fr"
"#,
	);

	let response = get(app, "/", &[(ACCEPT_LANGUAGE.as_str(), "en")]).await;

	assert_eq!(response.status(), StatusCode::FOUND);
	assert_eq!(location(&response), Some("/fr"));
}

#[tokio::test]
async fn test_root_redirect_uses_configured_status() {
	let app = app(
		r#"
[i18n]
strategy = "prefix"
locales = ["en", "fr"]
root_redirect = { locale = "fr", status_code = 301 }
"#,
	);

	let response = get(app, "/", &[]).await;

	assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
	assert_eq!(location(&response), Some("/fr"));
}

#[tokio::test]
async fn test_root_redirect_follows_accept_language() {
	let response = get(
		app(PREFIX_EN_FR),
		"/",
		&[(ACCEPT_LANGUAGE.as_str(), "fr-CH, fr;q=0.9, en;q=0.8")],
	)
	.await;

	assert_eq!(response.status(), StatusCode::FOUND);
	assert_eq!(location(&response), Some("/fr"));
}

#[tokio::test]
async fn test_root_redirect_falls_back_to_default_locale() {
	let response = get(app(PREFIX_EN_FR), "/", &[(ACCEPT_LANGUAGE.as_str(), "de")]).await;

	assert_eq!(response.status(), StatusCode::FOUND);
	assert_eq!(location(&response), Some("/en"));
}

#[tokio::test]
async fn test_cookie_overrides_accept_language() {
	let response = get(
		app(PREFIX_EN_FR),
		"/",
		&[
			(ACCEPT_LANGUAGE.as_str(), "fr"),
			(COOKIE.as_str(), "theme=dark; i18n_redirected=en"),
		],
	)
	.await;

	assert_eq!(location(&response), Some("/en"));
}

#[tokio::test]
async fn test_unknown_cookie_value_is_ignored() {
	let response = get(
		app(PREFIX_EN_FR),
		"/",
		&[
			(ACCEPT_LANGUAGE.as_str(), "fr"),
			(COOKIE.as_str(), "i18n_redirected=xx"),
		],
	)
	.await;

	assert_eq!(location(&response), Some("/fr"));
}

#[tokio::test]
async fn test_cookie_ignored_when_disabled() {
	let app = app(
		r#"
[i18n]
strategy = "prefix"
locales = ["en", "fr"]

[i18n.detect_browser_language]
use_cookie = false
"#,
	);

	let response = get(
		app,
		"/",
		&[
			(ACCEPT_LANGUAGE.as_str(), "fr"),
			(COOKIE.as_str(), "i18n_redirected=en"),
		],
	)
	.await;

	assert_eq!(location(&response), Some("/fr"));
}

#[tokio::test]
async fn test_custom_cookie_key() {
	let app = app(
		r#"
[i18n]
strategy = "prefix"
locales = ["en", "fr"]

[i18n.detect_browser_language]
cookie_key = "lang"
"#,
	);

	let response = get(app, "/", &[(COOKIE.as_str(), "lang=fr")]).await;

	assert_eq!(location(&response), Some("/fr"));
}

#[tokio::test]
async fn test_root_redirect_preserves_query_string() {
	let response = get(
		app(PREFIX_EN_FR),
		"/?utm_source=mail&page=2",
		&[(ACCEPT_LANGUAGE.as_str(), "fr")],
	)
	.await;

	assert_eq!(location(&response), Some("/fr?utm_source=mail&page=2"));
}

#[tokio::test]
async fn test_default_locale_root_is_served_under_prefix_except_default() {
	let app = app(
		r#"
[i18n]
strategy = "prefix_except_default"
default_locale = "en"
locales = ["en", "fr"]
"#,
	);

	let response = get(app, "/", &[(ACCEPT_LANGUAGE.as_str(), "en-US")]).await;

	assert_eq!(response.status(), StatusCode::OK);
	let body = body_string(response).await;
	assert!(body.contains(r#"lang="en""#), "unexpected body: {body}");
}

#[tokio::test]
async fn test_non_default_locale_redirects_under_prefix_except_default() {
	let app = app(
		r#"
[i18n]
strategy = "prefix_except_default"
default_locale = "en"
locales = ["en", "fr"]
"#,
	);

	let response = get(app, "/", &[(ACCEPT_LANGUAGE.as_str(), "fr")]).await;

	assert_eq!(response.status(), StatusCode::FOUND);
	assert_eq!(location(&response), Some("/fr"));
}

#[tokio::test]
async fn test_no_prefix_never_redirects() {
	let app = app(
		r#"
[i18n]
strategy = "no_prefix"
default_locale = "en"
locales = ["en", "fr"]
"#,
	);

	let response = get(app, "/", &[(ACCEPT_LANGUAGE.as_str(), "fr")]).await;

	assert_eq!(response.status(), StatusCode::OK);
	assert!(location(&response).is_none());
	let body = body_string(response).await;
	assert!(body.contains(r#"lang="fr""#), "unexpected body: {body}");
}

#[tokio::test]
async fn test_non_root_paths_are_not_redirected() {
	let response = get(app(PREFIX_EN_FR), "/health", &[(ACCEPT_LANGUAGE.as_str(), "fr")]).await;

	assert_eq!(response.status(), StatusCode::OK);
	assert!(location(&response).is_none());
}

// ============================================================================
// Locale pages
// ============================================================================

#[tokio::test]
async fn test_localized_page_renders_head_metadata() {
	let app = app(
		r#"
[http]
base_url = "https://example.com/"

[i18n]
strategy = "prefix"
default_locale = "en"
locales = ["en", { code = "fr", iso = "fr-FR", name = "Français" }]
"#,
	);

	let response = get(app, "/fr", &[]).await;

	assert_eq!(response.status(), StatusCode::OK);
	let content_type = response
		.headers()
		.get(CONTENT_TYPE)
		.and_then(|v| v.to_str().ok())
		.unwrap_or("")
		.to_string();
	assert!(content_type.starts_with("text/html"), "got {content_type}");

	let body = body_string(response).await;
	assert!(body.contains(r#"lang="fr-FR""#));
	assert!(body.contains(r#"dir="ltr""#));
	assert!(body.contains("<title>Français</title>"));
	assert!(body.contains(r#"href="https://example.com/en" hreflang="en""#));
	assert!(body.contains(r#"hreflang="x-default""#));
	assert!(body.contains(r#"rel="canonical" href="https://example.com/fr""#));
	assert!(body.contains(r#"property="og:locale" content="fr_FR""#));
}

#[tokio::test]
async fn test_localized_page_is_case_insensitive() {
	let response = get(app(PREFIX_EN_FR), "/FR", &[]).await;

	assert_eq!(response.status(), StatusCode::OK);
	let body = body_string(response).await;
	assert!(body.contains(r#"lang="fr""#));
}

#[tokio::test]
async fn test_unknown_locale_page_is_404() {
	let response = get(app(PREFIX_EN_FR), "/de", &[]).await;

	assert_eq!(response.status(), StatusCode::NOT_FOUND);
	let body = body_string(response).await;
	let json: serde_json::Value = serde_json::from_str(&body).unwrap();
	assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn test_default_locale_prefix_is_404_under_prefix_except_default() {
	let app = app(
		r#"
[i18n]
strategy = "prefix_except_default"
default_locale = "en"
locales = ["en", "fr"]
"#,
	);

	let response = get(app, "/en", &[]).await;

	assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Locale API
// ============================================================================

#[tokio::test]
async fn test_list_locales() {
	let response = get(app(PREFIX_EN_FR), "/api/locales", &[]).await;

	assert_eq!(response.status(), StatusCode::OK);
	let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
	assert_eq!(json["strategy"], "prefix");
	assert_eq!(json["default_locale"], "en");
	assert_eq!(json["locales"][0]["code"], "en");
	assert_eq!(json["locales"][1]["code"], "fr");
	assert_eq!(json["locales"][1]["direction"], "ltr");
}

#[tokio::test]
async fn test_current_locale_reports_detection() {
	let app = app(
		r#"
[i18n]
strategy = "no_prefix"
default_locale = "en"
locales = ["en", "fr", "ja"]
"#,
	);

	let response = get(
		app,
		"/api/locale",
		&[
			(ACCEPT_LANGUAGE.as_str(), "ja-JP, fr;q=0.5"),
			(COOKIE.as_str(), "i18n_redirected=fr"),
		],
	)
	.await;

	assert_eq!(response.status(), StatusCode::OK);
	let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
	assert_eq!(json["locale"], "fr");
	assert_eq!(json["from_path"], false);
	assert_eq!(json["detection"]["browser"], "ja");
	assert_eq!(json["detection"]["cookie"], "fr");
}

#[tokio::test]
async fn test_current_locale_follows_detection_under_prefix() {
	let response = get(
		app(PREFIX_EN_FR),
		"/api/locale",
		&[(ACCEPT_LANGUAGE.as_str(), "fr-CA, en;q=0.5")],
	)
	.await;

	assert_eq!(response.status(), StatusCode::OK);
	let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
	assert_eq!(json["locale"], "fr");
	assert_eq!(json["from_path"], false);
	assert_eq!(json["detection"]["browser"], "fr");
}

#[tokio::test]
async fn test_current_locale_falls_back_to_default_without_match() {
	let response = get(
		app(PREFIX_EN_FR),
		"/api/locale",
		&[(ACCEPT_LANGUAGE.as_str(), "de")],
	)
	.await;

	let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
	assert_eq!(json["locale"], "en");
	assert!(json["detection"]["browser"].is_null());
}

#[tokio::test]
async fn test_health() {
	let response = get(app(PREFIX_EN_FR), "/health", &[]).await;

	assert_eq!(response.status(), StatusCode::OK);
	let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
	assert_eq!(json["status"], "healthy");
	assert_eq!(json["locales"], 2);
}
