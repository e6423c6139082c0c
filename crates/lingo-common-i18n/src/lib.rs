// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale detection and locale-aware routing for Lingo.
//!
//! This crate holds the pure core of Lingo's i18n routing. Nothing here does
//! I/O or keeps state between calls; the HTTP layer feeds in headers and
//! applies the returned decisions.
//!
//! - [`LocaleRegistry`]: the configured locales, validated once at startup
//! - [`parse_accept_language`]: `Accept-Language` → weighted preferences
//! - [`find_browser_locale`]: preferences → best registered locale
//! - [`resolve_cookie_locale`]: persisted locale choice from the cookie
//! - [`LocaleDetector`]: both detectors over a client or server context
//! - [`decide_root_redirect`]: where (and whether) to send requests for `/`
//! - [`locale_path`], [`switch_locale_path`], [`route_base_name`]: path helpers
//! - [`locale_head`]: `lang`/`dir` attributes and SEO alternates
//!
//! # Example
//!
//! ```
//! use lingo_common_i18n::{
//!     decide_root_redirect, CookieConfig, DetectionContext, LocaleDetector, LocaleRegistry,
//!     RedirectConfig, ServerContext, Strategy,
//! };
//!
//! let registry = LocaleRegistry::from_codes(["en", "fr"]).unwrap();
//! let detector = LocaleDetector::new(registry, CookieConfig::default());
//!
//! let context = DetectionContext::Server(ServerContext {
//!     accept_language: Some("fr-CH, fr;q=0.9, en;q=0.8".to_string()),
//!     ..ServerContext::default()
//! });
//! let detection = detector.detect(&context);
//!
//! let config = RedirectConfig {
//!     strategy: Strategy::Prefix,
//!     default_locale: "en".into(),
//!     root_redirect: None,
//! };
//! let decision = decide_root_redirect("/", &config, detection.resolved());
//! assert_eq!(decision.target_path(), Some("/fr"));
//! ```

mod accept_language;
mod compile_hint;
mod cookie;
mod detect;
mod error;
mod head;
mod locale;
mod matcher;
mod redirect;
mod resolve;
mod strategy;

pub use accept_language::{parse_accept_language, LanguagePreference};
pub use compile_hint::{define_i18n_route, I18nRoute, I18nRouteOption};
pub use cookie::{resolve_cookie_locale, CookieConfig, CookieSource, RequestCookies, DEFAULT_COOKIE_KEY};
pub use detect::{ClientContext, Detection, DetectionContext, LocaleDetector, ServerContext};
pub use error::{I18nError, Result};
pub use head::{
	escape_html, locale_head, HeadContext, HeadLink, HeadMeta, LocaleHead, LocaleHeadOptions,
	DEFAULT_IDENTIFIER_ATTRIBUTE,
};
pub use locale::{
	is_well_formed_tag, primary_subtag, Direction, LocaleCode, LocaleRecord, LocaleRegistry,
	ResolvedLocale, DEFAULT_LOCALE,
};
pub use matcher::{find_browser_locale, LocaleCandidate};
pub use redirect::{
	decide_root_redirect, RedirectConfig, RedirectDecision, RootRedirect, DEFAULT_REDIRECT_STATUS,
	ROOT_PATH,
};
pub use resolve::resolve_locale;
pub use strategy::{
	locale_path, localized_route_name, route_base_name, strip_locale_prefix, switch_locale_path,
	RoutingConfig, Strategy, DEFAULT_ROUTES_NAME_SEPARATOR,
};
