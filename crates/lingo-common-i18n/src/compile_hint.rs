// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Runtime stubs for compile-time-only route helpers.
//!
//! Page route customisation is extracted at build time. Calling these helpers
//! at runtime does nothing; debug builds log a warning about the misuse.

use std::collections::BTreeMap;

use tracing::warn;

/// Custom route definition for a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct I18nRoute {
	/// Per-locale path overrides, keyed by locale code.
	pub paths: BTreeMap<String, String>,
	/// Locales the page is localized for; empty means all.
	pub locales: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I18nRouteOption {
	/// Opt the page out of localization.
	Disabled,
	Custom(I18nRoute),
}

impl From<I18nRoute> for I18nRouteOption {
	fn from(route: I18nRoute) -> Self {
		I18nRouteOption::Custom(route)
	}
}

/// Define a custom localized route for a page.
///
/// Only meaningful to build-time extraction; a no-op at runtime.
pub fn define_i18n_route(route: impl Into<I18nRouteOption>) {
	let _route = route.into();
	if cfg!(debug_assertions) {
		warn_runtime_usage("define_i18n_route");
	}
}

fn warn_runtime_usage(method: &str) {
	warn!(
		method,
		"{method}() is a compiler-hint helper that is only usable inside page definitions. \
		 Its arguments should be compiled away and passing it at runtime has no effect."
	);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_define_i18n_route_is_a_noop() {
		let route = I18nRoute {
			paths: BTreeMap::from([("fr".to_string(), "/a-propos".to_string())]),
			locales: vec!["en".to_string(), "fr".to_string()],
		};
		define_i18n_route(route);
		define_i18n_route(I18nRouteOption::Disabled);
	}

	#[test]
	fn test_route_converts_into_custom_option() {
		let route = I18nRoute::default();
		assert_eq!(
			I18nRouteOption::from(route.clone()),
			I18nRouteOption::Custom(route)
		);
	}
}
