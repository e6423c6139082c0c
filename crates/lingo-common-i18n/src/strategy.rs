// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Routing strategies and locale-aware path helpers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::I18nError;
use crate::locale::{LocaleCode, LocaleRegistry};

/// Separator between a route's base name and its locale suffix
/// (`about___fr`).
pub const DEFAULT_ROUTES_NAME_SEPARATOR: &str = "___";

/// Policy governing whether locale codes are prefixed onto URL paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
	/// Never prefix; the locale is not part of the URL.
	NoPrefix,
	/// Prefix every locale, including the default.
	Prefix,
	/// Prefix every locale except the default.
	#[default]
	PrefixExceptDefault,
	/// Prefix every locale; the default is also served unprefixed.
	PrefixAndDefault,
}

impl Strategy {
	pub fn as_str(&self) -> &'static str {
		match self {
			Strategy::NoPrefix => "no_prefix",
			Strategy::Prefix => "prefix",
			Strategy::PrefixExceptDefault => "prefix_except_default",
			Strategy::PrefixAndDefault => "prefix_and_default",
		}
	}

	/// Whether paths generated for `locale` carry its prefix.
	///
	/// The default locale is left unprefixed under both
	/// `prefix_except_default` and `prefix_and_default`.
	pub fn is_prefixed(&self, locale: &LocaleCode, default_locale: &LocaleCode) -> bool {
		match self {
			Strategy::NoPrefix => false,
			Strategy::Prefix => true,
			Strategy::PrefixExceptDefault | Strategy::PrefixAndDefault => {
				!locale.matches(default_locale.as_str())
			}
		}
	}

	/// Localize an application path for `locale`.
	///
	/// Paths are made absolute, a query or fragment suffix is preserved, and
	/// the root localizes to `/<locale>` without a trailing slash.
	pub fn localize_path(&self, path: &str, locale: &LocaleCode, default_locale: &LocaleCode) -> String {
		let (path, suffix) = split_suffix(path);
		let path = match path {
			"" => "/".to_string(),
			p if p.starts_with('/') => p.to_string(),
			p => format!("/{p}"),
		};

		if !self.is_prefixed(locale, default_locale) {
			return format!("{path}{suffix}");
		}

		if path == "/" {
			format!("/{locale}{suffix}")
		} else {
			format!("/{locale}{path}{suffix}")
		}
	}
}

impl fmt::Display for Strategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Strategy {
	type Err = I18nError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"no_prefix" => Ok(Strategy::NoPrefix),
			"prefix" => Ok(Strategy::Prefix),
			"prefix_except_default" => Ok(Strategy::PrefixExceptDefault),
			"prefix_and_default" => Ok(Strategy::PrefixAndDefault),
			_ => Err(I18nError::UnknownStrategy(s.to_string())),
		}
	}
}

/// Settings shared by the path helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingConfig {
	pub strategy: Strategy,
	pub default_locale: LocaleCode,
	pub routes_name_separator: String,
}

impl RoutingConfig {
	pub fn new(strategy: Strategy, default_locale: impl Into<LocaleCode>) -> Self {
		Self {
			strategy,
			default_locale: default_locale.into(),
			routes_name_separator: DEFAULT_ROUTES_NAME_SEPARATOR.to_string(),
		}
	}
}

/// Localize `path` for `locale` under the configured strategy.
///
/// ```
/// use lingo_common_i18n::{locale_path, LocaleCode, RoutingConfig, Strategy};
///
/// let config = RoutingConfig::new(Strategy::PrefixExceptDefault, "en");
/// assert_eq!(locale_path("/about", &LocaleCode::new("fr"), &config), "/fr/about");
/// assert_eq!(locale_path("/about", &LocaleCode::new("en"), &config), "/about");
/// ```
pub fn locale_path(path: &str, locale: &LocaleCode, config: &RoutingConfig) -> String {
	config
		.strategy
		.localize_path(path, locale, &config.default_locale)
}

/// Split a leading registered-locale segment off `path`.
///
/// Returns the matched locale (canonical code) and the remaining path, which
/// is `/` when the path was only the prefix. Paths without a registered
/// prefix come back unchanged.
pub fn strip_locale_prefix(path: &str, registry: &LocaleRegistry) -> (Option<LocaleCode>, String) {
	let (path_part, suffix) = split_suffix(path);
	let trimmed = path_part.strip_prefix('/').unwrap_or(path_part);
	let (first, rest) = match trimmed.split_once('/') {
		Some((first, rest)) => (first, Some(rest)),
		None => (trimmed, None),
	};

	match registry.get(first) {
		Some(record) => {
			let rest = match rest {
				Some(rest) => format!("/{rest}"),
				None => "/".to_string(),
			};
			(Some(record.code.clone()), format!("{rest}{suffix}"))
		}
		None => (None, path.to_string()),
	}
}

/// Path for the current page in another locale.
pub fn switch_locale_path(
	current_path: &str,
	target: &LocaleCode,
	config: &RoutingConfig,
	registry: &LocaleRegistry,
) -> String {
	let (_, base) = strip_locale_prefix(current_path, registry);
	locale_path(&base, target, config)
}

/// Route name without its locale suffix (`about___fr` → `about`).
pub fn route_base_name<'a>(route_name: &'a str, separator: &str) -> &'a str {
	if separator.is_empty() {
		return route_name;
	}
	route_name.split(separator).next().unwrap_or(route_name)
}

/// Route name carrying a locale suffix (`about` → `about___fr`).
pub fn localized_route_name(base_name: &str, locale: &LocaleCode, separator: &str) -> String {
	format!("{base_name}{separator}{locale}")
}

fn split_suffix(path: &str) -> (&str, &str) {
	match path.find(['?', '#']) {
		Some(idx) => path.split_at(idx),
		None => (path, ""),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn code(c: &str) -> LocaleCode {
		LocaleCode::new(c)
	}

	fn registry() -> LocaleRegistry {
		LocaleRegistry::from_codes(["en", "fr", "pt-BR"]).unwrap()
	}

	#[test]
	fn test_strategy_parse_and_display() {
		for strategy in [
			Strategy::NoPrefix,
			Strategy::Prefix,
			Strategy::PrefixExceptDefault,
			Strategy::PrefixAndDefault,
		] {
			assert_eq!(strategy.as_str().parse::<Strategy>().unwrap(), strategy);
		}
		assert_eq!(" PREFIX ".parse::<Strategy>().unwrap(), Strategy::Prefix);
		assert!(matches!(
			"suffix".parse::<Strategy>(),
			Err(I18nError::UnknownStrategy(_))
		));
	}

	#[test]
	fn test_strategy_serde_uses_snake_case() {
		let json = serde_json::to_string(&Strategy::PrefixExceptDefault).unwrap();
		assert_eq!(json, "\"prefix_except_default\"");
	}

	#[test]
	fn test_is_prefixed() {
		let en = code("en");
		let fr = code("fr");
		assert!(!Strategy::NoPrefix.is_prefixed(&fr, &en));
		assert!(Strategy::Prefix.is_prefixed(&en, &en));
		assert!(!Strategy::PrefixExceptDefault.is_prefixed(&en, &en));
		assert!(Strategy::PrefixExceptDefault.is_prefixed(&fr, &en));
		assert!(!Strategy::PrefixAndDefault.is_prefixed(&en, &en));
		assert!(Strategy::PrefixAndDefault.is_prefixed(&fr, &en));
	}

	#[test]
	fn test_locale_path_root_has_no_trailing_slash() {
		let config = RoutingConfig::new(Strategy::Prefix, "en");
		assert_eq!(locale_path("/", &code("fr"), &config), "/fr");
		assert_eq!(locale_path("", &code("en"), &config), "/en");
	}

	#[test]
	fn test_locale_path_preserves_query_and_fragment() {
		let config = RoutingConfig::new(Strategy::Prefix, "en");
		assert_eq!(
			locale_path("/search?q=1#top", &code("fr"), &config),
			"/fr/search?q=1#top"
		);
		assert_eq!(locale_path("/?x=1", &code("fr"), &config), "/fr?x=1");
	}

	#[test]
	fn test_locale_path_makes_relative_paths_absolute() {
		let config = RoutingConfig::new(Strategy::NoPrefix, "en");
		assert_eq!(locale_path("about", &code("fr"), &config), "/about");
	}

	#[test]
	fn test_strip_locale_prefix() {
		let registry = registry();
		assert_eq!(
			strip_locale_prefix("/fr/about", &registry),
			(Some(code("fr")), "/about".to_string())
		);
		assert_eq!(
			strip_locale_prefix("/pt-br", &registry),
			(Some(code("pt-BR")), "/".to_string())
		);
		assert_eq!(
			strip_locale_prefix("/fr?tab=2", &registry),
			(Some(code("fr")), "/?tab=2".to_string())
		);
		assert_eq!(
			strip_locale_prefix("/france/about", &registry),
			(None, "/france/about".to_string())
		);
		assert_eq!(strip_locale_prefix("/", &registry), (None, "/".to_string()));
	}

	#[test]
	fn test_switch_locale_path() {
		let registry = registry();
		let config = RoutingConfig::new(Strategy::PrefixExceptDefault, "en");
		assert_eq!(
			switch_locale_path("/fr/about", &code("en"), &config, &registry),
			"/about"
		);
		assert_eq!(
			switch_locale_path("/about", &code("fr"), &config, &registry),
			"/fr/about"
		);
		assert_eq!(
			switch_locale_path("/fr", &code("pt-BR"), &config, &registry),
			"/pt-BR"
		);
	}

	#[test]
	fn test_route_base_name() {
		assert_eq!(route_base_name("about___fr", "___"), "about");
		assert_eq!(route_base_name("about", "___"), "about");
		assert_eq!(route_base_name("blog-slug___en___default", "___"), "blog-slug");
		assert_eq!(route_base_name("about___fr", ""), "about___fr");
	}

	#[test]
	fn test_localized_route_name() {
		assert_eq!(localized_route_name("about", &code("fr"), "___"), "about___fr");
	}
}
