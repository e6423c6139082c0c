// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale routing configuration section.
//!
//! ```toml
//! [i18n]
//! strategy = "prefix"
//! default_locale = "en"
//! root_redirect = { locale = "fr", status_code = 301 }
//! locales = ["en", { code = "fr", iso = "fr-FR", name = "Français" }]
//!
//! [i18n.detect_browser_language]
//! use_cookie = true
//! cookie_key = "i18n_redirected"
//! ```

use lingo_common_i18n::{
	CookieConfig, Direction, I18nError, LocaleCode, LocaleDetector, LocaleRecord, LocaleRegistry,
	RedirectConfig, RootRedirect, RoutingConfig, Strategy, DEFAULT_LOCALE,
	DEFAULT_ROUTES_NAME_SEPARATOR,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A configured locale: either a bare code or a table with metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocaleEntry {
	Code(String),
	Detailed {
		code: String,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		iso: Option<String>,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		name: Option<String>,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		dir: Option<Direction>,
	},
}

impl LocaleEntry {
	fn into_record(self) -> LocaleRecord {
		match self {
			LocaleEntry::Code(code) => LocaleRecord::new(code),
			LocaleEntry::Detailed {
				code,
				iso,
				name,
				dir,
			} => {
				let mut record = LocaleRecord::new(code).with_direction(dir.unwrap_or_default());
				if let Some(iso) = iso {
					record = record.with_tag(iso);
				}
				if let Some(name) = name {
					record = record.with_name(name);
				}
				record
			}
		}
	}
}

/// Root redirect target: a bare locale (302) or a table with a status code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RootRedirectSetting {
	Locale(String),
	Detailed {
		locale: String,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		status_code: Option<u16>,
	},
}

impl RootRedirectSetting {
	pub fn locale(&self) -> &str {
		match self {
			RootRedirectSetting::Locale(locale)
			| RootRedirectSetting::Detailed { locale, .. } => locale,
		}
	}

	pub fn status_code(&self) -> Option<u16> {
		match self {
			RootRedirectSetting::Locale(_) => None,
			RootRedirectSetting::Detailed { status_code, .. } => *status_code,
		}
	}

	/// Overlay `other` onto `self`. The overlay's locale always wins; its
	/// status code only when it carries one.
	pub fn merge(&mut self, other: Self) {
		let status_code = other.status_code().or_else(|| self.status_code());
		*self = match status_code {
			Some(status_code) => RootRedirectSetting::Detailed {
				locale: other.locale().to_string(),
				status_code: Some(status_code),
			},
			None => other,
		};
	}

	fn into_root_redirect(self) -> Result<RootRedirect, I18nError> {
		match self {
			RootRedirectSetting::Locale(locale) => Ok(RootRedirect::new(locale)),
			RootRedirectSetting::Detailed {
				locale,
				status_code: None,
			} => Ok(RootRedirect::new(locale)),
			RootRedirectSetting::Detailed {
				locale,
				status_code: Some(status_code),
			} => RootRedirect::with_status_code(locale, status_code),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectBrowserLanguageLayer {
	#[serde(default)]
	pub use_cookie: Option<bool>,
	#[serde(default)]
	pub cookie_key: Option<String>,
}

impl DetectBrowserLanguageLayer {
	pub fn merge(&mut self, other: Self) {
		if other.use_cookie.is_some() {
			self.use_cookie = other.use_cookie;
		}
		if other.cookie_key.is_some() {
			self.cookie_key = other.cookie_key;
		}
	}

	fn finalize(self) -> CookieConfig {
		let defaults = CookieConfig::default();
		CookieConfig {
			use_cookie: self.use_cookie.unwrap_or(defaults.use_cookie),
			cookie_key: self.cookie_key.unwrap_or(defaults.cookie_key),
		}
	}
}

/// i18n configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct I18nConfigLayer {
	#[serde(default)]
	pub strategy: Option<Strategy>,
	#[serde(default)]
	pub default_locale: Option<String>,
	#[serde(default)]
	pub locales: Option<Vec<LocaleEntry>>,
	#[serde(default)]
	pub root_redirect: Option<RootRedirectSetting>,
	#[serde(default)]
	pub detect_browser_language: Option<DetectBrowserLanguageLayer>,
	#[serde(default)]
	pub routes_name_separator: Option<String>,
}

impl I18nConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.strategy.is_some() {
			self.strategy = other.strategy;
		}
		if other.default_locale.is_some() {
			self.default_locale = other.default_locale;
		}
		if other.locales.is_some() {
			self.locales = other.locales;
		}
		match (&mut self.root_redirect, other.root_redirect) {
			(Some(base), Some(overlay)) => base.merge(overlay),
			(base @ None, Some(overlay)) => *base = Some(overlay),
			_ => {}
		}
		match (&mut self.detect_browser_language, other.detect_browser_language) {
			(Some(base), Some(overlay)) => base.merge(overlay),
			(base @ None, Some(overlay)) => *base = Some(overlay),
			_ => {}
		}
		if other.routes_name_separator.is_some() {
			self.routes_name_separator = other.routes_name_separator;
		}
	}

	/// Build the runtime configuration.
	///
	/// Without a `locales` list the registry holds only the default locale.
	/// Cross-field checks happen in [`I18nConfig::validate`].
	pub fn finalize(self) -> Result<I18nConfig, ConfigError> {
		let default_locale = self
			.default_locale
			.unwrap_or_else(|| DEFAULT_LOCALE.to_string());

		let records = match self.locales {
			Some(entries) if !entries.is_empty() => {
				entries.into_iter().map(LocaleEntry::into_record).collect()
			}
			_ => vec![LocaleRecord::new(default_locale.clone())],
		};
		let registry = LocaleRegistry::new(records)?;

		let root_redirect = self
			.root_redirect
			.map(RootRedirectSetting::into_root_redirect)
			.transpose()?
			.map(|mut root_redirect| {
				if let Some(code) = registry.canonical(root_redirect.locale.as_str()) {
					root_redirect.locale = code.clone();
				}
				root_redirect
			});

		let default_locale = registry
			.canonical(&default_locale)
			.cloned()
			.unwrap_or_else(|| LocaleCode::new(default_locale));

		Ok(I18nConfig {
			strategy: self.strategy.unwrap_or_default(),
			default_locale,
			registry,
			root_redirect,
			cookie: self.detect_browser_language.unwrap_or_default().finalize(),
			routes_name_separator: self
				.routes_name_separator
				.unwrap_or_else(|| DEFAULT_ROUTES_NAME_SEPARATOR.to_string()),
		})
	}
}

/// Locale routing configuration (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I18nConfig {
	pub strategy: Strategy,
	pub default_locale: LocaleCode,
	pub registry: LocaleRegistry,
	pub root_redirect: Option<RootRedirect>,
	pub cookie: CookieConfig,
	pub routes_name_separator: String,
}

impl Default for I18nConfig {
	fn default() -> Self {
		Self {
			strategy: Strategy::default(),
			default_locale: LocaleCode::new(DEFAULT_LOCALE),
			registry: LocaleRegistry::default(),
			root_redirect: None,
			cookie: CookieConfig::default(),
			routes_name_separator: DEFAULT_ROUTES_NAME_SEPARATOR.to_string(),
		}
	}
}

impl I18nConfig {
	pub fn routing(&self) -> RoutingConfig {
		RoutingConfig {
			strategy: self.strategy,
			default_locale: self.default_locale.clone(),
			routes_name_separator: self.routes_name_separator.clone(),
		}
	}

	pub fn redirect(&self) -> RedirectConfig {
		RedirectConfig {
			strategy: self.strategy,
			default_locale: self.default_locale.clone(),
			root_redirect: self.root_redirect.clone(),
		}
	}

	pub fn detector(&self) -> LocaleDetector {
		LocaleDetector::new(self.registry.clone(), self.cookie.clone())
	}

	/// Validate cross-field rules.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if !self.registry.contains(self.default_locale.as_str()) {
			return Err(ConfigError::Validation(format!(
				"default locale '{}' is not one of the configured locales",
				self.default_locale
			)));
		}

		if let Some(root_redirect) = &self.root_redirect {
			if !self.registry.contains(root_redirect.locale.as_str()) {
				return Err(ConfigError::Validation(format!(
					"root redirect locale '{}' is not one of the configured locales",
					root_redirect.locale
				)));
			}
		}

		if self.cookie.use_cookie && !is_valid_cookie_name(&self.cookie.cookie_key) {
			return Err(ConfigError::InvalidValue {
				key: "i18n.detect_browser_language.cookie_key".to_string(),
				message: format!("'{}' is not a valid cookie name", self.cookie.cookie_key),
			});
		}

		if self.routes_name_separator.is_empty() {
			return Err(ConfigError::InvalidValue {
				key: "i18n.routes_name_separator".to_string(),
				message: "must not be empty".to_string(),
			});
		}

		Ok(())
	}
}

fn is_valid_cookie_name(name: &str) -> bool {
	!name.is_empty()
		&& name
			.bytes()
			.all(|b| b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b))
}
