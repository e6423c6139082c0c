// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;

use lingo_common_i18n::Strategy;
use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::sections::{
	DetectBrowserLanguageLayer, HttpConfigLayer, I18nConfigLayer, LocaleEntry, LoggingConfigLayer,
	RootRedirectSetting,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ServerConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ServerConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/lingo/server.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ServerConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ServerConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: LINGO_SERVER_<SECTION>_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(ServerConfigLayer {
			http: Some(load_http_from_env()?),
			i18n: Some(load_i18n_from_env()?),
			logging: Some(load_logging_from_env()?),
		})
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_bool(name: &str) -> Option<bool> {
	env_var(name).map(|v| parse_bool(&v))
}

fn env_u16(name: &str) -> Result<Option<u16>, ConfigError> {
	match env_var(name) {
		Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid u16 value '{v}'"),
		}),
		None => Ok(None),
	}
}

fn parse_bool(value: &str) -> bool {
	value.eq_ignore_ascii_case("true") || value == "1"
}

/// Comma-separated locale codes, e.g. `en,fr,pt-BR`.
fn parse_locale_list(value: &str) -> Vec<LocaleEntry> {
	value
		.split(',')
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.map(|s| LocaleEntry::Code(s.to_string()))
		.collect()
}

fn parse_strategy(key: &str, value: &str) -> Result<Strategy, ConfigError> {
	value.parse().map_err(|e: lingo_common_i18n::I18nError| ConfigError::InvalidValue {
		key: key.to_string(),
		message: e.to_string(),
	})
}

fn load_http_from_env() -> Result<HttpConfigLayer, ConfigError> {
	Ok(HttpConfigLayer {
		host: env_var("LINGO_SERVER_HOST"),
		port: env_u16("LINGO_SERVER_PORT")?,
		base_url: env_var("LINGO_SERVER_BASE_URL"),
	})
}

fn load_i18n_from_env() -> Result<I18nConfigLayer, ConfigError> {
	let strategy = env_var("LINGO_SERVER_I18N_STRATEGY")
		.map(|v| parse_strategy("LINGO_SERVER_I18N_STRATEGY", &v))
		.transpose()?;

	let status_code = env_u16("LINGO_SERVER_I18N_ROOT_REDIRECT_STATUS")?;
	let root_redirect = match (env_var("LINGO_SERVER_I18N_ROOT_REDIRECT"), status_code) {
		(Some(locale), status_code) => Some(RootRedirectSetting::Detailed {
			locale,
			status_code,
		}),
		(None, Some(_)) => {
			return Err(ConfigError::InvalidValue {
				key: "LINGO_SERVER_I18N_ROOT_REDIRECT_STATUS".to_string(),
				message: "requires LINGO_SERVER_I18N_ROOT_REDIRECT to be set".to_string(),
			})
		}
		(None, None) => None,
	};

	Ok(I18nConfigLayer {
		strategy,
		default_locale: env_var("LINGO_SERVER_I18N_DEFAULT_LOCALE"),
		locales: env_var("LINGO_SERVER_I18N_LOCALES").map(|v| parse_locale_list(&v)),
		root_redirect,
		detect_browser_language: Some(DetectBrowserLanguageLayer {
			use_cookie: env_bool("LINGO_SERVER_I18N_USE_COOKIE"),
			cookie_key: env_var("LINGO_SERVER_I18N_COOKIE_KEY"),
		}),
		routes_name_separator: env_var("LINGO_SERVER_I18N_ROUTES_NAME_SEPARATOR"),
	})
}

fn load_logging_from_env() -> Result<LoggingConfigLayer, ConfigError> {
	Ok(LoggingConfigLayer {
		level: env_var("LINGO_SERVER_LOG_LEVEL"),
	})
}
