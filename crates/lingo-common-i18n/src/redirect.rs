// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Root path redirect policy.
//!
//! Decides, for a request to `/`, whether the HTTP layer should redirect to a
//! locale-specific root and with which status. Performs no I/O.

use http::StatusCode;
use tracing::{debug, instrument};

use crate::error::{I18nError, Result};
use crate::locale::LocaleCode;
use crate::strategy::Strategy;

/// The only path the policy applies to.
pub const ROOT_PATH: &str = "/";

/// Temporary redirect, used unless a root redirect overrides it.
pub const DEFAULT_REDIRECT_STATUS: StatusCode = StatusCode::FOUND;

/// Explicitly configured redirect target for the site root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootRedirect {
	pub locale: LocaleCode,
	pub status: StatusCode,
}

impl RootRedirect {
	pub fn new(locale: impl Into<LocaleCode>) -> Self {
		Self {
			locale: locale.into(),
			status: DEFAULT_REDIRECT_STATUS,
		}
	}

	/// Root redirect with an explicit status, which must be a 3xx code.
	pub fn with_status_code(locale: impl Into<LocaleCode>, status_code: u16) -> Result<Self> {
		let status = StatusCode::from_u16(status_code)
			.ok()
			.filter(StatusCode::is_redirection)
			.ok_or(I18nError::InvalidRedirectStatus(status_code))?;

		Ok(Self {
			locale: locale.into(),
			status,
		})
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectConfig {
	pub strategy: Strategy,
	pub default_locale: LocaleCode,
	pub root_redirect: Option<RootRedirect>,
}

/// What the HTTP layer should do with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectDecision {
	/// Serve the request normally.
	Proceed,
	/// Respond with `status` and `Location: target_path`.
	Redirect { target_path: String, status: StatusCode },
}

impl RedirectDecision {
	pub fn should_redirect(&self) -> bool {
		matches!(self, RedirectDecision::Redirect { .. })
	}

	pub fn target_path(&self) -> Option<&str> {
		match self {
			RedirectDecision::Proceed => None,
			RedirectDecision::Redirect { target_path, .. } => Some(target_path),
		}
	}

	pub fn status(&self) -> Option<StatusCode> {
		match self {
			RedirectDecision::Proceed => None,
			RedirectDecision::Redirect { status, .. } => Some(*status),
		}
	}
}

/// Decide whether a request for `request_path` should be redirected.
///
/// Only the exact root path is considered. The first applicable rule wins:
///
/// 1. a configured root redirect targets that locale's localized root,
///    regardless of detection;
/// 2. if the strategy prefixes `resolved` (or the default locale when nothing
///    was resolved), target that locale's localized root;
/// 3. otherwise proceed.
///
/// A target equal to the request path is never returned, so `no_prefix`
/// configurations cannot loop.
///
/// ```
/// use lingo_common_i18n::{decide_root_redirect, LocaleCode, RedirectConfig, RootRedirect, Strategy};
///
/// let config = RedirectConfig {
///     strategy: Strategy::Prefix,
///     default_locale: LocaleCode::new("en"),
///     root_redirect: Some(RootRedirect::new("fr")),
/// };
/// let decision = decide_root_redirect("/", &config, Some(&LocaleCode::new("en")));
/// assert_eq!(decision.target_path(), Some("/fr"));
/// ```
#[instrument(level = "trace", skip(config), fields(strategy = %config.strategy))]
pub fn decide_root_redirect(
	request_path: &str,
	config: &RedirectConfig,
	resolved: Option<&LocaleCode>,
) -> RedirectDecision {
	if request_path != ROOT_PATH {
		return RedirectDecision::Proceed;
	}

	let (locale, status) = match &config.root_redirect {
		Some(root_redirect) => (&root_redirect.locale, root_redirect.status),
		None => {
			let locale = resolved.unwrap_or(&config.default_locale);
			if !config.strategy.is_prefixed(locale, &config.default_locale) {
				return RedirectDecision::Proceed;
			}
			(locale, DEFAULT_REDIRECT_STATUS)
		}
	};

	let target_path = config
		.strategy
		.localize_path(ROOT_PATH, locale, &config.default_locale);

	if target_path == request_path {
		debug!(locale = %locale, "root redirect target is the root itself, proceeding");
		return RedirectDecision::Proceed;
	}

	RedirectDecision::Redirect {
		target_path,
		status,
	}
}
