// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Effective locale resolution.

use crate::locale::{LocaleCode, LocaleRegistry};

/// Resolve the effective locale from a preferred locale and the configured default.
///
/// Resolution order (highest to lowest priority):
/// 1. Preferred locale, e.g. from detection (if registered)
/// 2. Configured default locale (if registered)
/// 3. First registered locale
///
/// Returns `None` only for an empty registry. The returned code is always the
/// registry's canonical spelling.
///
/// # Example
///
/// ```
/// use lingo_common_i18n::{resolve_locale, LocaleRegistry};
///
/// let registry = LocaleRegistry::from_codes(["en", "es"]).unwrap();
///
/// // Preference takes priority
/// assert_eq!(resolve_locale(&registry, Some("es"), "en").unwrap(), "es");
///
/// // Falls back to the default if there is no preference
/// assert_eq!(resolve_locale(&registry, None, "es").unwrap(), "es");
///
/// // Falls back to the first registered locale if both are invalid
/// assert_eq!(resolve_locale(&registry, Some("invalid"), "also_invalid").unwrap(), "en");
/// ```
pub fn resolve_locale<'r>(
	registry: &'r LocaleRegistry,
	preferred: Option<&str>,
	default_locale: &str,
) -> Option<&'r LocaleCode> {
	if let Some(code) = preferred.and_then(|locale| registry.canonical(locale)) {
		return Some(code);
	}

	if let Some(code) = registry.canonical(default_locale) {
		return Some(code);
	}

	registry.codes().next()
}
