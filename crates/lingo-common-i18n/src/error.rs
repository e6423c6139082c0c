// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Errors raised while building locale configuration.
//!
//! Request-time operations (parsing, matching, redirect decisions) never fail;
//! they degrade to empty or `None` results instead.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum I18nError {
	#[error("Locale code must not be empty")]
	EmptyLocaleCode,

	#[error("Locale code {0:?} cannot be used as a path segment")]
	InvalidLocaleCode(String),

	#[error("Duplicate locale code: {0}")]
	DuplicateLocale(String),

	#[error("Locale {code} has a malformed language tag {tag:?}")]
	InvalidLocaleTag { code: String, tag: String },

	#[error("Status {0} is not a redirect status code")]
	InvalidRedirectStatus(u16),

	#[error("Unknown routing strategy: {0}")]
	UnknownStrategy(String),
}

pub type Result<T> = std::result::Result<T, I18nError>;
