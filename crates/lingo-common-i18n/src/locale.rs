// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale metadata and the registry of configured locales.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{I18nError, Result};

/// Default locale used when nothing else is configured.
pub const DEFAULT_LOCALE: &str = "en";

/// Text direction for a locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
	/// Left-to-right (e.g., English, Spanish)
	#[default]
	Ltr,
	/// Right-to-left (e.g., Arabic, Hebrew)
	Rtl,
}

impl Direction {
	/// Returns the HTML `dir` attribute value.
	pub fn as_html_dir(&self) -> &'static str {
		match self {
			Direction::Ltr => "ltr",
			Direction::Rtl => "rtl",
		}
	}
}

/// Identifier of a configured locale, e.g. `en` or `fr-CA`.
///
/// Codes compare case-sensitively through `PartialEq`; use [`LocaleCode::matches`]
/// for the case-insensitive comparison used by lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleCode(String);

impl LocaleCode {
	pub fn new(code: impl Into<String>) -> Self {
		Self(code.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Case-insensitive comparison against a raw code.
	pub fn matches(&self, other: &str) -> bool {
		self.0.eq_ignore_ascii_case(other)
	}

	pub fn primary_subtag(&self) -> &str {
		primary_subtag(&self.0)
	}
}

impl fmt::Display for LocaleCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for LocaleCode {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl From<&str> for LocaleCode {
	fn from(code: &str) -> Self {
		Self(code.to_string())
	}
}

impl From<String> for LocaleCode {
	fn from(code: String) -> Self {
		Self(code)
	}
}

impl PartialEq<str> for LocaleCode {
	fn eq(&self, other: &str) -> bool {
		self.0 == other
	}
}

impl PartialEq<&str> for LocaleCode {
	fn eq(&self, other: &&str) -> bool {
		self.0 == *other
	}
}

/// Outcome of locale matching. `None` means no acceptable match was found,
/// which is distinct from matching the default locale.
pub type ResolvedLocale = Option<LocaleCode>;

/// Metadata about a configured locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleRecord {
	pub code: LocaleCode,
	/// BCP 47 tag used for browser matching and SEO output (`iso` in config).
	pub normalized_tag: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	pub direction: Direction,
}

impl LocaleRecord {
	pub fn new(code: impl Into<String>) -> Self {
		let code = code.into();
		Self {
			normalized_tag: code.clone(),
			code: LocaleCode(code),
			name: None,
			direction: Direction::Ltr,
		}
	}

	pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
		self.normalized_tag = tag.into();
		self
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn with_direction(mut self, direction: Direction) -> Self {
		self.direction = direction;
		self
	}

	pub fn is_rtl(&self) -> bool {
		self.direction == Direction::Rtl
	}

	/// Whether `tag` names this record exactly (code or normalized tag).
	pub(crate) fn is_exactly(&self, tag: &str) -> bool {
		self.code.matches(tag) || self.normalized_tag.eq_ignore_ascii_case(tag)
	}
}

/// Ordered, validated set of configured locales.
///
/// Built once at configuration-load time and immutable afterwards. Lookups are
/// case-insensitive and always return the canonical record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleRegistry {
	records: Vec<LocaleRecord>,
}

impl LocaleRegistry {
	pub fn new(records: Vec<LocaleRecord>) -> Result<Self> {
		for (idx, record) in records.iter().enumerate() {
			validate_code(record.code.as_str())?;

			if !is_well_formed_tag(&record.normalized_tag) {
				return Err(I18nError::InvalidLocaleTag {
					code: record.code.to_string(),
					tag: record.normalized_tag.clone(),
				});
			}

			if records[..idx]
				.iter()
				.any(|prev| prev.code.matches(record.code.as_str()))
			{
				return Err(I18nError::DuplicateLocale(record.code.to_string()));
			}
		}

		Ok(Self { records })
	}

	pub fn from_codes<I, S>(codes: I) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::new(codes.into_iter().map(LocaleRecord::new).collect())
	}

	/// Get the record for a code, ignoring ASCII case.
	pub fn get(&self, code: &str) -> Option<&LocaleRecord> {
		self.records.iter().find(|r| r.code.matches(code))
	}

	pub fn contains(&self, code: &str) -> bool {
		self.get(code).is_some()
	}

	/// Canonical code for a raw, possibly differently-cased, code.
	pub fn canonical(&self, code: &str) -> Option<&LocaleCode> {
		self.get(code).map(|r| &r.code)
	}

	pub fn codes(&self) -> impl Iterator<Item = &LocaleCode> {
		self.records.iter().map(|r| &r.code)
	}

	pub fn records(&self) -> &[LocaleRecord] {
		&self.records
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Check if a locale uses right-to-left text direction.
	///
	/// Returns `false` for unregistered locales.
	pub fn is_rtl(&self, code: &str) -> bool {
		self.get(code).is_some_and(LocaleRecord::is_rtl)
	}
}

impl Default for LocaleRegistry {
	fn default() -> Self {
		Self {
			records: vec![LocaleRecord::new(DEFAULT_LOCALE)],
		}
	}
}

/// Primary language subtag of a tag (`en` for `en-US`).
pub fn primary_subtag(tag: &str) -> &str {
	tag.split(['-', '_']).next().unwrap_or(tag)
}

/// Whether `tag` is a well-formed language tag: `-`-separated subtags of
/// 1 to 8 ASCII alphanumerics with an alphabetic primary subtag.
pub fn is_well_formed_tag(tag: &str) -> bool {
	let mut subtags = tag.split('-');

	let primary_ok = subtags
		.next()
		.is_some_and(|s| (1..=8).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_alphabetic()));

	primary_ok && subtags.all(|s| (1..=8).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_alphanumeric()))
}

fn validate_code(code: &str) -> Result<()> {
	if code.is_empty() {
		return Err(I18nError::EmptyLocaleCode);
	}

	if code
		.chars()
		.any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '%'))
	{
		return Err(I18nError::InvalidLocaleCode(code.to_string()));
	}

	Ok(())
}
