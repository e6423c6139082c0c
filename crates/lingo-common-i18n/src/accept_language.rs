// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `Accept-Language` header parsing.

use serde::Serialize;
use tracing::trace;

use crate::locale::{is_well_formed_tag, primary_subtag};

/// A language tag with its quality weight from an `Accept-Language` header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguagePreference {
	pub tag: String,
	/// Quality weight in `[0.0, 1.0]`.
	pub quality: f32,
}

impl LanguagePreference {
	pub fn new(tag: impl Into<String>, quality: f32) -> Self {
		Self {
			tag: tag.into(),
			quality,
		}
	}

	pub fn primary_subtag(&self) -> &str {
		primary_subtag(&self.tag)
	}
}

/// Parse a raw `Accept-Language` header into preferences, highest quality first.
///
/// Never fails: malformed segments are skipped, a missing or unparsable
/// quality becomes `1.0` or `0.0` respectively, and out-of-range qualities are
/// clamped into `[0.0, 1.0]`. Equal qualities keep their header order.
///
/// ```
/// use lingo_common_i18n::parse_accept_language;
///
/// let prefs = parse_accept_language("fr-CH, fr;q=0.9, en;q=0.8");
/// let tags: Vec<_> = prefs.iter().map(|p| p.tag.as_str()).collect();
/// assert_eq!(tags, ["fr-CH", "fr", "en"]);
/// ```
pub fn parse_accept_language(header: &str) -> Vec<LanguagePreference> {
	let mut preferences: Vec<LanguagePreference> =
		header.split(',').filter_map(parse_segment).collect();

	// `sort_by` is stable, so equal weights keep header order.
	preferences.sort_by(|a, b| b.quality.total_cmp(&a.quality));
	preferences
}

fn parse_segment(segment: &str) -> Option<LanguagePreference> {
	let mut parts = segment.split(';');
	let tag = parts.next()?.trim();

	if tag.is_empty() {
		return None;
	}

	// The wildcard names no locale, so it can never select one.
	if tag == "*" || !is_well_formed_tag(tag) {
		trace!(segment, "skipping malformed Accept-Language segment");
		return None;
	}

	let quality = parts
		.find_map(|param| {
			let (key, value) = param.split_once('=')?;
			key.trim()
				.eq_ignore_ascii_case("q")
				.then(|| parse_quality(value))
		})
		.unwrap_or(1.0);

	Some(LanguagePreference::new(tag, quality))
}

fn parse_quality(raw: &str) -> f32 {
	match raw.trim().parse::<f32>() {
		Ok(q) if q.is_nan() || q <= 0.0 => 0.0,
		Ok(q) => q.min(1.0),
		Err(_) => 0.0,
	}
}
