// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Browser locale matching against the registry.

use tracing::trace;

use crate::accept_language::LanguagePreference;
use crate::locale::{primary_subtag, LocaleRecord, LocaleRegistry, ResolvedLocale};

/// Something that can be matched against the registry: a raw tag from a
/// client-reported language list, or a parsed [`LanguagePreference`].
pub trait LocaleCandidate {
	fn tag(&self) -> &str;

	fn quality(&self) -> f32 {
		1.0
	}
}

impl LocaleCandidate for str {
	fn tag(&self) -> &str {
		self
	}
}

impl LocaleCandidate for String {
	fn tag(&self) -> &str {
		self
	}
}

impl LocaleCandidate for LanguagePreference {
	fn tag(&self) -> &str {
		&self.tag
	}

	fn quality(&self) -> f32 {
		self.quality
	}
}

impl<T: LocaleCandidate + ?Sized> LocaleCandidate for &T {
	fn tag(&self) -> &str {
		(**self).tag()
	}

	fn quality(&self) -> f32 {
		(**self).quality()
	}
}

/// Select the registered locale that best serves an ordered candidate list.
///
/// Candidates are scanned in the given order and the first one that matches
/// any record wins. For a single candidate, matches are tried from most to
/// least specific:
///
/// 1. the candidate equals a record's code or normalized tag;
/// 2. the candidate's primary subtag equals a record's code or normalized tag
///    (`en-US` selects `en`);
/// 3. the candidate shares its primary subtag with a record's normalized tag
///    (`en` selects `en-GB`), first record in registry order.
///
/// All comparisons ignore ASCII case. Candidates weighted `q=0` are skipped.
///
/// ```
/// use lingo_common_i18n::{find_browser_locale, parse_accept_language, LocaleRegistry};
///
/// let registry = LocaleRegistry::from_codes(["en", "fr"]).unwrap();
/// let prefs = parse_accept_language("fr;q=1.0, en;q=0.5");
/// assert_eq!(find_browser_locale(&registry, &prefs).unwrap(), "fr");
/// assert!(find_browser_locale(&registry, ["de"]).is_none());
/// ```
pub fn find_browser_locale<I>(registry: &LocaleRegistry, candidates: I) -> ResolvedLocale
where
	I: IntoIterator,
	I::Item: LocaleCandidate,
{
	candidates
		.into_iter()
		.filter(|candidate| candidate.quality() > 0.0)
		.find_map(|candidate| match_candidate(registry, candidate.tag()))
		.map(|record| record.code.clone())
}

fn match_candidate<'r>(registry: &'r LocaleRegistry, tag: &str) -> Option<&'r LocaleRecord> {
	let tag = tag.trim();
	if tag.is_empty() {
		return None;
	}

	let records = registry.records();
	let primary = primary_subtag(tag);

	let matched = records
		.iter()
		.find(|r| r.is_exactly(tag))
		.or_else(|| records.iter().find(|r| r.is_exactly(primary)))
		.or_else(|| {
			records
				.iter()
				.find(|r| primary_subtag(&r.normalized_tag).eq_ignore_ascii_case(primary))
		});

	if let Some(record) = matched {
		trace!(candidate = tag, locale = %record.code, "browser locale matched");
	}

	matched
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::accept_language::parse_accept_language;
	use crate::locale::LocaleRecord;
	use proptest::prelude::*;

	fn en_fr() -> LocaleRegistry {
		LocaleRegistry::from_codes(["en", "fr"]).unwrap()
	}

	#[test]
	fn test_preferred_locale_wins() {
		let prefs = parse_accept_language("fr;q=1.0, en;q=0.5");
		assert_eq!(find_browser_locale(&en_fr(), &prefs).unwrap(), "fr");
	}

	#[test]
	fn test_no_match_returns_none() {
		assert!(find_browser_locale(&en_fr(), ["de"]).is_none());
		assert!(find_browser_locale(&en_fr(), Vec::<String>::new()).is_none());
	}

	#[test]
	fn test_region_candidate_matches_language_code() {
		assert_eq!(find_browser_locale(&en_fr(), ["en-US"]).unwrap(), "en");
	}

	#[test]
	fn test_language_candidate_matches_regional_record() {
		let registry = LocaleRegistry::new(vec![
			LocaleRecord::new("en-GB"),
			LocaleRecord::new("en-US"),
		])
		.unwrap();
		assert_eq!(find_browser_locale(&registry, ["en"]).unwrap(), "en-GB");
	}

	#[test]
	fn test_exact_match_beats_primary_subtag_match() {
		let registry = LocaleRegistry::new(vec![
			LocaleRecord::new("en-GB"),
			LocaleRecord::new("en-US"),
		])
		.unwrap();
		assert_eq!(find_browser_locale(&registry, ["en-US"]).unwrap(), "en-US");
	}

	#[test]
	fn test_primary_code_beats_sibling_region() {
		let registry = LocaleRegistry::new(vec![
			LocaleRecord::new("en-GB"),
			LocaleRecord::new("en"),
		])
		.unwrap();
		assert_eq!(find_browser_locale(&registry, ["en-AU"]).unwrap(), "en");
	}

	#[test]
	fn test_matches_normalized_tag() {
		let registry = LocaleRegistry::new(vec![
			LocaleRecord::new("english").with_tag("en-US"),
			LocaleRecord::new("french").with_tag("fr-FR"),
		])
		.unwrap();
		assert_eq!(find_browser_locale(&registry, ["fr-fr"]).unwrap(), "french");
		assert_eq!(find_browser_locale(&registry, ["en-CA"]).unwrap(), "english");
	}

	#[test]
	fn test_case_insensitive_and_canonical_output() {
		let registry = LocaleRegistry::from_codes(["pt-BR"]).unwrap();
		assert_eq!(find_browser_locale(&registry, ["PT-br"]).unwrap(), "pt-BR");
	}

	#[test]
	fn test_earlier_candidate_wins_over_better_later_match() {
		let registry = LocaleRegistry::from_codes(["en", "fr-CA"]).unwrap();
		let navigator = vec!["fr-FR".to_string(), "en".to_string()];
		assert_eq!(find_browser_locale(&registry, &navigator).unwrap(), "fr-CA");
	}

	#[test]
	fn test_zero_quality_candidates_skipped() {
		let prefs = parse_accept_language("fr;q=0, en;q=0.1");
		assert_eq!(find_browser_locale(&en_fr(), &prefs).unwrap(), "en");
	}

	proptest! {
		/// Matching is deterministic and only ever yields registered locales.
		#[test]
		fn result_is_registered_and_stable(tags in proptest::collection::vec("[a-zA-Z]{1,3}(-[a-zA-Z]{2})?", 0..6)) {
			let registry = LocaleRegistry::from_codes(["en", "fr-CA", "de", "zh-Hant"]).unwrap();
			let first = find_browser_locale(&registry, &tags);
			let second = find_browser_locale(&registry, &tags);
			prop_assert_eq!(&first, &second);
			if let Some(code) = first {
				prop_assert!(registry.contains(code.as_str()));
			}
		}
	}
}
