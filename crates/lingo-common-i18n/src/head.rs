// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale-aware `<head>` metadata: `lang`/`dir` attributes and SEO alternates.

use std::collections::{BTreeMap, HashSet};
use std::fmt::Write as _;

use serde::Serialize;

use crate::locale::{primary_subtag, LocaleCode, LocaleRecord, LocaleRegistry};
use crate::strategy::{switch_locale_path, RoutingConfig};

pub const DEFAULT_IDENTIFIER_ATTRIBUTE: &str = "hid";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleHeadOptions {
	/// Add the `dir` attribute to the html element.
	pub add_dir_attribute: bool,
	/// Add `hreflang` alternates, a canonical link and `og:locale` metadata.
	pub add_seo_attributes: bool,
	/// Attribute name carrying each entry's identifier.
	pub identifier_attribute: String,
}

impl Default for LocaleHeadOptions {
	fn default() -> Self {
		Self {
			add_dir_attribute: false,
			add_seo_attributes: false,
			identifier_attribute: DEFAULT_IDENTIFIER_ATTRIBUTE.to_string(),
		}
	}
}

/// The page the head is generated for.
#[derive(Debug, Clone, Copy)]
pub struct HeadContext<'a> {
	pub registry: &'a LocaleRegistry,
	pub routing: &'a RoutingConfig,
	pub current_locale: &'a LocaleCode,
	pub current_path: &'a str,
	/// Absolute origin used for SEO links; SEO output is skipped without it.
	pub base_url: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadLink {
	pub identifier: String,
	pub rel: String,
	pub href: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub hreflang: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadMeta {
	pub identifier: String,
	pub property: String,
	pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocaleHead {
	pub identifier_attribute: String,
	pub html_attrs: BTreeMap<String, String>,
	pub link: Vec<HeadLink>,
	pub meta: Vec<HeadMeta>,
}

impl LocaleHead {
	/// Render the links and meta entries as HTML tags.
	pub fn to_html_tags(&self) -> String {
		let id = &self.identifier_attribute;
		let mut out = String::new();

		for link in &self.link {
			let _ = write!(
				out,
				r#"<link {id}="{}" rel="{}" href="{}""#,
				escape_html(&link.identifier),
				escape_html(&link.rel),
				escape_html(&link.href)
			);
			if let Some(hreflang) = &link.hreflang {
				let _ = write!(out, r#" hreflang="{}""#, escape_html(hreflang));
			}
			out.push_str(">\n");
		}

		for meta in &self.meta {
			let _ = writeln!(
				out,
				r#"<meta {id}="{}" property="{}" content="{}">"#,
				escape_html(&meta.identifier),
				escape_html(&meta.property),
				escape_html(&meta.content)
			);
		}

		out
	}

	/// Render `html_attrs` as an attribute list for the `<html>` element.
	pub fn html_attributes(&self) -> String {
		self.html_attrs
			.iter()
			.map(|(name, value)| format!(r#"{name}="{}""#, escape_html(value)))
			.collect::<Vec<_>>()
			.join(" ")
	}
}

/// Build head metadata for the current page.
pub fn locale_head(options: &LocaleHeadOptions, context: &HeadContext<'_>) -> LocaleHead {
	let mut head = LocaleHead {
		identifier_attribute: options.identifier_attribute.clone(),
		..LocaleHead::default()
	};

	let Some(current) = context.registry.get(context.current_locale.as_str()) else {
		return head;
	};

	head.html_attrs
		.insert("lang".to_string(), current.normalized_tag.clone());
	if options.add_dir_attribute {
		head.html_attrs
			.insert("dir".to_string(), current.direction.as_html_dir().to_string());
	}

	let Some(base_url) = context.base_url.filter(|_| options.add_seo_attributes) else {
		return head;
	};
	let base_url = base_url.trim_end_matches('/');

	add_alternate_links(&mut head, context, base_url);
	add_canonical_link(&mut head, context, base_url);
	add_og_locale(&mut head, current, context.registry);

	head
}

fn add_alternate_links(head: &mut LocaleHead, context: &HeadContext<'_>, base_url: &str) {
	let mut seen_languages = HashSet::new();

	for record in context.registry.records() {
		let href = href_for(context, &record.code, base_url);
		let language = primary_subtag(&record.normalized_tag).to_ascii_lowercase();

		// The first locale of each language also stands in for the bare language.
		if seen_languages.insert(language.clone())
			&& !language.eq_ignore_ascii_case(&record.normalized_tag)
		{
			head.link.push(HeadLink {
				identifier: format!("i18n-alt-{language}"),
				rel: "alternate".to_string(),
				href: href.clone(),
				hreflang: Some(language),
			});
		}

		head.link.push(HeadLink {
			identifier: format!("i18n-alt-{}", record.normalized_tag),
			rel: "alternate".to_string(),
			href,
			hreflang: Some(record.normalized_tag.clone()),
		});
	}

	let default_locale = &context.routing.default_locale;
	if context.registry.contains(default_locale.as_str()) {
		head.link.push(HeadLink {
			identifier: "i18n-xd".to_string(),
			rel: "alternate".to_string(),
			href: href_for(context, default_locale, base_url),
			hreflang: Some("x-default".to_string()),
		});
	}
}

fn add_canonical_link(head: &mut LocaleHead, context: &HeadContext<'_>, base_url: &str) {
	head.link.push(HeadLink {
		identifier: "i18n-can".to_string(),
		rel: "canonical".to_string(),
		href: format!("{base_url}{}", without_query(context.current_path)),
		hreflang: None,
	});
}

fn add_og_locale(head: &mut LocaleHead, current: &LocaleRecord, registry: &LocaleRegistry) {
	head.meta.push(HeadMeta {
		identifier: "i18n-og".to_string(),
		property: "og:locale".to_string(),
		content: og_locale(&current.normalized_tag),
	});

	for record in registry.records().iter().filter(|r| r.code != current.code) {
		head.meta.push(HeadMeta {
			identifier: format!("i18n-og-alt-{}", record.normalized_tag),
			property: "og:locale:alternate".to_string(),
			content: og_locale(&record.normalized_tag),
		});
	}
}

fn href_for(context: &HeadContext<'_>, locale: &LocaleCode, base_url: &str) -> String {
	let path = switch_locale_path(
		without_query(context.current_path),
		locale,
		context.routing,
		context.registry,
	);
	format!("{base_url}{path}")
}

fn without_query(path: &str) -> &str {
	path.split(['?', '#']).next().unwrap_or(path)
}

fn og_locale(tag: &str) -> String {
	tag.replace('-', "_")
}

/// Escape text for use in HTML content or a double-quoted attribute value.
pub fn escape_html(value: &str) -> String {
	let mut escaped = String::with_capacity(value.len());
	for c in value.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'"' => escaped.push_str("&quot;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'\'' => escaped.push_str("&#39;"),
			c => escaped.push(c),
		}
	}
	escaped
}
