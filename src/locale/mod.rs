use crate::reactor::{ComponentResponse, Event, LocaleEvent};
use anyhow::Context;
use indexmap::IndexMap;
use serde::Deserialize;

const FALLBACK: &str = "en";

const EMBEDDED: &[(&str, &str)] = &[
	("en", include_str!("resources/en.json")),
	("de", include_str!("resources/de.json")),
	("es", include_str!("resources/es.json")),
	("fr", include_str!("resources/fr.json")),
];

#[derive(Debug, Deserialize)]
pub struct Dictionary {
	/// Native display name of the language
	pub language: String,
	pub strings: IndexMap<String, String>,
}

/// Holds the active language code and the embedded dictionary registry.
/// The active code lives only for the process; it is re-derived from the
/// environment at startup.
pub struct LocaleManager {
	active: String,
	dictionaries: IndexMap<String, Dictionary>,
}

impl LocaleManager {
	pub fn new() -> Self {
		let dictionaries = match load_dictionaries() {
			Ok(d) => d,
			Err(e) => {
				log::error!("Failed to load locale dictionaries: {e:#}");
				IndexMap::new()
			}
		};
		let mut manager = Self {
			active: FALLBACK.to_owned(),
			dictionaries,
		};
		manager.set_language(&detect_system_language());
		manager
	}

	pub fn handle(&mut self, event: &Event) -> ComponentResponse {
		match event {
			Event::Locale(LocaleEvent::SetLanguage { code }) => {
				self.set_language(code);
				ComponentResponse::none()
			}
			_ => ComponentResponse::none(),
		}
	}

	fn set_language(&mut self, code: &str) {
		if self.dictionaries.contains_key(code) {
			self.active = code.to_owned();
		} else if code != FALLBACK {
			log::warn!("Unknown language code '{code}', falling back to '{FALLBACK}'");
			self.active = FALLBACK.to_owned();
		}
	}

	pub fn active(&self) -> &str {
		&self.active
	}

	/// (code, native name) pairs in registry order, for the language menu
	pub fn languages(&self) -> impl Iterator<Item = (&str, &str)> {
		self.dictionaries
			.iter()
			.map(|(code, dict)| (code.as_str(), dict.language.as_str()))
	}

	/// String lookup context for the active language. Passed explicitly to
	/// rendering code; there is no global language state.
	pub fn strings(&self) -> Strings<'_> {
		Strings {
			active: self.dictionaries.get(&self.active),
			fallback: self.dictionaries.get(FALLBACK),
		}
	}
}

impl Default for LocaleManager {
	fn default() -> Self {
		Self::new()
	}
}

/// Locale-keyed lookup with key-wise fallback to English, then to the key
/// itself so a missing entry stays visible instead of crashing the session.
pub struct Strings<'a> {
	active: Option<&'a Dictionary>,
	fallback: Option<&'a Dictionary>,
}

impl<'a> Strings<'a> {
	pub fn get(&self, key: &'a str) -> &'a str {
		self.active
			.and_then(|d| d.strings.get(key))
			.or_else(|| self.fallback.and_then(|d| d.strings.get(key)))
			.map(String::as_str)
			.unwrap_or(key)
	}
}

fn load_dictionaries() -> anyhow::Result<IndexMap<String, Dictionary>> {
	let mut dictionaries = IndexMap::new();
	for &(code, source) in EMBEDDED {
		let dict: Dictionary = serde_json::from_str(source)
			.with_context(|| format!("parsing '{code}' dictionary"))?;
		dictionaries.insert(code.to_owned(), dict);
	}
	Ok(dictionaries)
}

/// Language code from the process environment, e.g. `de_DE.UTF-8` -> `de`
pub fn detect_system_language() -> String {
	std::env::var("LANG")
		.ok()
		.and_then(|lang| parse_lang_code(&lang))
		.unwrap_or_else(|| FALLBACK.to_owned())
}

fn parse_lang_code(lang: &str) -> Option<String> {
	let code: String = lang
		.chars()
		.take_while(|c| c.is_ascii_alphabetic())
		.flat_map(|c| c.to_lowercase())
		.collect();
	if code.is_empty() { None } else { Some(code) }
}
