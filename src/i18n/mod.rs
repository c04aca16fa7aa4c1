//! # Localized Messages
//!
//! Every user-facing line is looked up by message key in the catalog for the requester's
//! locale. The lookup never fails:
//!
//! 1. The locale code is the part of the client language tag before the first `_` or `-`,
//!    lowercased (`de_DE` → `de`).
//! 2. A missing catalog, or a missing/empty key, falls back to the `en` catalog.
//! 3. If English has nothing either, a `Message not found: <key>` marker is returned.
//!
//! Catalogs are handed in ready-made; [`loader`] discovers them on disk. The resolver does
//! no templating, callers fill `{token}` placeholders with [`fill`] afterwards.
//!
//! ```rust
//! use std::collections::HashMap;
//! use homekeep::i18n::{fill, TranslationResolver};
//!
//! let resolver = TranslationResolver::new(HashMap::new());
//! let text = resolver.resolve("de_DE", "home.set");
//! assert_eq!(fill(&text, &[("home", "base".to_string())]), "Home 'base' has been set.");
//! ```

pub mod bundled;
pub mod loader;

use std::collections::HashMap;

use log::debug;

pub use bundled::{bundled_en, BUNDLED_LOCALE};

/// Message key → display text for one locale.
pub type Catalog = HashMap<String, String>;

/// Derive the catalog locale code from a client language tag.
pub fn locale_code(language_tag: &str) -> String {
    language_tag
        .trim()
        .split(['_', '-'])
        .next()
        .unwrap_or("")
        .to_lowercase()
}

/// Replace `{token}` placeholders with their values. Unknown tokens are left untouched.
pub fn fill(template: &str, args: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (token, value) in args {
        out = out.replace(&format!("{{{}}}", token), value);
    }
    out
}

pub struct TranslationResolver {
    catalogs: HashMap<String, Catalog>,
}

impl TranslationResolver {
    /// Take ownership of the given catalogs, installing the bundled English one if absent.
    pub fn new(catalogs: HashMap<String, Catalog>) -> Self {
        let mut resolver = Self {
            catalogs: HashMap::new(),
        };
        resolver.replace_catalogs(catalogs);
        resolver
    }

    /// Swap in a freshly loaded set of catalogs (explicit reload).
    pub fn replace_catalogs(&mut self, mut catalogs: HashMap<String, Catalog>) {
        if !catalogs.contains_key(BUNDLED_LOCALE) {
            debug!("No '{}' catalog supplied; installing bundled fallback", BUNDLED_LOCALE);
            catalogs.insert(BUNDLED_LOCALE.to_string(), bundled_en());
        }
        self.catalogs = catalogs;
    }

    /// Locale codes currently loaded, sorted.
    pub fn locales(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.catalogs.keys().cloned().collect();
        codes.sort();
        codes
    }

    fn lookup(&self, locale: &str, key: &str) -> Option<&str> {
        self.catalogs
            .get(locale)
            .and_then(|catalog| catalog.get(key))
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    /// Resolve `key` for a requester reporting `language_tag`.
    pub fn resolve(&self, language_tag: &str, key: &str) -> String {
        let locale = locale_code(language_tag);
        self.lookup(&locale, key)
            .or_else(|| self.lookup(BUNDLED_LOCALE, key))
            .map(str::to_string)
            .unwrap_or_else(|| format!("Message not found: {}", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(pairs: &[(&str, &str)]) -> Catalog {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn locale_code_takes_primary_subtag() {
        assert_eq!(locale_code("de_DE"), "de");
        assert_eq!(locale_code("EN-us"), "en");
        assert_eq!(locale_code("fr"), "fr");
        assert_eq!(locale_code(""), "");
    }

    #[test]
    fn missing_locale_falls_back_to_english() {
        let mut catalogs = HashMap::new();
        catalogs.insert("en".to_string(), catalog(&[("k", "hello")]));
        let resolver = TranslationResolver::new(catalogs);
        assert_eq!(resolver.resolve("de", "k"), "hello");
        assert_eq!(resolver.resolve("de_AT", "k"), "hello");
    }

    #[test]
    fn missing_key_yields_diagnostic_marker() {
        let mut catalogs = HashMap::new();
        catalogs.insert("en".to_string(), catalog(&[("k", "hello")]));
        let resolver = TranslationResolver::new(catalogs);
        let text = resolver.resolve("en", "missing");
        assert!(text.contains("missing"));
        assert!(text.contains("not found"));
    }

    #[test]
    fn empty_translation_falls_back_to_english() {
        let mut catalogs = HashMap::new();
        catalogs.insert("en".to_string(), catalog(&[("k", "hello")]));
        catalogs.insert("de".to_string(), catalog(&[("k", ""), ("j", "hallo")]));
        let resolver = TranslationResolver::new(catalogs);
        assert_eq!(resolver.resolve("de_DE", "k"), "hello");
        assert_eq!(resolver.resolve("de_DE", "j"), "hallo");
    }

    #[test]
    fn bundled_english_installed_when_absent() {
        let mut catalogs = HashMap::new();
        catalogs.insert("de".to_string(), catalog(&[("home.set", "Home '{home}' gesetzt.")]));
        let resolver = TranslationResolver::new(catalogs);
        assert_eq!(resolver.locales(), vec!["de".to_string(), "en".to_string()]);
        assert_eq!(resolver.resolve("de", "home.set"), "Home '{home}' gesetzt.");
        assert_eq!(resolver.resolve("ja_JP", "homes.unlimited"), "unlimited");
    }

    #[test]
    fn supplied_english_overrides_bundled() {
        let mut catalogs = HashMap::new();
        catalogs.insert("en".to_string(), catalog(&[("homes.unlimited", "infinite")]));
        let resolver = TranslationResolver::new(catalogs);
        assert_eq!(resolver.resolve("en_GB", "homes.unlimited"), "infinite");
        assert!(resolver.resolve("en_GB", "home.set").starts_with("Message not found"));
    }

    #[test]
    fn fill_replaces_all_tokens() {
        let text = fill(
            "Your homes ({current}/{max}): {current}",
            &[("current", "2".to_string()), ("max", "5".to_string())],
        );
        assert_eq!(text, "Your homes (2/5): 2");
        assert_eq!(fill("{unknown}", &[]), "{unknown}");
    }
}
