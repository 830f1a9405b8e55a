use std::collections::HashMap;
use std::sync::LazyLock;

/// A language the user can pick, identified by a short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

impl Language {
    pub const fn new(code: &'static str, name: &'static str) -> Self {
        Self { code, name }
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.code.to_lowercase().contains(needle)
    }
}

/// Languages the user can pick as the one they already know well.
pub const KNOWN_LANGUAGES: &[Language] = &[
    Language::new("de", "German"),
    Language::new("sv", "Swedish"),
    Language::new("en", "English"),
    Language::new("es", "Spanish"),
];

/// Languages available for learning.
pub const LEARNABLE_LANGUAGES: &[Language] = &[
    Language::new("sr", "Serbian"),
    Language::new("es", "Spanish"),
    Language::new("fr", "French"),
    Language::new("it", "Italian"),
    Language::new("pt", "Portuguese"),
    Language::new("en", "English"),
    Language::new("sv", "Swedish"),
    Language::new("de", "German"),
];

static NAMES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    KNOWN_LANGUAGES
        .iter()
        .chain(LEARNABLE_LANGUAGES)
        .map(|lang| (lang.code, lang.name))
        .collect()
});

/// Display name for a code from either catalog, or the code itself when unknown.
pub fn name_of(code: &str) -> &str {
    NAMES.get(code).copied().unwrap_or(code)
}

/// The learnable catalog without the language the user already speaks.
pub fn learnable_targets(source_code: &str) -> Vec<Language> {
    LEARNABLE_LANGUAGES
        .iter()
        .filter(|lang| lang.code != source_code)
        .copied()
        .collect()
}

/// Case-insensitive substring match on name or code, keeping catalog order.
pub fn filter_languages(catalog: &[Language], filter: &str) -> Vec<Language> {
    if filter.is_empty() {
        return catalog.to_vec();
    }

    let needle = filter.to_lowercase();
    catalog
        .iter()
        .filter(|lang| lang.matches(&needle))
        .copied()
        .collect()
}
