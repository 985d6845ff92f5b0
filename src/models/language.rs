//! Language model and the built-in language catalog

use serde::{Deserialize, Serialize};

/// Languages offered in the language picker, as (code, name)
const CATALOG: &[(&str, &str)] = &[
    ("en", "English"),
    ("hi", "Hindi"),
    ("bn", "Bengali"),
    ("sa", "Sanskrit"),
    ("mr", "Marathi"),
    ("gu", "Gujarati"),
    ("pa", "Punjabi"),
    ("or", "Odia"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("kn", "Kannada"),
    ("ml", "Malayalam"),
    ("ne", "Nepali"),
    ("ur", "Urdu"),
    ("fr", "French"),
    ("de", "German"),
    ("es", "Spanish"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("ar", "Arabic"),
    ("zh", "Chinese"),
    ("ja", "Japanese"),
];

/// A translation target
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Language {
    /// Language code (e.g. "en", "bn")
    pub code: String,
    /// Human-readable name passed to the translation provider
    pub name: String,
}

impl Language {
    /// Create a language
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
        }
    }

    /// Look up a catalog language by code (case-insensitive)
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_lowercase();
        CATALOG
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(c, n)| Self::new(c, n))
    }

    /// Look up a catalog language, or fall back to using the code as its name
    pub fn resolve(code: &str) -> Self {
        Self::from_code(code).unwrap_or_else(|| Self::new(code.trim(), code.trim()))
    }

    /// Get every catalog language, in display order
    pub fn catalog() -> Vec<Self> {
        CATALOG.iter().map(|(c, n)| Self::new(c, n)).collect()
    }

    /// Filter the catalog by name or code, case-insensitive
    pub fn search(query: &str) -> Vec<Self> {
        let query = query.trim().to_lowercase();
        CATALOG
            .iter()
            .filter(|(code, name)| {
                query.is_empty() || name.to_lowercase().contains(&query) || code.contains(&query)
            })
            .map(|(c, n)| Self::new(c, n))
            .collect()
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::new("en", "English")
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_matches_name_or_code() {
        let by_name = Language::search("BENG");
        assert_eq!(by_name, vec![Language::new("bn", "Bengali")]);

        let by_code = Language::search("fr");
        assert!(by_code.iter().any(|l| l.code == "fr"));

        assert_eq!(Language::search("").len(), Language::catalog().len());
        assert!(Language::search("klingon").is_empty());
    }

    #[test]
    fn test_resolve_unknown_code() {
        assert_eq!(Language::resolve("EN").name, "English");
        let unknown = Language::resolve("xx");
        assert_eq!(unknown.code, "xx");
        assert_eq!(unknown.name, "xx");
    }
}
