//! Translation payload model

use serde::{Deserialize, Serialize};

/// A three-part translation of one verse into one language
///
/// Field aliases accept the traditional names used by authored content and
/// by the translation prompt: pada (word meanings), padartha (phrase
/// analysis) and bhavartha (purport).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationPayload {
    /// Word-level gloss (pada)
    #[serde(default, alias = "pada", skip_serializing_if = "Option::is_none")]
    pub gloss: Option<String>,
    /// Phrase-level analysis (padartha)
    #[serde(default, alias = "padartha", skip_serializing_if = "Option::is_none")]
    pub phrase_analysis: Option<String>,
    /// Overall purport (bhavartha)
    #[serde(default, alias = "bhavartha", skip_serializing_if = "Option::is_none")]
    pub purport: Option<String>,
}

impl TranslationPayload {
    /// Wrap a plain translation as the purport
    pub fn from_purport(text: impl Into<String>) -> Self {
        Self {
            gloss: None,
            phrase_analysis: None,
            purport: Some(text.into()),
        }
    }

    /// A payload is usable once it has a phrase analysis or a purport
    pub fn is_valid(&self) -> bool {
        has_text(self.phrase_analysis.as_deref()) || has_text(self.purport.as_deref())
    }

    /// Drop blank fields and trim the rest
    #[must_use]
    pub fn normalized(self) -> Self {
        let clean = |field: Option<String>| {
            field
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        Self {
            gloss: clean(self.gloss),
            phrase_analysis: clean(self.phrase_analysis),
            purport: clean(self.purport),
        }
    }
}

fn has_text(field: Option<&str>) -> bool {
    field.is_some_and(|s| !s.trim().is_empty())
}

/// Cache key: one verse in one language
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TranslationKey {
    /// Stable verse id
    pub verse_id: String,
    /// Target language code
    pub language_code: String,
}

impl TranslationKey {
    /// Create a new key
    pub fn new(verse_id: &str, language_code: &str) -> Self {
        Self {
            verse_id: verse_id.to_string(),
            language_code: language_code.to_string(),
        }
    }
}

impl std::fmt::Display for TranslationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.verse_id, self.language_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity_requires_phrase_or_purport() {
        let gloss_only = TranslationPayload {
            gloss: Some("agni: fire".to_string()),
            ..TranslationPayload::default()
        };
        assert!(!gloss_only.is_valid());

        let blank = TranslationPayload::from_purport("   ");
        assert!(!blank.is_valid());

        assert!(TranslationPayload::from_purport("Truth is one.").is_valid());
    }

    #[test]
    fn test_traditional_field_names() {
        let payload: TranslationPayload = serde_json::from_str(
            r#"{"pada": "", "padartha": "I praise Agni", "bhavartha": "Fire leads the rite"}"#,
        )
        .unwrap();
        let payload = payload.normalized();
        assert_eq!(payload.gloss, None);
        assert_eq!(payload.phrase_analysis.as_deref(), Some("I praise Agni"));
        assert_eq!(payload.purport.as_deref(), Some("Fire leads the rite"));
    }
}
