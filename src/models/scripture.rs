//! Scripture content tree (section -> subsection -> verse)
//!
//! A [`Scripture`] is built once from authored data and never mutated
//! afterwards. Construction validates the structural invariants; every
//! other method is a read-only query.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::TranslationPayload;
use crate::error::{ContentError, Level, NavError};

/// Smallest addressable unit of scripture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "VerseRecord")]
pub struct Verse {
    /// Stable id, unique within the scripture
    pub id: String,
    /// Original-language text, one entry per line
    pub source_lines: Vec<String>,
    /// Same content in an alternate script
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_script_lines: Option<Vec<String>>,
    /// Plain translations authored with the content, by language code
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub builtin_translations: BTreeMap<String, String>,
    /// Full three-part translations authored with the content, by language code
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub authored_payloads: BTreeMap<String, TranslationPayload>,
    /// Languages whose translation was reviewed by a person
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub human_verified_languages: BTreeSet<String>,
    /// Editorial notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Verse as written in content files
///
/// Also accepts the older per-language fields (`englishTranslation`,
/// `bengaliTranslation`), folded into the built-in translations.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerseRecord {
    id: String,
    #[serde(alias = "sanskritLines")]
    source_lines: Vec<String>,
    #[serde(default, alias = "devanagariLines")]
    alternate_script_lines: Option<Vec<String>>,
    #[serde(default)]
    builtin_translations: BTreeMap<String, String>,
    #[serde(default)]
    english_translation: Option<String>,
    #[serde(default)]
    bengali_translation: Option<String>,
    #[serde(default, alias = "aiTranslations")]
    authored_payloads: BTreeMap<String, TranslationPayload>,
    #[serde(default)]
    human_verified_languages: BTreeSet<String>,
    #[serde(default)]
    notes: Option<String>,
}

impl From<VerseRecord> for Verse {
    fn from(record: VerseRecord) -> Self {
        let mut builtin_translations = record.builtin_translations;
        let legacy = [
            ("en", record.english_translation),
            ("bn", record.bengali_translation),
        ];
        for (code, text) in legacy {
            if let Some(text) = text.filter(|t| !t.trim().is_empty()) {
                builtin_translations.entry(code.to_string()).or_insert(text);
            }
        }

        Self {
            id: record.id,
            source_lines: record.source_lines,
            alternate_script_lines: record.alternate_script_lines,
            builtin_translations,
            authored_payloads: record.authored_payloads,
            human_verified_languages: record.human_verified_languages,
            notes: record.notes,
        }
    }
}

impl Verse {
    /// Create a verse from its source lines
    pub fn new(id: &str, lines: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            source_lines: lines.iter().map(ToString::to_string).collect(),
            alternate_script_lines: None,
            builtin_translations: BTreeMap::new(),
            authored_payloads: BTreeMap::new(),
            human_verified_languages: BTreeSet::new(),
            notes: None,
        }
    }

    /// Add a built-in plain translation
    #[must_use]
    pub fn with_translation(mut self, language_code: &str, text: &str) -> Self {
        self.builtin_translations
            .insert(language_code.to_string(), text.to_string());
        self
    }

    /// Add an authored three-part translation
    #[must_use]
    pub fn with_payload(mut self, language_code: &str, payload: TranslationPayload) -> Self {
        self.authored_payloads
            .insert(language_code.to_string(), payload);
        self
    }

    /// Add the alternate-script rendering
    #[must_use]
    pub fn with_alternate_script(mut self, lines: &[&str]) -> Self {
        self.alternate_script_lines = Some(lines.iter().map(ToString::to_string).collect());
        self
    }

    /// Mark a language as human-verified
    #[must_use]
    pub fn with_verified(mut self, language_code: &str) -> Self {
        self.human_verified_languages
            .insert(language_code.to_string());
        self
    }

    /// Source text as sent to a translation provider
    pub fn source_text(&self) -> String {
        self.source_lines.join("\n")
    }

    /// Get the built-in translation for exactly this language code
    ///
    /// Blank entries count as missing.
    pub fn builtin_translation(&self, language_code: &str) -> Option<&str> {
        self.builtin_translations
            .get(language_code)
            .map(String::as_str)
            .filter(|text| !text.trim().is_empty())
    }

    /// Get the authored payload for exactly this language code
    pub fn authored_payload(&self, language_code: &str) -> Option<&TranslationPayload> {
        self.authored_payloads.get(language_code)
    }

    /// Whether the translation in this language was reviewed by a person
    pub fn is_human_verified(&self, language_code: &str) -> bool {
        self.human_verified_languages.contains(language_code)
    }
}

/// Ordered group of verses (chapter, sukta, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subsection {
    /// Id, unique within its section
    pub id: String,
    /// Display title
    pub title: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Verses in reading order
    #[serde(default)]
    pub verses: Vec<Verse>,
}

impl Subsection {
    /// Create a subsection
    pub fn new(id: &str, title: &str, verses: Vec<Verse>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            verses,
        }
    }

    /// Whether there is at least one verse to show
    pub fn is_navigable(&self) -> bool {
        !self.verses.is_empty()
    }
}

/// Ordered group of subsections (book, mandala, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Id, unique within the scripture
    pub id: String,
    /// Display title
    pub title: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Subsections in reading order
    #[serde(default)]
    pub subsections: Vec<Subsection>,
}

impl Section {
    /// Create a section
    pub fn new(id: &str, title: &str, subsections: Vec<Subsection>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            subsections,
        }
    }

    /// First subsection that has a verse to show
    pub fn first_navigable(&self) -> Option<&Subsection> {
        self.subsections.iter().find(|s| s.is_navigable())
    }

    /// Number of verses across all subsections
    pub fn verse_count(&self) -> usize {
        self.subsections.iter().map(|s| s.verses.len()).sum()
    }
}

/// Display labels for each hierarchy level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelNames {
    /// Label for sections (e.g. "Mandala")
    pub section: String,
    /// Label for subsections (e.g. "Sukta")
    pub subsection: String,
    /// Label for verses (e.g. "Mantra")
    pub verse: String,
}

impl Default for LevelNames {
    fn default() -> Self {
        Self {
            section: "Section".to_string(),
            subsection: "Subsection".to_string(),
            verse: "Verse".to_string(),
        }
    }
}

/// Authored form of a scripture, as found in content files
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptureDocument {
    /// Scripture id (e.g. "rigveda")
    pub id: String,
    /// Display title
    pub title: String,
    /// Optional subtitle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sections in reading order
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Label for the section level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_level_name: Option<String>,
    /// Label for the subsection level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsection_level_name: Option<String>,
    /// Label for the verse level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verse_level_name: Option<String>,
}

/// Position of a verse inside the section/subsection vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct VerseLocation {
    section: usize,
    subsection: usize,
    verse: usize,
}

/// Validated, immutable scripture
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "ScriptureDocument")]
pub struct Scripture {
    id: String,
    title: String,
    subtitle: Option<String>,
    description: Option<String>,
    level_names: LevelNames,
    sections: Vec<Section>,
    locations: HashMap<String, VerseLocation>,
}

impl Scripture {
    /// Validate authored data and build the tree
    pub fn new(document: ScriptureDocument) -> Result<Self, ContentError> {
        let mut locations = HashMap::new();
        let mut section_ids = HashSet::new();

        for (si, section) in document.sections.iter().enumerate() {
            if !section_ids.insert(section.id.as_str()) {
                return Err(ContentError::DuplicateSection(section.id.clone()));
            }

            let mut subsection_ids = HashSet::new();
            for (ssi, subsection) in section.subsections.iter().enumerate() {
                if !subsection_ids.insert(subsection.id.as_str()) {
                    return Err(ContentError::DuplicateSubsection {
                        section: section.id.clone(),
                        id: subsection.id.clone(),
                    });
                }

                for (vi, verse) in subsection.verses.iter().enumerate() {
                    if verse.source_lines.is_empty() {
                        return Err(ContentError::EmptyVerse(verse.id.clone()));
                    }
                    let location = VerseLocation {
                        section: si,
                        subsection: ssi,
                        verse: vi,
                    };
                    if locations.insert(verse.id.clone(), location).is_some() {
                        return Err(ContentError::DuplicateVerse(verse.id.clone()));
                    }
                }
            }
        }

        let defaults = LevelNames::default();
        let level_names = LevelNames {
            section: document.section_level_name.unwrap_or(defaults.section),
            subsection: document.subsection_level_name.unwrap_or(defaults.subsection),
            verse: document.verse_level_name.unwrap_or(defaults.verse),
        };

        tracing::debug!(
            "Built scripture '{}' with {} sections and {} verses",
            document.id,
            document.sections.len(),
            locations.len()
        );

        Ok(Self {
            id: document.id,
            title: document.title,
            subtitle: document.subtitle,
            description: document.description,
            level_names,
            sections: document.sections,
            locations,
        })
    }

    /// Parse and validate a scripture from JSON
    pub fn from_json_str(json: &str) -> Result<Self, ContentError> {
        let document: ScriptureDocument = serde_json::from_str(json)?;
        Self::new(document)
    }

    /// Load a scripture from a JSON file
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let content = std::fs::read_to_string(path)?;
        let scripture = Self::from_json_str(&content)?;
        tracing::info!(
            "Loaded '{}' from {} ({} verses)",
            scripture.title,
            path.display(),
            scripture.verse_count()
        );
        Ok(scripture)
    }

    /// Scripture id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Optional subtitle
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    /// Optional description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Display labels for each level
    pub const fn level_names(&self) -> &LevelNames {
        &self.level_names
    }

    /// All sections in authored order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Look up a section
    pub fn section(&self, section_id: &str) -> Result<&Section, NavError> {
        self.sections
            .iter()
            .find(|s| s.id == section_id)
            .ok_or_else(|| NavError::not_found(Level::Section, section_id))
    }

    /// Subsections of a section, in authored order
    pub fn subsections_of(&self, section_id: &str) -> Result<&[Subsection], NavError> {
        Ok(&self.section(section_id)?.subsections)
    }

    /// Look up a subsection within a section
    pub fn subsection(&self, section_id: &str, subsection_id: &str) -> Result<&Subsection, NavError> {
        self.section(section_id)?
            .subsections
            .iter()
            .find(|s| s.id == subsection_id)
            .ok_or_else(|| NavError::not_found(Level::Subsection, subsection_id))
    }

    /// Verses of a subsection, in authored order
    pub fn verses_of(&self, section_id: &str, subsection_id: &str) -> Result<&[Verse], NavError> {
        Ok(&self.subsection(section_id, subsection_id)?.verses)
    }

    /// Look up a verse anywhere in the tree
    pub fn verse(&self, verse_id: &str) -> Result<&Verse, NavError> {
        let loc = self.location(verse_id)?;
        Ok(&self.sections[loc.section].subsections[loc.subsection].verses[loc.verse])
    }

    /// Find the section and subsection that own a verse
    pub fn locate(&self, verse_id: &str) -> Result<(&Section, &Subsection), NavError> {
        let loc = self.location(verse_id)?;
        let section = &self.sections[loc.section];
        Ok((section, &section.subsections[loc.subsection]))
    }

    /// Whether any section has a subsection with this id
    pub fn has_subsection(&self, subsection_id: &str) -> bool {
        self.sections
            .iter()
            .flat_map(|s| &s.subsections)
            .any(|ss| ss.id == subsection_id)
    }

    /// Total number of verses
    pub fn verse_count(&self) -> usize {
        self.locations.len()
    }

    /// Whether the scripture holds no verse at all
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    fn location(&self, verse_id: &str) -> Result<VerseLocation, NavError> {
        self.locations
            .get(verse_id)
            .copied()
            .ok_or_else(|| NavError::not_found(Level::Verse, verse_id))
    }
}

impl TryFrom<ScriptureDocument> for Scripture {
    type Error = ContentError;

    fn try_from(document: ScriptureDocument) -> Result<Self, Self::Error> {
        Self::new(document)
    }
}
