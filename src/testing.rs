//! Shared fixtures for unit tests

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::api::TranslationProvider;
use crate::error::TranslationError;
use crate::models::{Scripture, ScriptureDocument, Section, Subsection, TranslationPayload, Verse};

fn build(sections: Vec<Section>) -> Scripture {
    Scripture::new(ScriptureDocument {
        id: "test".to_string(),
        title: "Test Scripture".to_string(),
        sections,
        ..ScriptureDocument::default()
    })
    .unwrap()
}

fn verses(ids: &[&str]) -> Vec<Verse> {
    ids.iter().map(|id| Verse::new(id, &["ekam sat"])).collect()
}

/// `v1` with an English built-in translation, verified
pub fn verse_with_builtin() -> Verse {
    Verse::new("v1", &["ekam sad vipra bahudha vadanti"])
        .with_translation("en", "Truth is one.")
        .with_verified("en")
}

/// `v2` with no translation at all
pub fn verse_without_builtin() -> Verse {
    Verse::new("v2", &["agnim ile purohitam", "yajnasya devam rtvijam"])
}

/// One section, one subsection, verses v1, v2, v3
pub fn three_verse_scripture() -> Scripture {
    build(vec![Section::new(
        "s1",
        "Section 1",
        vec![Subsection::new(
            "ss1",
            "Subsection 1",
            vec![
                verse_with_builtin(),
                verse_without_builtin(),
                Verse::new("v3", &["tat tvam asi"]),
            ],
        )],
    )])
}

/// Sections with empty subsections sprinkled in
///
/// Reading order: a1.1, a1.2, a2.1, c1.1, c1.2. Section `b` has no verses
/// and section `c` opens with the empty subsection `c0`.
pub fn branching_scripture() -> Scripture {
    build(vec![
        Section::new(
            "a",
            "A",
            vec![
                Subsection::new("a1", "A1", verses(&["a1.1", "a1.2"])),
                Subsection::new("a-empty", "A empty", vec![]),
                Subsection::new("a2", "A2", verses(&["a2.1"])),
            ],
        ),
        Section::new("b", "B", vec![Subsection::new("b-empty", "B empty", vec![])]),
        Section::new(
            "c",
            "C",
            vec![
                Subsection::new("c0", "C0", vec![]),
                Subsection::new("c1", "C1", verses(&["c1.1", "c1.2"])),
            ],
        ),
    ])
}

/// Structure but no verses
pub fn empty_scripture() -> Scripture {
    build(vec![Section::new(
        "b",
        "B",
        vec![Subsection::new("b-empty", "B empty", vec![])],
    )])
}

/// Provider that answers every call the same way and counts calls
pub struct ScriptedProvider {
    outcome: Result<TranslationPayload, TranslationError>,
    calls: AtomicUsize,
    last: Mutex<Option<(String, String, String)>>,
}

impl ScriptedProvider {
    pub fn answering(payload: TranslationPayload) -> Self {
        Self::with_outcome(Ok(payload))
    }

    pub fn failing(reason: &str) -> Self {
        Self::with_outcome(Err(TranslationError::Provider(reason.to_string())))
    }

    fn with_outcome(outcome: Result<TranslationPayload, TranslationError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// (source text, language code, language name) of the latest call
    pub fn last_request(&self) -> Option<(String, String, String)> {
        self.last.lock().unwrap().clone()
    }
}

impl TranslationProvider for ScriptedProvider {
    async fn translate(
        &self,
        source_text: &str,
        language_code: &str,
        language_name: &str,
    ) -> Result<TranslationPayload, TranslationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((
            source_text.to_string(),
            language_code.to_string(),
            language_name.to_string(),
        ));
        self.outcome.clone()
    }
}
