//! Reading session: navigation plus translation for the visible verse
//!
//! [`Reader`] is the surface the terminal app and the CLI talk to. Every
//! successful selection change forgets the displayed translation, so a
//! provider result for the previous verse can never be rendered for the
//! new one.

use std::sync::Arc;

use crate::api::TranslationProvider;
use crate::error::{NavError, ReportError, TranslationError};
use crate::models::{Language, ReportSubmission, Scripture, Section, Subsection, TranslationPayload, Verse};
use crate::navigation::{Cursor, Navigator, Selection};
use crate::report::{self, ReportDraft, ReportSink};
use crate::translation::{
    Completion, Resolution, ResolvedTranslation, Ticket, TranslationResolver, TranslationState,
};

/// One reading session over one scripture
#[derive(Debug)]
pub struct Reader {
    navigator: Navigator,
    resolver: TranslationResolver,
}

impl Reader {
    /// Start a session on the first verse
    pub fn new(scripture: Arc<Scripture>) -> Self {
        Self {
            navigator: Navigator::new(scripture),
            resolver: TranslationResolver::new(),
        }
    }

    /// The loaded scripture
    pub fn scripture(&self) -> &Scripture {
        self.navigator.scripture()
    }

    /// Navigation state
    pub const fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Translation state and cache
    pub const fn resolver(&self) -> &TranslationResolver {
        &self.resolver
    }

    // Queries

    /// All sections
    pub fn sections(&self) -> &[Section] {
        self.navigator.scripture().sections()
    }

    /// Subsections of a section
    pub fn subsections_of(&self, section_id: &str) -> Result<&[Subsection], NavError> {
        self.navigator.scripture().subsections_of(section_id)
    }

    /// Verses of a subsection
    pub fn verses_of(&self, section_id: &str, subsection_id: &str) -> Result<&[Verse], NavError> {
        self.navigator.scripture().verses_of(section_id, subsection_id)
    }

    /// Current selection
    pub const fn current_selection(&self) -> &Selection {
        self.navigator.selection()
    }

    /// Verse on screen
    pub fn current_verse(&self) -> Option<&Verse> {
        self.navigator.current_verse()
    }

    /// Whether `previous` would move
    pub fn has_previous(&self) -> bool {
        self.navigator.has_previous()
    }

    /// Whether `next` would move
    pub fn has_next(&self) -> bool {
        self.navigator.has_next()
    }

    // Transitions

    /// Select a section
    pub fn select_section(&mut self, section_id: &str) -> Result<Cursor, NavError> {
        let cursor = self.navigator.select_section(section_id)?;
        self.resolver.invalidate();
        Ok(cursor)
    }

    /// Select a subsection of the current section
    pub fn select_subsection(&mut self, subsection_id: &str) -> Result<Cursor, NavError> {
        let cursor = self.navigator.select_subsection(subsection_id)?;
        self.resolver.invalidate();
        Ok(cursor)
    }

    /// Select a verse of the current subsection
    pub fn select_verse(&mut self, verse_id: &str) -> Result<Cursor, NavError> {
        let cursor = self.navigator.select_verse(verse_id)?;
        self.resolver.invalidate();
        Ok(cursor)
    }

    /// Jump to any verse
    pub fn jump_to(&mut self, verse_id: &str) -> Result<Cursor, NavError> {
        let cursor = self.navigator.jump_to(verse_id)?;
        self.resolver.invalidate();
        Ok(cursor)
    }

    /// Next verse in reading order
    pub fn next(&mut self) -> Result<Cursor, NavError> {
        let cursor = self.navigator.next()?;
        self.resolver.invalidate();
        Ok(cursor)
    }

    /// Previous verse in reading order
    pub fn previous(&mut self) -> Result<Cursor, NavError> {
        let cursor = self.navigator.previous()?;
        self.resolver.invalidate();
        Ok(cursor)
    }

    // Translation

    /// Resolve the visible verse in a language
    ///
    /// Returns `None` when nothing is selected. A `Dispatch` must be sent to
    /// the provider and its outcome fed to [`Self::complete_translation`].
    pub fn current_verse_payload(&mut self, language: &Language) -> Option<Resolution> {
        let verse = self.navigator.current_verse()?;
        Some(self.resolver.resolve(verse, language))
    }

    /// Feed a provider outcome back
    pub fn complete_translation(
        &mut self,
        ticket: Ticket,
        outcome: Result<TranslationPayload, TranslationError>,
    ) -> Completion {
        self.resolver.complete(ticket, outcome)
    }

    /// What the translation area should show
    pub const fn translation_state(&self) -> &TranslationState {
        self.resolver.state()
    }

    /// Clear a translation failure
    pub fn dismiss_translation_error(&mut self) {
        self.resolver.dismiss_error();
    }

    /// Resolve the visible verse end to end
    pub async fn translate_current<P: TranslationProvider>(
        &mut self,
        provider: &P,
        language: &Language,
    ) -> Option<Result<ResolvedTranslation, TranslationError>> {
        let verse = self.navigator.current_verse()?;
        Some(self.resolver.resolve_with(provider, verse, language).await)
    }

    // Reports

    /// Open a report for the visible verse
    pub fn open_report(&self) -> Option<ReportDraft> {
        self.navigator.current_verse().map(|v| ReportDraft::new(&v.id))
    }

    /// Validate a draft and hand it to a sink
    ///
    /// Sink failures are logged only; the returned submission is what was
    /// attempted.
    pub fn submit_report(
        &self,
        sink: &dyn ReportSink,
        draft: &ReportDraft,
    ) -> Result<ReportSubmission, ReportError> {
        let submission = draft.finish()?;
        report::submit_report(sink, &submission);
        Ok(submission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Boundary;
    use crate::models::{ReportReason, TranslationKey};
    use crate::report::LogReportSink;
    use crate::testing::{self, ScriptedProvider};

    fn reader(scripture: Scripture) -> Reader {
        Reader::new(Arc::new(scripture))
    }

    #[test]
    fn test_next_stops_at_last_verse() {
        let mut reader = reader(testing::three_verse_scripture());
        reader.next().unwrap();
        reader.next().unwrap();
        assert_eq!(reader.next(), Err(NavError::AtBoundary(Boundary::Last)));
        assert_eq!(reader.current_selection().verse_id(), Some("v3"));
    }

    #[tokio::test]
    async fn test_builtin_english_without_provider() {
        let mut reader = reader(testing::three_verse_scripture());
        let provider = ScriptedProvider::failing("should not be called");

        let resolved = reader
            .translate_current(&provider, &Language::new("en", "English"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resolved.payload.purport.as_deref(), Some("Truth is one."));
        assert!(resolved.human_verified);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_provider_translation_is_reused() {
        let mut reader = reader(testing::three_verse_scripture());
        reader.next().unwrap();
        let french = Language::new("fr", "French");
        let provider = ScriptedProvider::answering(TranslationPayload::from_purport("Agni"));

        let first = reader.translate_current(&provider, &french).await.unwrap().unwrap();
        assert!(!first.human_verified);

        reader.next().unwrap();
        reader.previous().unwrap();
        let second = reader.translate_current(&provider, &french).await.unwrap().unwrap();

        assert!(Arc::ptr_eq(&first.payload, &second.payload));
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn test_result_arriving_after_navigation_is_discarded() {
        let mut reader = reader(testing::three_verse_scripture());
        reader.next().unwrap();
        let french = Language::new("fr", "French");

        let Some(Resolution::Dispatch(request)) = reader.current_verse_payload(&french) else {
            panic!("expected a provider request for v2");
        };
        reader.next().unwrap();
        assert_eq!(reader.translation_state(), &TranslationState::Idle);

        let outcome = Ok(TranslationPayload::from_purport("for v2"));
        assert_eq!(reader.complete_translation(request.ticket, outcome), Completion::Stale);
        assert_eq!(reader.translation_state(), &TranslationState::Idle);
        assert!(!reader.resolver().cache().contains(&TranslationKey::new("v3", "fr")));
    }

    #[test]
    fn test_failed_navigation_keeps_translation() {
        let mut reader = reader(testing::three_verse_scripture());
        let english = Language::new("en", "English");
        assert!(matches!(
            reader.current_verse_payload(&english),
            Some(Resolution::Ready(_))
        ));

        assert!(reader.previous().is_err());
        assert!(reader.select_section("nope").is_err());
        assert!(matches!(reader.translation_state(), TranslationState::Ready(_)));
    }

    #[test]
    fn test_report_keeps_verse_open_at_dialog_time() {
        let mut reader = reader(testing::three_verse_scripture());
        let mut draft = reader.open_report().unwrap();
        reader.next().unwrap();

        draft.reason = Some(ReportReason::IncorrectSource);
        let submission = reader.submit_report(&LogReportSink, &draft).unwrap();
        assert_eq!(submission.verse_id, "v1");

        let incomplete = ReportDraft::new("v2");
        assert_eq!(
            reader.submit_report(&LogReportSink, &incomplete),
            Err(ReportError::MissingReason)
        );
    }

    #[test]
    fn test_empty_scripture() {
        let mut reader = reader(testing::empty_scripture());
        assert!(reader.current_verse_payload(&Language::default()).is_none());
        assert!(reader.open_report().is_none());
        assert_eq!(reader.next(), Err(NavError::NoContent));
        assert_eq!(reader.sections().len(), 1);
    }
}
