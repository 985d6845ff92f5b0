//! Application state

use std::sync::Arc;

use super::async_ops::AsyncCommand;
use crate::config::Config;
use crate::error::NavError;
use crate::models::{Language, ReportReason, Scripture, Section, Subsection, Verse};
use crate::reader::Reader;
use crate::report::{ReportDraft, ReportSink};
use crate::theme::Theme;
use crate::translation::{Resolution, TranslationState};

/// Which list is focused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedPanel {
    /// Top-level sections
    Sections,
    /// Subsections of the current section
    Subsections,
    /// Verses of the current subsection
    #[default]
    Verses,
}

impl FocusedPanel {
    /// Panel to the right, wrapping around
    pub fn next(&self) -> Self {
        match self {
            Self::Sections => Self::Subsections,
            Self::Subsections => Self::Verses,
            Self::Verses => Self::Sections,
        }
    }

    /// Panel to the left, wrapping around
    pub fn prev(&self) -> Self {
        match self {
            Self::Sections => Self::Verses,
            Self::Subsections => Self::Sections,
            Self::Verses => Self::Subsections,
        }
    }
}

/// Input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Browsing and reading
    #[default]
    Normal,
    /// Keybinding overlay
    Help,
    /// Theme list
    ThemePicker,
    /// Language search
    LanguagePicker,
    /// Report dialog
    Report,
}

/// Report dialog state
#[derive(Debug, Clone)]
pub struct ReportForm {
    /// Draft being edited
    pub draft: ReportDraft,
    /// Highlighted reason
    pub reason_cursor: usize,
    /// Typing into the feedback field
    pub editing_feedback: bool,
    /// Validation message
    pub error: Option<String>,
}

impl ReportForm {
    fn new(draft: ReportDraft) -> Self {
        Self {
            draft,
            reason_cursor: 0,
            editing_feedback: false,
            error: None,
        }
    }

    /// Pick the highlighted reason
    pub fn choose_highlighted(&mut self) {
        self.draft.reason = ReportReason::all().get(self.reason_cursor).copied();
        self.error = None;
    }
}

/// Application state
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Reading session
    pub reader: Reader,
    /// Translation language
    pub language: Language,
    /// Provider name shown in the header
    pub provider_name: &'static str,
    /// Where reports go
    pub report_sink: Box<dyn ReportSink>,
    /// Whether to quit
    pub should_quit: bool,
    /// Current theme
    pub theme: Theme,
    /// Input mode
    pub mode: Mode,
    /// Focused list
    pub focused_panel: FocusedPanel,

    /// Highlighted section
    pub section_cursor: usize,
    /// Highlighted subsection of the selected section
    pub subsection_cursor: usize,
    /// Highlighted verse of the selected subsection
    pub verse_cursor: usize,
    /// Scroll offset of the verse panel
    pub verse_scroll: u16,

    /// Theme picker index
    pub theme_picker_index: usize,
    /// Language picker filter
    pub language_query: String,
    /// Language picker index into the filtered list
    pub language_cursor: usize,
    /// Open report dialog
    pub report: Option<ReportForm>,

    /// Status message (bottom bar)
    pub status: String,

    tick: u64,
}

impl AppState {
    /// Create a new app state
    pub fn new(
        config: Config,
        scripture: Arc<Scripture>,
        provider_name: &'static str,
        report_sink: Box<dyn ReportSink>,
    ) -> Self {
        let theme = config.theme;
        let language = Language::resolve(&config.default_language);

        let mut state = Self {
            config,
            reader: Reader::new(scripture),
            language,
            provider_name,
            report_sink,
            should_quit: false,
            theme,
            mode: Mode::Normal,
            focused_panel: FocusedPanel::Verses,
            section_cursor: 0,
            subsection_cursor: 0,
            verse_cursor: 0,
            verse_scroll: 0,
            theme_picker_index: 0,
            language_query: String::new(),
            language_cursor: 0,
            report: None,
            status: String::new(),
            tick: 0,
        };
        state.sync_cursors();
        state
    }

    /// Tick for animations
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Get current tick
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Set status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = msg.into();
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status.clear();
    }

    /// Whether a translation for the visible verse is outstanding
    pub fn is_translating(&self) -> bool {
        matches!(self.reader.translation_state(), TranslationState::Translating(_))
    }

    // Lists

    /// Sections list
    pub fn sections(&self) -> &[Section] {
        self.reader.sections()
    }

    /// Subsections of the selected section
    pub fn visible_subsections(&self) -> &[Subsection] {
        self.reader
            .navigator()
            .current_section()
            .map(|s| s.subsections.as_slice())
            .unwrap_or_default()
    }

    /// Verses of the selected subsection
    pub fn visible_verses(&self) -> &[Verse] {
        self.reader
            .navigator()
            .current_subsection()
            .map(|s| s.verses.as_slice())
            .unwrap_or_default()
    }

    /// Point every list cursor at the current selection
    pub fn sync_cursors(&mut self) {
        let Some(cursor) = self.reader.current_selection().cursor().cloned() else {
            return;
        };
        self.section_cursor = self
            .sections()
            .iter()
            .position(|s| s.id == cursor.path.section_id)
            .unwrap_or(0);
        self.subsection_cursor = self
            .visible_subsections()
            .iter()
            .position(|s| s.id == cursor.path.subsection_id)
            .unwrap_or(0);
        self.verse_cursor = self
            .visible_verses()
            .iter()
            .position(|v| v.id == cursor.path.verse_id)
            .unwrap_or(0);
    }

    /// Move the highlight in the focused list
    pub fn move_cursor(&mut self, down: bool) {
        let len = match self.focused_panel {
            FocusedPanel::Sections => self.sections().len(),
            FocusedPanel::Subsections => self.visible_subsections().len(),
            FocusedPanel::Verses => self.visible_verses().len(),
        };
        let cursor = match self.focused_panel {
            FocusedPanel::Sections => &mut self.section_cursor,
            FocusedPanel::Subsections => &mut self.subsection_cursor,
            FocusedPanel::Verses => &mut self.verse_cursor,
        };
        if down {
            if len > 0 {
                *cursor = (*cursor + 1).min(len - 1);
            }
        } else {
            *cursor = cursor.saturating_sub(1);
        }
    }

    /// Select whatever is highlighted in the focused list
    pub fn activate(&mut self) -> Option<AsyncCommand> {
        let result = match self.focused_panel {
            FocusedPanel::Sections => {
                let id = self.sections().get(self.section_cursor)?.id.clone();
                self.reader.select_section(&id)
            }
            FocusedPanel::Subsections => {
                let id = self.visible_subsections().get(self.subsection_cursor)?.id.clone();
                self.reader.select_subsection(&id)
            }
            FocusedPanel::Verses => {
                let id = self.visible_verses().get(self.verse_cursor)?.id.clone();
                self.reader.select_verse(&id)
            }
        };

        match result {
            Ok(_) => {
                if self.focused_panel != FocusedPanel::Verses {
                    self.focused_panel = self.focused_panel.next();
                }
                self.after_move()
            }
            Err(e) => {
                self.show_nav_error(&e);
                None
            }
        }
    }

    /// Next verse in reading order
    pub fn next_verse(&mut self) -> Option<AsyncCommand> {
        match self.reader.next() {
            Ok(_) => self.after_move(),
            Err(e) => {
                self.show_nav_error(&e);
                None
            }
        }
    }

    /// Previous verse in reading order
    pub fn previous_verse(&mut self) -> Option<AsyncCommand> {
        match self.reader.previous() {
            Ok(_) => self.after_move(),
            Err(e) => {
                self.show_nav_error(&e);
                None
            }
        }
    }

    fn after_move(&mut self) -> Option<AsyncCommand> {
        self.sync_cursors();
        self.verse_scroll = 0;
        self.clear_status();
        self.request_translation()
    }

    fn show_nav_error(&mut self, e: &NavError) {
        if e.is_benign() {
            self.set_status(capitalize(&e.to_string()));
        } else {
            tracing::warn!("Navigation failed: {e}");
            self.set_status(format!("❌ {}", capitalize(&e.to_string())));
        }
    }

    // Translation

    /// Resolve the visible verse, returning a provider command if needed
    pub fn request_translation(&mut self) -> Option<AsyncCommand> {
        match self.reader.current_verse_payload(&self.language)? {
            Resolution::Dispatch(request) => {
                self.set_status(format!("Translating into {}...", self.language.name));
                Some(AsyncCommand::Translate { request })
            }
            Resolution::Ready(_) | Resolution::Waiting(_) => None,
        }
    }

    /// Clear a translation failure and try again
    pub fn retry_translation(&mut self) -> Option<AsyncCommand> {
        self.reader.dismiss_translation_error();
        self.request_translation()
    }

    /// Switch the translation language
    pub fn set_language(&mut self, language: Language) -> Option<AsyncCommand> {
        tracing::debug!("Language set to {language}");
        self.config.default_language.clone_from(&language.code);
        self.language = language;
        self.request_translation()
    }

    /// Catalog languages matching the picker filter
    pub fn filtered_languages(&self) -> Vec<Language> {
        Language::search(&self.language_query)
    }

    /// Open the language picker on the current language
    pub fn open_language_picker(&mut self) {
        self.language_query.clear();
        self.language_cursor = self
            .filtered_languages()
            .iter()
            .position(|l| l.code == self.language.code)
            .unwrap_or(0);
        self.mode = Mode::LanguagePicker;
    }

    /// Apply the highlighted language
    pub fn choose_language(&mut self) -> Option<AsyncCommand> {
        let language = self.filtered_languages().get(self.language_cursor).cloned();
        self.mode = Mode::Normal;
        match language {
            Some(language) => self.set_language(language),
            None => {
                self.set_status("No matching language");
                None
            }
        }
    }

    // Reports

    /// Open the report dialog for the visible verse
    pub fn open_report(&mut self) {
        match self.reader.open_report() {
            Some(draft) => {
                self.report = Some(ReportForm::new(draft));
                self.mode = Mode::Report;
            }
            None => self.set_status("Nothing to report"),
        }
    }

    /// Close the report dialog without sending
    pub fn cancel_report(&mut self) {
        self.report = None;
        self.mode = Mode::Normal;
    }

    /// Validate and send the report
    pub fn submit_report(&mut self) {
        let Some(form) = self.report.as_mut() else {
            return;
        };
        match self.reader.submit_report(self.report_sink.as_ref(), &form.draft) {
            Ok(submission) => {
                tracing::debug!("Submitted report {}", submission.id);
                self.report = None;
                self.mode = Mode::Normal;
                self.set_status("Report submitted. Thank you!");
            }
            Err(e) => form.error = Some(capitalize(&e.to_string())),
        }
    }

    // Theme

    /// Cycle through themes
    pub fn next_theme(&mut self) {
        self.theme = self.theme.next();
        self.config.theme = self.theme;
    }

    /// Open the theme picker on the current theme
    pub fn open_theme_picker(&mut self) {
        self.theme_picker_index = Theme::all()
            .iter()
            .position(|t| *t == self.theme.inner())
            .unwrap_or(0);
        self.mode = Mode::ThemePicker;
    }

    /// Apply the highlighted theme
    pub fn apply_theme_picker(&mut self) {
        if let Some(name) = Theme::all().get(self.theme_picker_index) {
            self.theme = Theme(*name);
            self.config.theme = self.theme;
        }
        self.mode = Mode::Normal;
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars
        .next()
        .map(|c| c.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}
