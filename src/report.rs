//! Content reports: dialog validation and sinks

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::ReportError;
use crate::models::{ReportReason, ReportSubmission};

/// State of an open report dialog
///
/// The verse id is captured when the dialog opens and never changes, even
/// if the reader moves on before submitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDraft {
    verse_id: String,
    /// Chosen reason
    pub reason: Option<ReportReason>,
    /// Free-text details
    pub feedback: String,
}

impl ReportDraft {
    /// Open a draft for a verse
    pub fn new(verse_id: &str) -> Self {
        Self {
            verse_id: verse_id.to_string(),
            reason: None,
            feedback: String::new(),
        }
    }

    /// Verse this draft is about
    pub fn verse_id(&self) -> &str {
        &self.verse_id
    }

    /// Validate and turn the draft into a submission
    pub fn finish(&self) -> Result<ReportSubmission, ReportError> {
        let reason = self.reason.ok_or(ReportError::MissingReason)?;
        let feedback = self.feedback.trim();
        if reason == ReportReason::Other && feedback.is_empty() {
            return Err(ReportError::MissingDetails);
        }
        Ok(ReportSubmission::new(&self.verse_id, reason, feedback))
    }
}

/// Destination for submitted reports
pub trait ReportSink {
    /// Record one report
    fn submit(&self, report: &ReportSubmission) -> Result<()>;
}

/// Appends reports to a JSON-lines file
#[derive(Debug, Clone)]
pub struct FileReportSink {
    path: PathBuf,
}

impl FileReportSink {
    /// Create a sink writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path reports are written to
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for FileReportSink {
    fn submit(&self, report: &ReportSubmission) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create report directory")?;
        }

        let line = serde_json::to_string(report).context("Failed to serialize report")?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        writeln!(file, "{line}").context("Failed to write report")?;

        tracing::info!("Report {} for verse {} saved", report.id, report.verse_id);
        Ok(())
    }
}

/// Only logs reports
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReportSink;

impl ReportSink for LogReportSink {
    fn submit(&self, report: &ReportSubmission) -> Result<()> {
        tracing::info!(
            "Report {} for verse {}: {} {:?}",
            report.id,
            report.verse_id,
            report.reason,
            report.feedback
        );
        Ok(())
    }
}

/// Hand a report to a sink; failures are logged, never returned
pub fn submit_report(sink: &dyn ReportSink, report: &ReportSubmission) -> bool {
    match sink.submit(report) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Failed to submit report {}: {e:#}", report.id);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_draft_requires_reason() {
        let draft = ReportDraft::new("1.1.1");
        assert_eq!(draft.finish(), Err(ReportError::MissingReason));
    }

    #[test]
    fn test_other_requires_details() {
        let mut draft = ReportDraft::new("1.1.1");
        draft.reason = Some(ReportReason::Other);
        draft.feedback = "   ".to_string();
        assert_eq!(draft.finish(), Err(ReportError::MissingDetails));

        draft.feedback = " wrong meter ".to_string();
        let report = draft.finish().unwrap();
        assert_eq!(report.feedback, "wrong meter");
        assert_eq!(report.verse_id, "1.1.1");
    }

    #[test]
    fn test_other_reasons_allow_empty_feedback() {
        let mut draft = ReportDraft::new("1.1.2");
        draft.reason = Some(ReportReason::IncorrectTranslation);
        let report = draft.finish().unwrap();
        assert_eq!(report.reason, ReportReason::IncorrectTranslation);
        assert!(report.feedback.is_empty());
    }

    #[test]
    fn test_file_sink_appends_json_lines() {
        let dir = TempDir::new().unwrap();
        let sink = FileReportSink::new(dir.path().join("reports").join("reports.jsonl"));

        let first = ReportSubmission::new("1.1.1", ReportReason::IncorrectSource, "");
        let second = ReportSubmission::new("1.1.2", ReportReason::Other, "typo in line 2");
        sink.submit(&first).unwrap();
        sink.submit(&second).unwrap();

        let content = std::fs::read_to_string(sink.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: ReportSubmission = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed, second);
        assert!(lines[0].contains("\"reason\":\"incorrect_source\""));
    }

    #[test]
    fn test_submit_report_swallows_sink_errors() {
        struct Broken;
        impl ReportSink for Broken {
            fn submit(&self, _: &ReportSubmission) -> Result<()> {
                anyhow::bail!("disk full")
            }
        }

        let report = ReportSubmission::new("1.1.1", ReportReason::TechnicalIssue, "");
        assert!(!submit_report(&Broken, &report));
        assert!(submit_report(&LogReportSink, &report));
    }
}
