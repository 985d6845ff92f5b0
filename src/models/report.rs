//! Data-quality report model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Why a verse is being reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportReason {
    /// The source text is wrong
    #[serde(alias = "incorrect_sanskrit")]
    IncorrectSource,
    /// The translation is wrong
    IncorrectTranslation,
    /// Offensive or inappropriate content
    OffensiveContent,
    /// Display or technical problem
    TechnicalIssue,
    /// Anything else (requires details)
    Other,
}

impl ReportReason {
    /// Get all reasons, in dialog order
    pub const fn all() -> &'static [Self] {
        &[
            Self::IncorrectSource,
            Self::IncorrectTranslation,
            Self::OffensiveContent,
            Self::TechnicalIssue,
            Self::Other,
        ]
    }

    /// Get the display label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::IncorrectSource => "Incorrect source text",
            Self::IncorrectTranslation => "Incorrect translation",
            Self::OffensiveContent => "Offensive or inappropriate content",
            Self::TechnicalIssue => "Technical issue with display",
            Self::Other => "Other (please specify)",
        }
    }

    /// Get the wire code
    pub const fn code(&self) -> &'static str {
        match self {
            Self::IncorrectSource => "incorrect_source",
            Self::IncorrectTranslation => "incorrect_translation",
            Self::OffensiveContent => "offensive_content",
            Self::TechnicalIssue => "technical_issue",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ReportReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A report handed to the report sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSubmission {
    /// Unique submission id
    pub id: Uuid,
    /// Verse that was on screen when the dialog opened
    pub verse_id: String,
    /// Reason code
    pub reason: ReportReason,
    /// Free-text feedback (may be empty unless the reason is `Other`)
    pub feedback: String,
    /// Submission time (serialized as RFC 3339)
    pub submitted_at: DateTime<Utc>,
}

impl ReportSubmission {
    /// Create a new submission stamped now
    pub fn new(verse_id: &str, reason: ReportReason, feedback: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            verse_id: verse_id.to_string(),
            reason,
            feedback: feedback.to_string(),
            submitted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_codes() {
        let json = serde_json::to_string(&ReportReason::IncorrectTranslation).unwrap();
        assert_eq!(json, "\"incorrect_translation\"");

        let legacy: ReportReason = serde_json::from_str("\"incorrect_sanskrit\"").unwrap();
        assert_eq!(legacy, ReportReason::IncorrectSource);
    }

    #[test]
    fn test_submission_serializes_camel_case() {
        let report = ReportSubmission::new("1.1.1", ReportReason::Other, "typo");
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["verseId"], "1.1.1");
        assert_eq!(value["reason"], "other");
        assert!(value["submittedAt"].as_str().unwrap().contains('T'));
    }
}
