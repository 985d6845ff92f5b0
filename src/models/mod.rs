//! Data models for Shloka

mod language;
mod report;
mod scripture;
mod translation;

pub use language::Language;
pub use report::{ReportReason, ReportSubmission};
pub use scripture::{LevelNames, Scripture, ScriptureDocument, Section, Subsection, Verse};
pub use translation::{TranslationKey, TranslationPayload};
