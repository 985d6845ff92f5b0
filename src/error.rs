//! Error types for the reading engine
//!
//! Structural errors never change state: the navigator refuses the
//! transition and keeps the previous selection. Translation errors are
//! shown to the user and can be retried.

use std::fmt;

use thiserror::Error;

/// A level of the content hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Top level (book, mandala, ...)
    Section,
    /// Middle level (chapter, sukta, ...)
    Subsection,
    /// Leaf level
    Verse,
}

impl Level {
    /// Get the generic display name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Section => "section",
            Self::Subsection => "subsection",
            Self::Verse => "verse",
        }
    }

    /// Get the name of the level directly above this one
    pub const fn parent_name(&self) -> &'static str {
        match self {
            Self::Section => "scripture",
            Self::Subsection => "section",
            Self::Verse => "subsection",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Which end of the traversal index was hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Already at the first verse
    First,
    /// Already at the last verse
    Last,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "first"),
            Self::Last => write!(f, "last"),
        }
    }
}

/// Navigation and lookup errors
///
/// `EmptySelection` and `AtBoundary` are expected conditions rather than
/// failures; the UI disables the matching controls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    /// The id does not exist in the loaded scripture
    #[error("{level} '{id}' not found")]
    NotFound {
        /// Level that was searched
        level: Level,
        /// Requested id
        id: String,
    },

    /// The id exists, but outside the currently selected parent
    #[error("{level} '{id}' does not belong to the current {}", .level.parent_name())]
    InvalidScope {
        /// Level of the requested id
        level: Level,
        /// Requested id
        id: String,
    },

    /// The target has no verse to show
    #[error("{level} '{id}' has no verses")]
    EmptySelection {
        /// Level of the requested id
        level: Level,
        /// Requested id
        id: String,
    },

    /// `next`/`previous` at the end of the index
    #[error("already at the {0} verse")]
    AtBoundary(Boundary),

    /// Nothing is loaded, or the scripture holds no verses
    #[error("no verses loaded")]
    NoContent,
}

impl NavError {
    /// Whether this is an expected boundary condition rather than a caller bug
    pub const fn is_benign(&self) -> bool {
        matches!(
            self,
            Self::EmptySelection { .. } | Self::AtBoundary(_) | Self::NoContent
        )
    }

    pub(crate) fn not_found(level: Level, id: &str) -> Self {
        Self::NotFound {
            level,
            id: id.to_string(),
        }
    }
}

/// Translation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// The provider rejected or failed the request
    #[error("translation provider error: {0}")]
    Provider(String),

    /// The provider answered with something that could not be parsed
    #[error("malformed translation response: {0}")]
    Malformed(String),

    /// Neither phrase analysis nor purport was present
    #[error("translation response has neither phrase analysis nor purport")]
    Incomplete,

    /// An identical request is already outstanding
    #[error("a translation for this verse and language is already in progress")]
    InFlight,

    /// The selection moved on before the result arrived
    #[error("translation superseded by a newer request")]
    Superseded,

    /// No provider is configured
    #[error("no translation provider configured: {0}")]
    Unavailable(String),
}

/// Errors raised while building a scripture from authored data
#[derive(Debug, Error)]
pub enum ContentError {
    /// Two verses share an id
    #[error("duplicate verse id '{0}'")]
    DuplicateVerse(String),

    /// Two sections share an id
    #[error("duplicate section id '{0}'")]
    DuplicateSection(String),

    /// Two subsections of one section share an id
    #[error("duplicate subsection id '{id}' in section '{section}'")]
    DuplicateSubsection {
        /// Owning section
        section: String,
        /// Repeated subsection id
        id: String,
    },

    /// A verse has no source text
    #[error("verse '{0}' has no source lines")]
    EmptyVerse(String),

    /// The authored file could not be read
    #[error("failed to read scripture: {0}")]
    Io(#[from] std::io::Error),

    /// The authored file is not valid JSON for a scripture
    #[error("failed to parse scripture: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Report dialog validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// No reason picked
    #[error("please select a reason for your report")]
    MissingReason,

    /// "Other" picked without details
    #[error("please provide details when selecting \"other\"")]
    MissingDetails,
}
