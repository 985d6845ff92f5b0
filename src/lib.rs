//! # shloka 📜
//!
//! A terminal reader for scripture with on-demand verse translation.
//!
//! ## Overview
//!
//! shloka loads a scripture as a three-level tree (section, subsection,
//! verse), lets you walk it in reading order, and shows each verse with a
//! translation in the language of your choice. Translations authored with
//! the content are shown as-is; anything else is requested from an AI
//! provider once per verse and language and cached for the session.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          App                                │
//! │  Terminal loop, async worker for provider calls             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Reader                              │
//! │  One reading session: selection + translation + reports     │
//! └─────────────────────────────────────────────────────────────┘
//!          │                   │                   │
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │   Navigation    │ │   Translation   │ │     Report      │
//! │                 │ │                 │ │                 │
//! │ • Index         │ │ • Resolver      │ │ • Draft rules   │
//! │ • Selection     │ │ • Cache         │ │ • Sinks         │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//!          │                   │
//!          ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐
//! │     Models      │ │       API       │
//! │ • Scripture     │ │ • Gemini        │
//! │ • Language      │ │ • Provider trait│
//! └─────────────────┘ └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`api`] — Translation providers (Gemini)
//! - [`app`] — TUI application state and event loop
//! - [`config`] — Configuration management
//! - [`demo`] — Built-in sample hymns
//! - [`error`] — Error types
//! - [`models`] — Scripture tree, languages, translations, reports
//! - [`navigation`] — Traversal index and selection state machine
//! - [`reader`] — Reading session facade
//! - [`report`] — Report validation and sinks
//! - [`theme`] — Theme support via ratatui-themes
//! - [`translation`] — Translation resolver and cache
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use shloka::{Language, Reader, demo};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut reader = Reader::new(Arc::new(demo::rig_veda()?));
//!     reader.next()?;
//!     let _ = reader.current_verse_payload(&Language::default());
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/shloka/0.1.0")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::unused_async)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::if_not_else)]
#![allow(clippy::single_match_else)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::use_self)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::similar_names)]
#![allow(clippy::manual_let_else)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::too_many_arguments)]

pub mod api;
pub mod app;
pub mod config;
pub mod demo;
pub mod error;
pub mod models;
pub mod navigation;
pub mod paths;
pub mod reader;
pub mod report;
pub mod theme;
pub mod translation;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use api::{Provider, TranslationProvider};
pub use app::AppState;
pub use config::Config;
pub use error::{ContentError, NavError, ReportError, TranslationError};
pub use models::{Language, ReportReason, ReportSubmission, Scripture, TranslationKey, TranslationPayload, Verse};
pub use navigation::{Cursor, Navigator, Selection, TraversalIndex};
pub use reader::Reader;
pub use theme::{Theme, ThemeColors};
pub use translation::{Resolution, ResolvedTranslation, TranslationResolver, TranslationState};

// Re-export theme types from ratatui-themes crate
pub use ratatui_themes::{ThemeName, ThemePalette};

/// ASCII logo for the application
pub const LOGO: &str = r"
      _     _       _
  ___| |__ | | ___ | | ____ _
 / __| '_ \| |/ _ \| |/ / _` |
 \__ \ | | | | (_) |   < (_| |
 |___/_| |_|_|\___/|_|\_\__,_|
";

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
