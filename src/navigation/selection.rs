//! Selection state machine

use std::sync::Arc;

use super::{TraversalIndex, VersePath};
use crate::error::{Boundary, Level, NavError};
use crate::models::{Scripture, Section, Subsection, Verse};

/// A positioned selection: the verse path plus its place in the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    /// Selected section/subsection/verse
    pub path: VersePath,
    /// Position of the verse in the traversal index
    pub index: usize,
}

/// What is currently shown
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Nothing loaded, or nothing to show
    #[default]
    Empty,
    /// A verse is selected
    Positioned(Cursor),
}

impl Selection {
    /// Get the cursor, if positioned
    pub const fn cursor(&self) -> Option<&Cursor> {
        match self {
            Self::Empty => None,
            Self::Positioned(cursor) => Some(cursor),
        }
    }

    /// Get the selected verse id, if positioned
    pub fn verse_id(&self) -> Option<&str> {
        self.cursor().map(|c| c.path.verse_id.as_str())
    }
}

/// Owns the tree, its index and the current selection
///
/// Every transition either moves to a path that exists in the tree, or
/// fails and leaves the selection untouched.
#[derive(Debug, Clone)]
pub struct Navigator {
    scripture: Arc<Scripture>,
    index: TraversalIndex,
    selection: Selection,
}

impl Navigator {
    /// Index the scripture and position on its first verse, if any
    pub fn new(scripture: Arc<Scripture>) -> Self {
        let index = TraversalIndex::build(&scripture);
        let selection = index.get(0).map_or(Selection::Empty, |path| {
            Selection::Positioned(Cursor {
                path: path.clone(),
                index: 0,
            })
        });

        Self {
            scripture,
            index,
            selection,
        }
    }

    /// The loaded scripture
    pub fn scripture(&self) -> &Scripture {
        &self.scripture
    }

    /// The traversal index
    pub const fn index(&self) -> &TraversalIndex {
        &self.index
    }

    /// The current selection
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The selected section
    pub fn current_section(&self) -> Option<&Section> {
        let cursor = self.selection.cursor()?;
        self.scripture.section(&cursor.path.section_id).ok()
    }

    /// The selected subsection
    pub fn current_subsection(&self) -> Option<&Subsection> {
        let cursor = self.selection.cursor()?;
        self.scripture
            .subsection(&cursor.path.section_id, &cursor.path.subsection_id)
            .ok()
    }

    /// The selected verse
    pub fn current_verse(&self) -> Option<&Verse> {
        let cursor = self.selection.cursor()?;
        self.scripture.verse(&cursor.path.verse_id).ok()
    }

    /// Whether `previous` would move
    pub fn has_previous(&self) -> bool {
        self.selection.cursor().is_some_and(|c| c.index > 0)
    }

    /// Whether `next` would move
    pub fn has_next(&self) -> bool {
        self.selection
            .cursor()
            .is_some_and(|c| c.index + 1 < self.index.len())
    }

    /// Select a section and cascade to its first navigable verse
    pub fn select_section(&mut self, section_id: &str) -> Result<Cursor, NavError> {
        self.ensure_content()?;
        let section = self.scripture.section(section_id)?;
        let Some(verse) = section.first_navigable().and_then(|ss| ss.verses.first()) else {
            return Err(NavError::EmptySelection {
                level: Level::Section,
                id: section_id.to_string(),
            });
        };
        let verse_id = verse.id.clone();
        self.move_to_verse(&verse_id)
    }

    /// Select a subsection of the current section and cascade to its first verse
    pub fn select_subsection(&mut self, subsection_id: &str) -> Result<Cursor, NavError> {
        let cursor = self.ensure_content()?;
        let section_id = cursor.path.section_id.clone();

        let subsection = match self.scripture.subsection(&section_id, subsection_id) {
            Ok(subsection) => subsection,
            Err(_) if self.scripture.has_subsection(subsection_id) => {
                tracing::warn!(
                    "Subsection '{}' selected outside current section '{}'",
                    subsection_id,
                    section_id
                );
                return Err(NavError::InvalidScope {
                    level: Level::Subsection,
                    id: subsection_id.to_string(),
                });
            }
            Err(e) => return Err(e),
        };

        let Some(verse) = subsection.verses.first() else {
            return Err(NavError::EmptySelection {
                level: Level::Subsection,
                id: subsection_id.to_string(),
            });
        };
        let verse_id = verse.id.clone();
        self.move_to_verse(&verse_id)
    }

    /// Select a verse of the current subsection
    pub fn select_verse(&mut self, verse_id: &str) -> Result<Cursor, NavError> {
        let cursor = self.ensure_content()?;
        let (section, subsection) = self.scripture.locate(verse_id)?;

        if section.id != cursor.path.section_id || subsection.id != cursor.path.subsection_id {
            tracing::warn!(
                "Verse '{}' selected outside current subsection '{}'",
                verse_id,
                cursor.path.subsection_id
            );
            return Err(NavError::InvalidScope {
                level: Level::Verse,
                id: verse_id.to_string(),
            });
        }

        self.move_to_verse(verse_id)
    }

    /// Jump to any verse by its stable id
    pub fn jump_to(&mut self, verse_id: &str) -> Result<Cursor, NavError> {
        self.ensure_content()?;
        self.move_to_verse(verse_id)
    }

    /// Move one verse forward in reading order
    pub fn next(&mut self) -> Result<Cursor, NavError> {
        let cursor = self.ensure_content()?;
        if cursor.index + 1 >= self.index.len() {
            return Err(NavError::AtBoundary(Boundary::Last));
        }
        let target = cursor.index + 1;
        self.move_to_index(target)
    }

    /// Move one verse back in reading order
    pub fn previous(&mut self) -> Result<Cursor, NavError> {
        let cursor = self.ensure_content()?;
        if cursor.index == 0 {
            return Err(NavError::AtBoundary(Boundary::First));
        }
        let target = cursor.index - 1;
        self.move_to_index(target)
    }

    fn ensure_content(&self) -> Result<&Cursor, NavError> {
        self.selection.cursor().ok_or(NavError::NoContent)
    }

    fn move_to_verse(&mut self, verse_id: &str) -> Result<Cursor, NavError> {
        let target = self
            .index
            .position(verse_id)
            .ok_or_else(|| NavError::not_found(Level::Verse, verse_id))?;
        self.move_to_index(target)
    }

    fn move_to_index(&mut self, target: usize) -> Result<Cursor, NavError> {
        let path = self.index.get(target).cloned().ok_or(NavError::NoContent)?;
        let cursor = Cursor {
            path,
            index: target,
        };
        tracing::debug!("Selected {} (#{})", cursor.path, cursor.index);
        self.selection = Selection::Positioned(cursor.clone());
        Ok(cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn navigator(scripture: Scripture) -> Navigator {
        Navigator::new(Arc::new(scripture))
    }

    fn assert_consistent(nav: &Navigator) {
        let cursor = nav.selection().cursor().expect("positioned");
        let verses = nav
            .scripture()
            .verses_of(&cursor.path.section_id, &cursor.path.subsection_id)
            .unwrap();
        assert!(verses.iter().any(|v| v.id == cursor.path.verse_id));
        assert_eq!(nav.index().position(&cursor.path.verse_id), Some(cursor.index));
        assert_eq!(nav.index().get(cursor.index), Some(&cursor.path));
    }

    #[test]
    fn test_next_until_boundary() {
        let mut nav = navigator(testing::three_verse_scripture());
        assert_eq!(nav.selection().verse_id(), Some("v1"));

        assert_eq!(nav.next().unwrap().path.verse_id, "v2");
        assert_eq!(nav.next().unwrap().path.verse_id, "v3");
        assert_eq!(nav.next(), Err(NavError::AtBoundary(Boundary::Last)));
        assert_eq!(nav.selection().verse_id(), Some("v3"));
        assert!(!nav.has_next());
    }

    #[test]
    fn test_previous_at_start_is_noop() {
        let mut nav = navigator(testing::three_verse_scripture());
        let before = nav.selection().clone();
        assert_eq!(nav.previous(), Err(NavError::AtBoundary(Boundary::First)));
        assert_eq!(nav.selection(), &before);
        assert!(!nav.has_previous());
    }

    #[test]
    fn test_walk_crosses_sections_and_stays_consistent() {
        let mut nav = navigator(testing::branching_scripture());
        let mut visited = vec![nav.selection().verse_id().unwrap().to_string()];
        assert_consistent(&nav);
        while let Ok(cursor) = nav.next() {
            assert_consistent(&nav);
            visited.push(cursor.path.verse_id);
        }
        assert_eq!(visited, vec!["a1.1", "a1.2", "a2.1", "c1.1", "c1.2"]);

        while nav.previous().is_ok() {
            assert_consistent(&nav);
        }
        assert_eq!(nav.selection().verse_id(), Some("a1.1"));
    }

    // Section "c" opens with an empty subsection "c0"
    #[test]
    fn test_select_section_cascades_to_first_verse() {
        let mut nav = navigator(testing::branching_scripture());
        let cursor = nav.select_section("c").unwrap();
        assert_eq!(cursor.path.subsection_id, "c1");
        assert_eq!(cursor.path.verse_id, "c1.1");
        assert_eq!(cursor.index, 3);
        assert_consistent(&nav);
    }

    #[test]
    fn test_select_empty_section_keeps_state() {
        let mut nav = navigator(testing::branching_scripture());
        nav.next().unwrap();
        let before = nav.selection().clone();

        let err = nav.select_section("b").unwrap_err();
        assert!(matches!(err, NavError::EmptySelection { level: Level::Section, .. }));
        assert_eq!(nav.selection(), &before);

        assert!(matches!(
            nav.select_section("zzz"),
            Err(NavError::NotFound { level: Level::Section, .. })
        ));
        assert_eq!(nav.selection(), &before);
    }

    #[test]
    fn test_select_subsection_scope() {
        let mut nav = navigator(testing::branching_scripture());

        let cursor = nav.select_subsection("a2").unwrap();
        assert_eq!(cursor.path.verse_id, "a2.1");

        let before = nav.selection().clone();
        assert!(matches!(
            nav.select_subsection("c1"),
            Err(NavError::InvalidScope { level: Level::Subsection, .. })
        ));
        assert!(matches!(
            nav.select_subsection("a-empty"),
            Err(NavError::EmptySelection { level: Level::Subsection, .. })
        ));
        assert!(matches!(
            nav.select_subsection("nope"),
            Err(NavError::NotFound { level: Level::Subsection, .. })
        ));
        assert_eq!(nav.selection(), &before);
    }

    #[test]
    fn test_select_verse_scope() {
        let mut nav = navigator(testing::branching_scripture());

        let cursor = nav.select_verse("a1.2").unwrap();
        assert_eq!(cursor.index, 1);

        assert!(matches!(
            nav.select_verse("a2.1"),
            Err(NavError::InvalidScope { level: Level::Verse, .. })
        ));
        assert!(matches!(
            nav.select_verse("x"),
            Err(NavError::NotFound { level: Level::Verse, .. })
        ));
        assert_eq!(nav.selection().verse_id(), Some("a1.2"));
    }

    #[test]
    fn test_jump_to_any_verse() {
        let mut nav = navigator(testing::branching_scripture());
        let cursor = nav.jump_to("c1.2").unwrap();
        assert_eq!(cursor.path.section_id, "c");
        assert_eq!(cursor.index, 4);
        assert_consistent(&nav);
    }

    #[test]
    fn test_empty_scripture_reports_no_content() {
        let mut nav = navigator(testing::empty_scripture());
        assert_eq!(nav.selection(), &Selection::Empty);
        assert_eq!(nav.next(), Err(NavError::NoContent));
        assert_eq!(nav.previous(), Err(NavError::NoContent));
        assert_eq!(nav.select_section("b"), Err(NavError::NoContent));
        assert!(nav.current_verse().is_none());
    }
}
