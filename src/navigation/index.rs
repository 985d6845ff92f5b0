//! Flattened reading order

use std::collections::HashMap;

use crate::models::Scripture;

/// Full path to one verse
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersePath {
    /// Owning section id
    pub section_id: String,
    /// Owning subsection id
    pub subsection_id: String,
    /// Verse id
    pub verse_id: String,
}

impl std::fmt::Display for VersePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} / {} / {}",
            self.section_id, self.subsection_id, self.verse_id
        )
    }
}

/// Every verse of a scripture, depth-first in document order
#[derive(Debug, Clone, Default)]
pub struct TraversalIndex {
    entries: Vec<VersePath>,
    positions: HashMap<String, usize>,
}

impl TraversalIndex {
    /// Walk the tree and record each verse once
    pub fn build(scripture: &Scripture) -> Self {
        let mut entries = Vec::with_capacity(scripture.verse_count());
        for section in scripture.sections() {
            for subsection in &section.subsections {
                for verse in &subsection.verses {
                    entries.push(VersePath {
                        section_id: section.id.clone(),
                        subsection_id: subsection.id.clone(),
                        verse_id: verse.id.clone(),
                    });
                }
            }
        }

        let positions = entries
            .iter()
            .enumerate()
            .map(|(i, path)| (path.verse_id.clone(), i))
            .collect();

        Self { entries, positions }
    }

    /// Number of verses
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there is nothing to navigate
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Path at a position
    pub fn get(&self, index: usize) -> Option<&VersePath> {
        self.entries.get(index)
    }

    /// Position of a verse
    pub fn position(&self, verse_id: &str) -> Option<usize> {
        self.positions.get(verse_id).copied()
    }

    /// All paths in reading order
    pub fn iter(&self) -> impl Iterator<Item = &VersePath> {
        self.entries.iter()
    }
}
