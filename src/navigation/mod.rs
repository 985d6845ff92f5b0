//! Linear navigation over the content tree
//!
//! The [`TraversalIndex`] flattens the tree into reading order once, at
//! load. The [`Navigator`] keeps the current selection valid against both.

mod index;
mod selection;

pub use index::{TraversalIndex, VersePath};
pub use selection::{Cursor, Navigator, Selection};
