//! md_section_tree: builds a section tree from markdown headings.
//!
//! The pipeline has two stages. [`extract`] scans the text once, skipping
//! fenced blocks and tracking `<!--PAGE:n-->` markers, and returns the
//! headings in document order. [`build`] nests that flat list under a
//! synthetic `ROOT` node by heading level.
pub mod extractors;
pub mod outline;
pub mod storage;
pub mod utils;

pub use extractors::HeadingExtractor;
pub use outline::HeadingNode;

/// Returns the headings of `text` in document order, without children.
pub fn extract(text: &str) -> Vec<HeadingNode> {
    HeadingExtractor::new().extract(text)
}

/// Nests a flat heading list under a `ROOT` node (level 0).
pub fn build(headings: Vec<HeadingNode>) -> HeadingNode {
    outline::build(headings)
}
