// src/outline/models.rs
use serde::{Deserialize, Serialize};

/// Title given to the synthetic node that holds the top-level headings.
pub const ROOT_TITLE: &str = "ROOT";

/// One markdown heading, and after the build step, everything nested under it.
/// Serializes as `{"title", "level", "page", "children"}` in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingNode {
    pub title: String,
    pub level: u8,           // Marker count, 1..=6 (0 for the root)
    pub page: Option<u64>,   // Last <!--PAGE:n--> seen before the heading
    #[serde(default)]
    pub children: Vec<HeadingNode>,
}

impl HeadingNode {
    /// Creates a leaf heading as produced by the extractor.
    pub fn new(title: impl Into<String>, level: u8, page: Option<u64>) -> Self {
        Self {
            title: title.into(),
            level,
            page,
            children: Vec::new(),
        }
    }

    /// The synthetic container node at the top of every tree.
    pub fn root() -> Self {
        Self::new(ROOT_TITLE, 0, None)
    }

    /// Number of headings in this subtree, not counting `self`.
    pub fn descendant_count(&self) -> usize {
        let mut count = 0;
        let mut pending: Vec<&HeadingNode> = self.children.iter().collect();
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children.iter());
        }
        count
    }
}
