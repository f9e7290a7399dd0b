// src/outline/tree.rs
use crate::outline::models::HeadingNode;

/// Nests a flat, ordered list of headings under a synthetic root.
///
/// Each heading becomes a child of the nearest preceding heading with a
/// strictly smaller level, or of the root when there is none. Level jumps
/// (e.g. 1 then 3) nest directly; no intermediate nodes are created.
///
/// The stack owns the currently open ancestor chain, strictly increasing in
/// level from bottom to top. A node is attached to its parent when it is
/// popped, at which point its subtree is complete.
pub fn build(headings: Vec<HeadingNode>) -> HeadingNode {
    let mut root = HeadingNode::root();
    let mut stack: Vec<HeadingNode> = Vec::new();
    let total = headings.len();

    for heading in headings {
        while stack.last().is_some_and(|top| top.level >= heading.level) {
            close_top(&mut stack, &mut root);
        }
        stack.push(heading);
    }

    while !stack.is_empty() {
        close_top(&mut stack, &mut root);
    }

    tracing::debug!(
        "Built section tree: {} headings, {} top-level",
        total,
        root.children.len()
    );
    root
}

/// Pops the top of the stack and appends it to whatever is now below it.
fn close_top(stack: &mut Vec<HeadingNode>, root: &mut HeadingNode) {
    if let Some(node) = stack.pop() {
        let parent = stack.last_mut().unwrap_or(root);
        parent.children.push(node);
    }
}
