// src/extractors/heading.rs

// --- Imports ---
use crate::outline::models::HeadingNode;
use once_cell::sync::Lazy;
use regex::Regex;

// --- Regex Patterns (Lazy Static) ---
// ``` or ~~~ (three or more) after optional indentation. Both styles share one toggle.
static FENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:`{3,}|~{3,})").expect("Failed to compile FENCE_RE")
});

// Applied to the trimmed line: nothing but the marker itself.
static PAGE_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*<!--PAGE:\s*(\d+)\s*-->\s*$").expect("Failed to compile PAGE_MARKER_RE")
});

// Applied to the raw line: markers must sit at column 0.
static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(#{1,6})\s+(.+?)\s*$").expect("Failed to compile HEADING_RE")
});

// Line boundaries: LF, CR, VT, FF, the ASCII file/group/record separators, NEL, LS and PS.
// `\r\n` is handled as a single break in `split_lines`.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

// --- Data Structures ---

/// What a single source line means to the scanner, before any state is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Fence,
    Blank,
    /// `None` when the digits matched but did not fit a page number.
    PageMarker(Option<u64>),
    Heading { level: u8, title: String },
    Text,
}

/// Mutable state threaded through one forward scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanState {
    pub current_page: Option<u64>,
    pub in_fence: bool,
}

impl ScanState {
    /// Applies one line to the state, returning a heading if the line records one.
    pub fn feed(&mut self, line: &str) -> Option<HeadingNode> {
        let kind = classify_line(line);

        // Fence lines always toggle, even from inside a fence.
        if kind == LineKind::Fence {
            self.in_fence = !self.in_fence;
            tracing::trace!("Fence toggled (in_fence = {}): '{}'", self.in_fence, line.trim());
            return None;
        }
        if self.in_fence {
            return None;
        }

        match kind {
            LineKind::PageMarker(Some(page)) => {
                tracing::trace!("Page marker: {:?} -> {}", self.current_page, page);
                self.current_page = Some(page);
                None
            }
            LineKind::PageMarker(None) => {
                tracing::debug!("Ignoring unparsable page marker: '{}'", line.trim());
                None
            }
            LineKind::Heading { level, title } => {
                Some(HeadingNode::new(title, level, self.current_page))
            }
            LineKind::Fence | LineKind::Blank | LineKind::Text => None,
        }
    }
}

/// Classifies a line in rule priority order: fence, blank, page marker, heading.
pub fn classify_line(line: &str) -> LineKind {
    if FENCE_RE.is_match(line) {
        return LineKind::Fence;
    }

    let stripped = line.trim();
    if stripped.is_empty() {
        return LineKind::Blank;
    }

    if let Some(caps) = PAGE_MARKER_RE.captures(stripped) {
        return LineKind::PageMarker(caps[1].parse::<u64>().ok());
    }

    if let Some(caps) = HEADING_RE.captures(line) {
        return LineKind::Heading {
            // 1..=6 by construction of the pattern
            level: caps[1].len() as u8,
            title: caps[2].trim().to_string(),
        };
    }

    LineKind::Text
}

/// Splits on any of `LINE_BREAKS` (with `\r\n` as one break), without
/// yielding a trailing empty line. Form feeds from PDF conversions end lines too.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(LINE_BREAKS) {
            Some(idx) => {
                let line = &rest[..idx];
                let tail = &rest[idx..];
                let skip = if tail.starts_with("\r\n") {
                    2
                } else {
                    tail.chars().next().map_or(1, char::len_utf8)
                };
                rest = &tail[skip..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

// --- Main Extractor Structure ---
#[derive(Debug, Default)]
pub struct HeadingExtractor;

impl HeadingExtractor {
    pub fn new() -> Self { Self {} }

    /// Scans `text` once and returns its headings in document order.
    /// Headings inside fenced blocks are skipped; each heading carries the
    /// most recent page marker seen before it.
    pub fn extract(&self, text: &str) -> Vec<HeadingNode> {
        let mut state = ScanState::default();
        let mut headings = Vec::new();
        let mut line_count = 0usize;

        for line in split_lines(text) {
            line_count += 1;
            if let Some(heading) = state.feed(line) {
                tracing::trace!("Heading (level {}, page {:?}): '{}'", heading.level, heading.page, heading.title);
                headings.push(heading);
            }
        }

        if state.in_fence {
            tracing::warn!("Document ended inside an unclosed fenced block");
        }
        tracing::debug!("Scanned {} lines, found {} headings", line_count, headings.len());
        headings
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Vec<HeadingNode> {
        HeadingExtractor::new().extract(text)
    }

    fn summary(headings: &[HeadingNode]) -> Vec<(&str, u8, Option<u64>)> {
        headings.iter().map(|h| (h.title.as_str(), h.level, h.page)).collect()
    }

    #[test]
    fn test_levels_and_titles() {
        let md = "# One\nintro text\n## Two  \n###### Six\n####### Seven\n#NoSpace\n";
        let headings = extract(md);
        assert_eq!(
            summary(&headings),
            [("One", 1, None), ("Two", 2, None), ("Six", 6, None)]
        );
        assert!(headings.iter().all(|h| h.children.is_empty()));
    }

    #[test]
    fn test_heading_must_start_at_column_zero() {
        assert_eq!(classify_line("   # Indented"), LineKind::Text);
        assert_eq!(classify_line("\t## Tabbed"), LineKind::Text);
    }

    #[test]
    fn test_tab_separator_and_inner_hashes() {
        assert_eq!(
            classify_line("##\tC# and F# notes ##"),
            LineKind::Heading { level: 2, title: "C# and F# notes ##".to_string() }
        );
    }

    #[test]
    fn test_whitespace_only_title_is_recorded_empty() {
        assert_eq!(
            classify_line("##   "),
            LineKind::Heading { level: 2, title: String::new() }
        );
        // A single space leaves nothing for the title, so the line is plain text.
        assert_eq!(classify_line("# "), LineKind::Text);
    }

    #[test]
    fn test_fence_suppresses_headings() {
        let md = "# Before\n```rust\n# not a heading\n<!--PAGE:9-->\n```\n# After\n";
        let headings = extract(md);
        assert_eq!(summary(&headings), [("Before", 1, None), ("After", 1, None)]);
    }

    #[test]
    fn test_indented_and_long_fences() {
        let md = "  ~~~~~\n# hidden\n  ~~~~~\n# shown\n";
        assert_eq!(summary(&extract(md)), [("shown", 1, None)]);
    }

    #[test]
    fn test_tilde_closes_backtick_fence() {
        // Both fence styles flip the same flag.
        let md = "```\n# hidden\n~~~\n# visible\n";
        assert_eq!(summary(&extract(md)), [("visible", 1, None)]);
    }

    #[test]
    fn test_two_backticks_are_not_a_fence() {
        let md = "``\n# visible\n";
        assert_eq!(summary(&extract(md)), [("visible", 1, None)]);
    }

    #[test]
    fn test_unclosed_fence_swallows_rest() {
        let md = "# A\n```\n# B\n# C\n";
        assert_eq!(summary(&extract(md)), [("A", 1, None)]);
    }

    #[test]
    fn test_page_persistence() {
        let md = "# Early\n<!--PAGE:3-->\n# A\n## A.1\n<!--PAGE:7-->\n# B\n";
        assert_eq!(
            summary(&extract(md)),
            [("Early", 1, None), ("A", 1, Some(3)), ("A.1", 2, Some(3)), ("B", 1, Some(7))]
        );
    }

    #[test]
    fn test_page_may_decrease() {
        let md = "<!--PAGE:10-->\n# X\n<!--PAGE:2-->\n# Y\n";
        assert_eq!(summary(&extract(md)), [("X", 1, Some(10)), ("Y", 1, Some(2))]);
    }

    #[test]
    fn test_page_marker_whitespace() {
        assert_eq!(classify_line("  <!--PAGE:  12 -->  "), LineKind::PageMarker(Some(12)));
        assert_eq!(classify_line("<!--PAGE:5-->"), LineKind::PageMarker(Some(5)));
        // Extra content on the line means it is not a marker.
        assert_eq!(classify_line("<!--PAGE:5--> trailing"), LineKind::Text);
        assert_eq!(classify_line("<!-- PAGE:5-->"), LineKind::Text);
    }

    #[test]
    fn test_malformed_page_marker_keeps_current_page() {
        let md = "<!--PAGE:4-->\n<!--PAGE:abc-->\n# A\n";
        let headings = extract(md);
        assert_eq!(summary(&headings), [("A", 1, Some(4))]);
    }

    #[test]
    fn test_overflowing_page_marker_is_ignored() {
        let mut state = ScanState::default();
        assert!(state.feed("<!--PAGE:8-->").is_none());
        assert!(state.feed("<!--PAGE:99999999999999999999-->").is_none());
        assert_eq!(state.current_page, Some(8));
        let heading = state.feed("# Kept").unwrap();
        assert_eq!(heading.page, Some(8));
    }

    #[test]
    fn test_line_endings() {
        let lines: Vec<&str> = split_lines("a\r\nb\rc\n\nd").collect();
        assert_eq!(lines, ["a", "b", "c", "", "d"]);
        assert_eq!(split_lines("").count(), 0);
        assert_eq!(split_lines("x\n").collect::<Vec<_>>(), ["x"]);

        let md = "# A\r\n## B\r### C\n";
        assert_eq!(
            summary(&extract(md)),
            [("A", 1, None), ("B", 2, None), ("C", 3, None)]
        );
    }

    #[test]
    fn test_unicode_and_control_line_breaks() {
        let lines: Vec<&str> = split_lines("a\x0bb\x0cc\x1cd\x1de\x1ef\u{85}g\u{2028}h\u{2029}i").collect();
        assert_eq!(lines, ["a", "b", "c", "d", "e", "f", "g", "h", "i"]);

        // A form feed between headings must not glue them into one title
        let md = "# A\x0c# B\u{2028}## C\u{85}# D";
        assert_eq!(
            summary(&extract(md)),
            [("A", 1, None), ("B", 1, None), ("C", 2, None), ("D", 1, None)]
        );
    }

    #[test]
    fn test_large_page_numbers() {
        let md = "<!--PAGE:5000000000-->\n# Big\n";
        assert_eq!(summary(&extract(md)), [("Big", 1, Some(5_000_000_000))]);
    }

    #[test]
    fn test_empty_input() {
        assert!(extract("").is_empty());
        assert!(extract("\n\n   \n").is_empty());
    }

    #[test]
    fn test_count_matches_heading_lines_outside_fences() {
        let md = "\
# Title
text
## Sub
```
## fenced
```
### Deep
####### too deep
<!--PAGE:2-->
#### Four
";
        // Title, Sub, Deep, Four
        assert_eq!(extract(md).len(), 4);
    }
}
