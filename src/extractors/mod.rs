// src/extractors/mod.rs
pub mod heading;

// Re-export key extraction types for convenience
pub use heading::{classify_line, split_lines, HeadingExtractor, LineKind, ScanState};
