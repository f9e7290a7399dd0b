// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::outline::models::HeadingNode;
use crate::utils::error::StorageError;

/// Where legacy (`--basename`) trees are written unless overridden.
pub const DEFAULT_STORAGE_ROOT: &str = "storage/openrouter";
/// File name used inside each legacy `<basename>_vector_index` directory.
pub const LEGACY_TREE_FILE: &str = "section_tree_md_only.json";
/// Appended to the input's file stem when no output is given.
pub const TREE_SUFFIX: &str = "_tree.json";

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a StorageManager rooted at `base_dir`. Nothing is created on
    /// disk until a tree is written.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self { base_dir: base_dir.as_ref().to_path_buf() }
    }

    /// Legacy layout: `<base_dir>/<basename>_vector_index/section_tree_md_only.json`
    pub fn legacy_tree_path(&self, basename: &str) -> PathBuf {
        self.base_dir
            .join(format!("{}_vector_index", basename))
            .join(LEGACY_TREE_FILE)
    }

    /// Picks the output file: an explicit path wins, then the legacy
    /// basename layout, then `<input stem>_tree.json` next to the input.
    /// An empty basename counts as absent.
    pub fn resolve_output_path(
        &self,
        input: &Path,
        output: Option<&Path>,
        basename: Option<&str>,
    ) -> PathBuf {
        if let Some(path) = output {
            return path.to_path_buf();
        }
        if let Some(name) = basename.filter(|name| !name.is_empty()) {
            return self.legacy_tree_path(name);
        }
        default_output_path(input)
    }

    /// Writes the tree as pretty-printed JSON, creating parent directories.
    pub fn write_json_tree(&self, root: &HeadingNode, path: &Path) -> Result<PathBuf, StorageError> {
        if let Some(parent) = path.parent() {
            // A bare file name has an empty parent; nothing to create then
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
                tracing::debug!("Created output directory {}", parent.display());
            }
        }

        let json = serde_json::to_string_pretty(root)?;
        fs::write(path, json)?;

        tracing::info!("Saved section tree to {}", path.display());
        Ok(path.to_path_buf())
    }

    /// Loads a tree previously written by [`StorageManager::write_json_tree`].
    pub fn read_json_tree(&self, path: &Path) -> Result<HeadingNode, StorageError> {
        let text = fs::read_to_string(path)?;
        let root = serde_json::from_str(&text)?;
        Ok(root)
    }
}

impl Default for StorageManager {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_ROOT)
    }
}

/// `docs/report.md` -> `docs/report_tree.json`; `README` -> `README_tree.json`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}", stem, TREE_SUFFIX))
}
