//! Data structures shared by the bundle and apply pipelines.
//!
//! # Public API
//! - [`FileEntry`]: One collected file, ready to be encoded
//! - [`SkipRecord`]: A file left out of the bundle, with the reason
//! - [`ParsedBlock`]: One block recovered from returned text, before validation

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub rel_path: PathBuf,
    pub content: String,
}

impl FileEntry {
    pub fn new(rel_path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            rel_path: rel_path.into(),
            content: content.into(),
        }
    }

    /// Relative path as written into the bundle, always `/`-separated
    pub fn slash_path(&self) -> String {
        slash_path(&self.rel_path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipRecord {
    pub rel_path: PathBuf,
    pub reason: String,
}

impl SkipRecord {
    pub fn new(rel_path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            rel_path: rel_path.into(),
            reason: reason.into(),
        }
    }
}

/// A block as the parser saw it. Both marker paths are kept so the caller can
/// tell a well-formed block from one whose closing marker belongs to another file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedBlock {
    pub open_path: String,
    pub content: String,
    pub close_path: String,
}

impl ParsedBlock {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            close_path: path.clone(),
            open_path: path,
            content: content.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.open_path
    }

    pub fn markers_match(&self) -> bool {
        self.open_path == self.close_path
    }
}

/// Join path components with `/` regardless of the host separator
pub fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slash_path_joins_components() {
        let path: PathBuf = ["src", "core", "mod.rs"].iter().collect();
        assert_eq!(slash_path(&path), "src/core/mod.rs");
    }

    #[test]
    fn test_file_entry_slash_path() {
        let entry = FileEntry::new(Path::new("a").join("b.txt"), "x\n");
        assert_eq!(entry.slash_path(), "a/b.txt");
    }

    #[test]
    fn test_parsed_block_markers() {
        let block = ParsedBlock::new("x.txt", "hello\n");
        assert!(block.markers_match());
        assert_eq!(block.path(), "x.txt");

        let mismatched = ParsedBlock {
            open_path: "a.txt".to_string(),
            content: String::new(),
            close_path: "b.txt".to_string(),
        };
        assert!(!mismatched.markers_match());
    }
}
