//! Type-safe classification of a planned file change.
//!
//! This module defines [`ChangeStatus`], the outcome of comparing a parsed block
//! against the file currently on disk.
//!
//! # Public API
//! - [`ChangeStatus`]: Added, modified or unchanged
//!
//! # Key Features
//! - **Summary tags**: `[A]`, `[M]`, `[=]` for the change summary
//! - **Actionability**: only added and modified files are written

use std::fmt;

/// How a parsed block relates to the file on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeStatus {
    /// Target file does not exist yet (A)
    Added,
    /// Target file exists with different content (M)
    Modified,
    /// Target file already holds exactly the new content (=)
    Unchanged,
}

impl ChangeStatus {
    /// Get the summary tag shown in front of each path
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeStatus::Added => "[A]",
            ChangeStatus::Modified => "[M]",
            ChangeStatus::Unchanged => "[=]",
        }
    }

    /// Get human-readable description for status
    pub fn description(&self) -> &'static str {
        match self {
            ChangeStatus::Added => "new file",
            ChangeStatus::Modified => "modified",
            ChangeStatus::Unchanged => "unchanged",
        }
    }

    /// Whether committing this change touches the filesystem
    pub fn is_actionable(&self) -> bool {
        !matches!(self, ChangeStatus::Unchanged)
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
