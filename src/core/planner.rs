//! Turning parsed blocks into reviewable changes.
//!
//! [`plan_changes`] validates each block's path, compares the new content with
//! what is on disk and produces one [`Change`] per accepted block, in input
//! order. Nothing is written here; the plan is what the user reviews and what
//! [`commit_changes`](crate::core::committer::commit_changes) later consumes.

use crate::core::change_status::ChangeStatus;
use crate::core::diagnostics::{Diagnostic, DiagnosticKind, Outcome};
use crate::core::path_guard;
use crate::core::state::ParsedBlock;
use similar::TextDiff;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const DIFF_CONTEXT_LINES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    /// Path exactly as given in the block
    pub rel_path: String,
    pub status: ChangeStatus,
    /// `+` lines for added files, unified diff for modified ones, empty otherwise
    pub diff_lines: Vec<String>,
    pub new_content: String,
    /// Validated absolute path under the project root
    pub target: PathBuf,
}

impl Change {
    /// Number of added and removed lines
    pub fn line_counts(&self) -> (usize, usize) {
        match self.status {
            ChangeStatus::Added => (self.diff_lines.len(), 0),
            ChangeStatus::Unchanged => (0, 0),
            ChangeStatus::Modified => {
                // Skip the `---`/`+++` header pair; everything after is hunk content
                let body = self.diff_lines.iter().skip(2);
                body.fold((0, 0), |(added, removed), line| {
                    if line.starts_with('+') {
                        (added + 1, removed)
                    } else if line.starts_with('-') {
                        (added, removed + 1)
                    } else {
                        (added, removed)
                    }
                })
            }
        }
    }
}

/// Plan one change per valid block, preserving block order
pub fn plan_changes(blocks: &[ParsedBlock], project_root: &Path) -> Outcome<Change> {
    let mut outcome = Outcome::new();

    for block in blocks {
        let rel_path = block.path();
        let target = match path_guard::validate(rel_path, project_root) {
            Ok(target) => target,
            Err(rejection) => {
                log::debug!("Rejected block path {rel_path:?}: {rejection}");
                outcome.report(Diagnostic::new(rel_path, rejection.into()));
                continue;
            }
        };

        let existing = match fs::read(&target) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                outcome.report(Diagnostic::new(
                    rel_path,
                    DiagnosticKind::ReadFailed {
                        reason: e.to_string(),
                    },
                ));
                continue;
            }
        };

        let (status, diff_lines) = match existing {
            None => (ChangeStatus::Added, added_lines(&block.content)),
            Some(bytes) if bytes == block.content.as_bytes() => (ChangeStatus::Unchanged, Vec::new()),
            Some(bytes) => {
                let old = String::from_utf8_lossy(&bytes);
                (
                    ChangeStatus::Modified,
                    unified_diff(rel_path, &old, &block.content),
                )
            }
        };

        outcome.push(Change {
            rel_path: rel_path.to_string(),
            status,
            diff_lines,
            new_content: block.content.clone(),
            target,
        });
    }

    outcome
}

/// Unified diff between `old` and `new`, one entry per output line
pub fn unified_diff(rel_path: &str, old: &str, new: &str) -> Vec<String> {
    let diff = TextDiff::from_lines(old, new);
    diff.unified_diff()
        .context_radius(DIFF_CONTEXT_LINES)
        .header(&format!("a/{rel_path}"), &format!("b/{rel_path}"))
        .to_string()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Every line of a new file as an addition
pub fn added_lines(content: &str) -> Vec<String> {
    content.lines().map(|line| format!("+{line}")).collect()
}
