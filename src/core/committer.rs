//! Atomic application of planned changes.
//!
//! Each file is written to a `.tmp_*` sibling and renamed over the target, so
//! a reader never observes a half-written file. A failure on one file removes
//! its temporary file and the batch moves on to the next change.

use crate::core::diagnostics::{Diagnostic, DiagnosticKind, Outcome};
use crate::core::planner::Change;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const TEMP_PREFIX: &str = ".tmp_";

/// Write every actionable change. Items are the paths written, in order.
pub fn commit_changes(changes: &[Change]) -> Outcome<PathBuf> {
    let mut outcome = Outcome::new();

    for change in changes.iter().filter(|c| c.status.is_actionable()) {
        match write_atomic(&change.target, &change.new_content) {
            Ok(()) => {
                log::debug!("Wrote {}", change.target.display());
                outcome.push(change.target.clone());
            }
            Err(e) => {
                log::warn!("Failed to write {}: {e}", change.target.display());
                outcome.report(Diagnostic::new(
                    change.rel_path.as_str(),
                    DiagnosticKind::WriteFailed {
                        reason: e.to_string(),
                    },
                ));
            }
        }
    }

    outcome
}

/// Replace `path` with `content` through a temporary file in the same directory
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)?;

    // Dropping the NamedTempFile on any early return deletes it
    let mut tmp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .tempfile_in(&dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    carry_permissions(path, &tmp)?;

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Keep the target's mode; new files get the usual 0644 instead of tempfile's 0600
fn carry_permissions(path: &Path, tmp: &NamedTempFile) -> io::Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => fs::set_permissions(tmp.path(), meta.permissions()),
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => set_default_permissions(tmp.path()),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn set_default_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}
