//! Validation of returned file paths against the project root.
//!
//! Every path that comes out of the parser is untrusted text. [`validate`]
//! turns it into an absolute path under the project root or explains why it
//! cannot. Normalization is purely lexical; the filesystem is never consulted,
//! so paths to files that do not exist yet validate the same way as existing ones.

use crate::core::diagnostics::DiagnosticKind;
use std::fmt;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRejection {
    /// Absolute path, root-relative path or drive prefix
    Absolute,
    /// A `..` segment climbs above the project root
    Traversal,
    /// Normalizes to nothing, i.e. the root directory itself
    Empty,
    /// Joined path does not stay under the root
    OutsideRoot,
}

impl fmt::Display for PathRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            PathRejection::Absolute => "absolute path",
            PathRejection::Traversal => "path traversal",
            PathRejection::Empty => "empty path",
            PathRejection::OutsideRoot => "outside project root",
        };
        f.write_str(reason)
    }
}

impl From<PathRejection> for DiagnosticKind {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::Absolute => DiagnosticKind::AbsolutePath,
            PathRejection::Traversal => DiagnosticKind::PathTraversal,
            PathRejection::Empty => DiagnosticKind::EmptyPath,
            PathRejection::OutsideRoot => DiagnosticKind::OutsideRoot,
        }
    }
}

/// Resolve `rel_path` under `project_root`.
///
/// `project_root` is expected to be absolute (callers canonicalize it once).
pub fn validate(rel_path: &str, project_root: &Path) -> Result<PathBuf, PathRejection> {
    let candidate = Path::new(rel_path);
    if candidate.is_absolute() || candidate.has_root() {
        return Err(PathRejection::Absolute);
    }

    let normalized = normalize(candidate)?;
    if normalized.as_os_str().is_empty() {
        return Err(PathRejection::Empty);
    }

    let resolved = project_root.join(&normalized);
    if resolved != project_root && !resolved.starts_with(project_root) {
        return Err(PathRejection::OutsideRoot);
    }

    Ok(resolved)
}

/// Collapse `.` and `..` segments without touching the filesystem
fn normalize(path: &Path) -> Result<PathBuf, PathRejection> {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    return Err(PathRejection::Traversal);
                }
            }
            Component::Normal(segment) => normalized.push(segment),
            Component::RootDir | Component::Prefix(_) => return Err(PathRejection::Absolute),
        }
    }
    Ok(normalized)
}
