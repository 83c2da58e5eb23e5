//! Accumulating results for the drop-and-warn stages of the pipeline.
//!
//! Every stage that can lose a single item without failing the batch (parsing,
//! planning, committing) returns an [`Outcome`]: the items that made it through
//! plus the [`Diagnostic`]s explaining what was dropped. Commands decide how to
//! print them; the stages themselves never write to the terminal.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Notice,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Open and close markers name different files
    MismatchedMarkers { close_path: String },
    /// The strict grammar found nothing, the heuristic one was used
    FallbackGrammar,
    AbsolutePath,
    PathTraversal,
    OutsideRoot,
    EmptyPath,
    ReadFailed { reason: String },
    WriteFailed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Path (or other input) the diagnostic is about
    pub subject: String,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(subject: impl Into<String>, kind: DiagnosticKind) -> Self {
        Self {
            subject: subject.into(),
            kind,
        }
    }

    pub fn severity(&self) -> Severity {
        match self.kind {
            DiagnosticKind::FallbackGrammar => Severity::Notice,
            DiagnosticKind::MismatchedMarkers { .. } => Severity::Warning,
            DiagnosticKind::AbsolutePath
            | DiagnosticKind::PathTraversal
            | DiagnosticKind::OutsideRoot
            | DiagnosticKind::EmptyPath
            | DiagnosticKind::ReadFailed { .. }
            | DiagnosticKind::WriteFailed { .. } => Severity::Error,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::MismatchedMarkers { close_path } => write!(
                f,
                "Warning: mismatched markers: '{}' vs '{}', skipping",
                self.subject, close_path
            ),
            DiagnosticKind::FallbackGrammar => write!(
                f,
                "No ===== FILE: ... ===== blocks found. Trying fallback (markdown code blocks)..."
            ),
            DiagnosticKind::AbsolutePath => {
                write!(f, "Rejected '{}': absolute path", self.subject)
            }
            DiagnosticKind::PathTraversal => {
                write!(f, "Rejected '{}': path traversal", self.subject)
            }
            DiagnosticKind::OutsideRoot => {
                write!(f, "Rejected '{}': outside project root", self.subject)
            }
            DiagnosticKind::EmptyPath => write!(f, "Rejected '{}': empty path", self.subject),
            DiagnosticKind::ReadFailed { reason } => {
                write!(f, "Cannot read '{}': {}", self.subject, reason)
            }
            DiagnosticKind::WriteFailed { reason } => {
                write!(f, "Error writing {}: {}", self.subject, reason)
            }
        }
    }
}

/// Successes of one stage together with what it dropped along the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T> {
    pub items: Vec<T>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Default for Outcome<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            diagnostics: Vec::new(),
        }
    }
}

impl<T> Outcome<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity() == Severity::Error)
    }
}
