//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`CtxPackError`], the fatal error type for both the
//! `bundle` and `apply` pipelines. Recoverable problems (a single bad block, a
//! single unreadable file) are not errors: they travel as
//! [`Diagnostic`](crate::core::diagnostics::Diagnostic) values instead.
//!
//! # Public API
//! - [`CtxPackError`]: Main error enum covering all fatal failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, CtxPackError>`
//!
//! # Error Categories
//! - **Input**: Invalid project directory, unreadable or empty source text
//! - **Pipeline**: Nothing collected, nothing parsed, nothing valid to apply
//! - **Clipboard**: Helper missing or failing
//! - **Configuration**: Malformed settings file
//! - **Cancellation**: Declined or interrupted confirmation

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for ctxpack
#[derive(Error, Debug)]
pub enum CtxPackError {
    // Input errors
    #[error("'{path}' is not a directory.")]
    NotADirectory { path: PathBuf },

    #[error("Failed to read '{path}': {source}")]
    InputRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Pipeline errors
    #[error("No files found to bundle.")]
    NoFilesCollected,

    #[error("No file blocks found in the input.\nMake sure the response used the ===== FILE: ... ===== format.")]
    NoBlocksFound,

    #[error("No valid changes to apply.")]
    NoValidChanges,

    // Clipboard errors
    #[error("Clipboard is empty or unreadable.")]
    ClipboardEmpty,

    #[error("Clipboard is not available: {reason}")]
    ClipboardUnavailable { reason: String },

    #[error("Failed to copy to clipboard: {reason}")]
    ClipboardWriteFailed { reason: String },

    // Configuration errors
    #[error("Could not determine the configuration directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Config file '{path}' sets both include_extensions and exclude_extensions; use one")]
    ConflictingExtensionRules { path: PathBuf },

    // Cancellation
    #[error("Aborted.")]
    Aborted,
}

/// Convenience type alias for Results using CtxPackError
pub type Result<T> = std::result::Result<T, CtxPackError>;

impl CtxPackError {
    /// Create a not-a-directory error
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory { path: path.into() }
    }

    /// Create an input read error
    pub fn input_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::InputRead {
            path: path.into(),
            source,
        }
    }

    /// Create an output write error
    pub fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputWrite {
            path: path.into(),
            source,
        }
    }

    /// Create a clipboard unavailable error
    pub fn clipboard_unavailable(reason: impl Into<String>) -> Self {
        Self::ClipboardUnavailable {
            reason: reason.into(),
        }
    }

    /// Create a clipboard write failed error
    pub fn clipboard_write_failed(reason: impl Into<String>) -> Self {
        Self::ClipboardWriteFailed {
            reason: reason.into(),
        }
    }

    /// Create a config parse failed error
    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a conflicting extension rules error
    pub fn conflicting_extension_rules(path: impl Into<PathBuf>) -> Self {
        Self::ConflictingExtensionRules { path: path.into() }
    }
}
