//! ctxpack - Bundle a project into one text artifact and apply edited files back.
//!
//! `bundle` walks a project, filters it down to the files worth sharing and
//! encodes them as delimited blocks. `apply` parses returned text for the same
//! blocks, shows a reviewable diff and commits the accepted files atomically,
//! never writing outside the project root.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - Directory collection and bundle encoding
//! - Block parsing with a fallback grammar
//! - Path validation, change planning and atomic commits
//! - Error handling and result types
//! - Clipboard access and terminal styling

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    collect,
    commit_changes,
    parse_blocks,
    plan_changes,
    render_bundle,
    validate,
    write_atomic,

    Change,
    ChangeStatus,
    Clipboard,
    // Error handling
    CtxPackError,
    Diagnostic,
    DiagnosticKind,
    ExtensionPolicy,
    // Data model
    FileEntry,
    FilterConfig,
    Outcome,
    ParsedBlock,
    PathRejection,
    Result,
    Settings,
    SkipRecord,
    // UI and formatting
    Style,
    SystemClipboard,
};
