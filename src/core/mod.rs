//! Core functionality for the ctxpack tool.
//!
//! This module provides the building blocks of both pipelines: the directory
//! walk and bundle encoding on one side, block parsing, change planning and
//! atomic commits on the other, plus error handling and terminal output.

pub mod block_parser;
pub mod change_status;
pub mod clipboard;
pub mod colors;
pub mod committer;
pub mod config;
pub mod diagnostics;
pub mod dirs;
pub mod encoder;
pub mod error;
pub mod output;
pub mod path_guard;
pub mod planner;
pub mod state;
pub mod tree_filter;
pub mod tree_render;

// === Error handling ===
// Fatal errors and the result type used throughout the application
pub use error::{CtxPackError, Result};

// === Recoverable problems ===
// Items plus diagnostics for every stage that drops and warns
pub use diagnostics::{Diagnostic, DiagnosticKind, Outcome, Severity};

// === Data model ===
pub use change_status::ChangeStatus;
pub use planner::Change;
pub use state::{FileEntry, ParsedBlock, SkipRecord};

// === Bundle pipeline ===
// Walk, filter, render and encode a project tree
pub use encoder::render_bundle;
pub use tree_filter::{collect, ExtensionPolicy, FilterConfig};
pub use tree_render::{human_size, render_tree};

// === Apply pipeline ===
// Parse returned text, validate paths, diff and commit
pub use block_parser::parse_blocks;
pub use committer::{commit_changes, write_atomic};
pub use path_guard::{validate, PathRejection};
pub use planner::plan_changes;

// === External collaborators ===
pub use clipboard::{Clipboard, SystemClipboard};
pub use config::Settings;

// === Output formatting ===
// Injected color style and stderr printing helpers
pub use colors::Style;
pub use output::{
    print_diagnostics, print_error, print_info, print_section_header, print_success,
    print_warning,
};
