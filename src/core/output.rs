//! Unified output formatting utilities for consistent CLI presentation.
//!
//! Every human-facing line goes to stderr so that `bundle --stdout` produces
//! nothing but the bundle on stdout.
//!
//! # Design Principles
//! - **Injected styling**: Every function takes the [`Style`] chosen in `main`
//! - **Consistent prefixes**: `✕ Error:` in red, `✓` in green, warnings in yellow
//! - **Formatting separate from printing**: `format_*` helpers are plain functions

use crate::core::colors::Style;
use crate::core::diagnostics::Diagnostic;

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(style: Style, message: &str) {
    eprintln!("\n{} {}\n", style.red("✕ Error:"), message);
}

/// Prints a warning in yellow, preceded by a blank line
pub fn print_warning(style: Style, message: &str) {
    eprintln!("\n{}", style.yellow(message));
}

/// Formats and prints a success message with consistent styling
///
/// # Format
/// ```text
/// ✓ <message>
/// ```
pub fn print_success(style: Style, message: &str) {
    eprintln!("{} {}", style.green("✓"), message);
}

/// Prints a plain informational line
pub fn print_info(message: &str) {
    eprintln!("{message}");
}

/// Prints a bold header, preceded by a blank line
pub fn print_section_header(style: Style, header: &str) {
    eprintln!("\n{}", style.bold(&format!("{header}:")));
}

/// One diagnostic line, indented and colored by severity
pub fn format_diagnostic(style: Style, diagnostic: &Diagnostic) -> String {
    style.severity(diagnostic.severity(), &format!("  {diagnostic}"))
}

/// Prints every diagnostic on its own line
pub fn print_diagnostics(style: Style, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{}", format_diagnostic(style, diagnostic));
    }
}
