//! Color handling for terminal output.
//!
//! Whether to color is decided once in `main` and carried around as a [`Style`]
//! value; nothing here consults global state. A disabled style returns the text
//! untouched, so the same formatting code serves terminals, pipes and tests.
//!
//! # Public API
//! - [`Style`]: Enabled/disabled switch with one method per color role
//!
//! # Color Scheme
//! - **Added / additions**: Green
//! - **Modified**: Yellow
//! - **Removals / errors**: Red
//! - **Hunk headers**: Cyan
//! - **Unchanged**: Dimmed

use crate::core::change_status::ChangeStatus;
use crate::core::diagnostics::Severity;
use colored::{ColoredString, Colorize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    enabled: bool,
}

impl Style {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// A style that never emits escape codes
    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn paint(&self, text: &str, color: impl FnOnce(&str) -> ColoredString) -> String {
        if self.enabled {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn red(&self, text: &str) -> String {
        self.paint(text, |t| t.red())
    }

    pub fn green(&self, text: &str) -> String {
        self.paint(text, |t| t.green())
    }

    pub fn yellow(&self, text: &str) -> String {
        self.paint(text, |t| t.yellow())
    }

    pub fn cyan(&self, text: &str) -> String {
        self.paint(text, |t| t.cyan())
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(text, |t| t.bold())
    }

    pub fn dimmed(&self, text: &str) -> String {
        self.paint(text, |t| t.bright_black())
    }

    /// Color a line according to a change's status
    pub fn status(&self, status: ChangeStatus, text: &str) -> String {
        match status {
            ChangeStatus::Added => self.green(text),
            ChangeStatus::Modified => self.yellow(text),
            ChangeStatus::Unchanged => self.dimmed(text),
        }
    }

    /// Color a diagnostic line according to its severity
    pub fn severity(&self, severity: Severity, text: &str) -> String {
        match severity {
            Severity::Notice | Severity::Warning => self.yellow(text),
            Severity::Error => self.red(text),
        }
    }

    /// Color one line of a unified diff
    pub fn diff_line(&self, line: &str) -> String {
        if line.starts_with("+++") || line.starts_with("---") {
            self.bold(line)
        } else if line.starts_with('+') {
            self.green(line)
        } else if line.starts_with('-') {
            self.red(line)
        } else if line.starts_with("@@") {
            self.cyan(line)
        } else {
            line.to_string()
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::plain()
    }
}
