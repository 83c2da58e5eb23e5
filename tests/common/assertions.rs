//! Common assertion helpers for test output validation
//!
//! Provides predicates for the messages `ctxpack` prints on stderr.

#![allow(dead_code)]

use predicates::prelude::*;

/// A change summary line such as `[M] x.txt  (+1, -1 lines)`
pub fn has_summary(tag: &str, path: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("{tag} {path}  ("))
}

pub fn wrote(path: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("Wrote {path}"))
}

pub fn applied(count: usize) -> impl Predicate<str> {
    predicates::str::contains(format!("Applied {count} file(s)."))
}

pub fn rejected(path: &str, reason: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("Rejected '{path}': {reason}"))
}

pub fn aborted() -> impl Predicate<str> {
    predicates::str::contains("Aborted.")
}

pub fn nothing_to_do() -> impl Predicate<str> {
    predicates::str::contains("All files are unchanged. Nothing to do.")
}

pub fn dry_run_notice() -> impl Predicate<str> {
    predicates::str::contains("Dry run, no files were modified.")
}

pub fn bundled(count: usize) -> impl Predicate<str> {
    predicates::str::contains(format!("Bundled {count} files ("))
}

pub fn skipped(path: &str, reason: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("  {path} ({reason})"))
}

pub fn has_block(path: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("===== FILE: {path} ====="))
}
