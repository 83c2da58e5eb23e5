//! Recovery of file blocks from free-form assistant replies.
//!
//! # Primary grammar
//! ````text
//! ===== FILE: src/lib.rs =====
//! ```rust
//! pub fn answer() -> u32 { 42 }
//! ```
//! ===== END FILE: src/lib.rs =====
//! ````
//! Markers start at column 0 and tolerate extra spaces around their tokens.
//! Only the fenced interior is kept when a fence is present, which strips any
//! prose the assistant put inside the block. An opening marker pairs with the
//! next closing marker naming the same path, so marker lines quoted inside a
//! file's content stay part of it. A block with no closing marker of its own
//! is dropped.
//!
//! # Fallback grammar
//! Used only when the primary grammar yields nothing: an inline code span with
//! a filename, then a fenced block on the following line.
//! ````text
//! `src/lib.rs`
//! ```rust
//! pub fn answer() -> u32 { 42 }
//! ```
//! ````

use crate::core::diagnostics::{Diagnostic, DiagnosticKind, Outcome};
use crate::core::state::ParsedBlock;
use regex::Regex;
use std::sync::OnceLock;

fn open_marker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?m)^=====[ \t]*FILE:[ \t]*([^\n]*?)[ \t]*=====[ \t]*$")
            .expect("open marker pattern is valid")
    })
}

fn close_marker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?m)^=====[ \t]*END FILE:[ \t]*([^\n]*?)[ \t]*=====[ \t]*$")
            .expect("close marker pattern is valid")
    })
}

fn fallback_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)`([^`\n]+\.\w+)`:?[ \t]*\n\s*```[^\s`]*\n(.*?)\n```")
            .expect("fallback pattern is valid")
    })
}

/// Parse every file block in `text`, in document order
pub fn parse_blocks(text: &str) -> Outcome<ParsedBlock> {
    let text = normalize_line_endings(text);
    let mut outcome = Outcome::new();

    for block in scan_primary(&text) {
        if block.markers_match() {
            outcome.push(block);
        } else {
            outcome.report(Diagnostic::new(
                block.open_path,
                DiagnosticKind::MismatchedMarkers {
                    close_path: block.close_path,
                },
            ));
        }
    }

    if !outcome.is_empty() {
        log::debug!("Primary grammar produced {} block(s)", outcome.len());
        return outcome;
    }

    outcome.report(Diagnostic::new("", DiagnosticKind::FallbackGrammar));
    for block in scan_fallback(&text) {
        outcome.push(block);
    }
    log::debug!("Fallback grammar produced {} block(s)", outcome.len());
    outcome
}

/// All primary-grammar blocks, matched or not, with their content already cleaned
fn scan_primary(text: &str) -> Vec<ParsedBlock> {
    let mut blocks = Vec::new();
    let mut pos = 0;

    while let Some(open) = open_marker_pattern().captures_at(text, pos) {
        let Some(marker) = open.get(0) else {
            break;
        };
        let open_path = open[1].trim().to_string();
        let body_start = if text[marker.end()..].starts_with('\n') {
            marker.end() + 1
        } else {
            marker.end()
        };
        let body = &text[body_start..];

        // Marker lines for other files may appear inside the content itself
        // (a format doc, an older bundle); only the closing marker that names
        // this block's path ends it.
        let mut first_close = None;
        let mut own_close = None;
        for close in close_marker_pattern().captures_iter(body) {
            let close_path = close[1].trim();
            if close_path == open_path {
                own_close = close.get(0);
                break;
            }
            first_close.get_or_insert_with(|| close_path.to_string());
        }

        match (own_close, first_close) {
            (Some(close), _) => {
                blocks.push(ParsedBlock {
                    content: clean_content(&body[..close.start()]),
                    close_path: open_path.clone(),
                    open_path,
                });
                pos = body_start + close.end();
            }
            (None, Some(close_path)) => {
                // A block that never got its own closing marker; resume right
                // after its opening line so the blocks that follow survive.
                blocks.push(ParsedBlock {
                    open_path,
                    content: String::new(),
                    close_path,
                });
                pos = marker.end();
            }
            (None, None) => {
                log::debug!("Opening marker for {open_path} has no closing marker");
                pos = marker.end();
            }
        }
    }

    blocks
}

fn scan_fallback(text: &str) -> Vec<ParsedBlock> {
    fallback_pattern()
        .captures_iter(text)
        .map(|caps| {
            let mut content = caps[2].to_string();
            content.push('\n');
            ParsedBlock::new(caps[1].trim(), content)
        })
        .collect()
}

fn clean_content(raw: &str) -> String {
    let mut content = match fenced_interior(raw) {
        Some(interior) => interior.to_string(),
        None => raw.strip_prefix('\n').unwrap_or(raw).to_string(),
    };

    if content.ends_with("\n\n") {
        content.pop();
    }
    content
}

/// Text between the first opening fence and the last bare closing fence.
///
/// Taking the last closing fence keeps nested fences (a markdown file with
/// code samples) intact.
fn fenced_interior(raw: &str) -> Option<&str> {
    let mut offset = 0;
    let mut start = None;
    let mut end = None;

    for line in raw.split_inclusive('\n') {
        let trimmed = line.trim_end();
        match start {
            None if is_opening_fence(trimmed) => start = Some(offset + line.len()),
            Some(_) if trimmed == "```" => end = Some(offset),
            _ => {}
        }
        offset += line.len();
    }

    match (start, end) {
        (Some(start), Some(end)) => Some(&raw[start..end]),
        _ => None,
    }
}

fn is_opening_fence(line: &str) -> bool {
    line.strip_prefix("```")
        .is_some_and(|tag| !tag.contains('`') && !tag.contains(char::is_whitespace))
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(outcome: &Outcome<ParsedBlock>) -> Vec<(&str, &str)> {
        outcome
            .items
            .iter()
            .map(|b| (b.path(), b.content.as_str()))
            .collect()
    }

    #[test]
    fn test_single_fenced_block() {
        let text = "===== FILE: x.txt =====\n```\nhello world\n```\n===== END FILE: x.txt =====\n";
        let outcome = parse_blocks(text);
        assert_eq!(pairs(&outcome), vec![("x.txt", "hello world\n")]);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_prose_around_blocks_is_ignored() {
        let text = "\
Sure! Here are the updated files.

===== FILE: src/a.py =====
```python
print('a')
```
===== END FILE: src/a.py =====

And a second one:

===== FILE: src/b.py =====
```python
print('b')
```
===== END FILE: src/b.py =====

Let me know if you need anything else.";
        let outcome = parse_blocks(text);
        assert_eq!(
            pairs(&outcome),
            vec![("src/a.py", "print('a')\n"), ("src/b.py", "print('b')\n")]
        );
    }

    #[test]
    fn test_commentary_inside_block_is_stripped() {
        let text = "\
===== FILE: a.rs =====
Here is the new version:
```rust
fn main() {}
```
This compiles now.
===== END FILE: a.rs =====";
        let outcome = parse_blocks(text);
        assert_eq!(pairs(&outcome), vec![("a.rs", "fn main() {}\n")]);
    }

    #[test]
    fn test_nested_fences_survive() {
        let text = "\
===== FILE: README.md =====
```md
# Usage

```bash
cargo run
```
```
===== END FILE: README.md =====";
        let outcome = parse_blocks(text);
        assert_eq!(
            pairs(&outcome),
            vec![("README.md", "# Usage\n\n```bash\ncargo run\n```\n")]
        );
    }

    #[test]
    fn test_fence_after_commentary_keeps_commentary() {
        // The last bare fence wins, so a fenced snippet in trailing prose
        // pulls that prose into the content.
        let text = "\
===== FILE: notes.md =====
```md
# Notes
```
You can check it with:
```
cat notes.md
```
===== END FILE: notes.md =====";
        let outcome = parse_blocks(text);
        assert_eq!(
            pairs(&outcome),
            vec![(
                "notes.md",
                "# Notes\n```\nYou can check it with:\n```\ncat notes.md\n"
            )]
        );

        let plain = "===== FILE: notes.md =====\n```md\n# Notes\n```\n===== END FILE: notes.md =====";
        assert_eq!(pairs(&parse_blocks(plain)), vec![("notes.md", "# Notes\n")]);
    }

    #[test]
    fn test_marker_lines_inside_content_stay_in_block() {
        let text = "\
===== FILE: docs/format.md =====
```md
Blocks look like this:

===== FILE: a.txt =====
hello
===== END FILE: a.txt =====
```
===== END FILE: docs/format.md =====

===== FILE: b.txt =====
```
b
```
===== END FILE: b.txt =====
";
        let outcome = parse_blocks(text);
        assert_eq!(
            pairs(&outcome),
            vec![
                (
                    "docs/format.md",
                    "Blocks look like this:\n\n===== FILE: a.txt =====\nhello\n===== END FILE: a.txt =====\n"
                ),
                ("b.txt", "b\n"),
            ]
        );
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_opening_marker_without_any_close_is_ignored() {
        let text = "===== FILE: a.txt =====\n```\na\n```\n";
        let outcome = parse_blocks(text);
        assert!(outcome.is_empty());
        assert!(!outcome
            .diagnostics
            .iter()
            .any(|d| matches!(d.kind, DiagnosticKind::MismatchedMarkers { .. })));
    }

    #[test]
    fn test_unfenced_content_drops_one_leading_newline() {
        let text = "===== FILE: a.txt =====\n\nline one\nline two\n===== END FILE: a.txt =====";
        let outcome = parse_blocks(text);
        assert_eq!(pairs(&outcome), vec![("a.txt", "line one\nline two\n")]);
    }

    #[test]
    fn test_double_trailing_newline_collapsed() {
        let text = "===== FILE: a.txt =====\n```\nbody\n\n```\n===== END FILE: a.txt =====";
        let outcome = parse_blocks(text);
        assert_eq!(pairs(&outcome), vec![("a.txt", "body\n")]);
    }

    #[test]
    fn test_crlf_input_normalized() {
        let text = "===== FILE: a.txt =====\r\n```\r\none\r\ntwo\r\n```\r\n===== END FILE: a.txt =====\r\n";
        let outcome = parse_blocks(text);
        assert_eq!(pairs(&outcome), vec![("a.txt", "one\ntwo\n")]);
    }

    #[test]
    fn test_marker_whitespace_tolerated() {
        let text = "=====  FILE:   spaced.txt   =====  \n```\nok\n```\n=====END FILE:spaced.txt=====\n";
        let outcome = parse_blocks(text);
        assert_eq!(pairs(&outcome), vec![("spaced.txt", "ok\n")]);
    }

    #[test]
    fn test_indented_markers_are_not_blocks() {
        let text = "  ===== FILE: path/to/file.ext =====\n  ```\n  x\n  ```\n  ===== END FILE: path/to/file.ext =====\n";
        let outcome = parse_blocks(text);
        assert!(outcome.is_empty());
    }

    #[test]
    fn test_empty_fenced_content() {
        let text = "===== FILE: empty.txt =====\n```\n```\n===== END FILE: empty.txt =====";
        let outcome = parse_blocks(text);
        assert_eq!(pairs(&outcome), vec![("empty.txt", "")]);
    }

    #[test]
    fn test_mismatched_markers_dropped() {
        let text = "\
===== FILE: a.txt =====
```
a
```
===== END FILE: b.txt =====

===== FILE: c.txt =====
```
c
```
===== END FILE: c.txt =====";
        let outcome = parse_blocks(text);
        assert_eq!(pairs(&outcome), vec![("c.txt", "c\n")]);
        assert_eq!(
            outcome.diagnostics,
            vec![Diagnostic::new(
                "a.txt",
                DiagnosticKind::MismatchedMarkers {
                    close_path: "b.txt".to_string()
                }
            )]
        );
    }

    #[test]
    fn test_only_mismatched_block_yields_nothing() {
        let text = "===== FILE: a.txt =====\n```\na\n```\n===== END FILE: b.txt =====";
        let outcome = parse_blocks(text);
        assert!(outcome.is_empty());
        assert!(outcome
            .diagnostics
            .iter()
            .any(|d| matches!(d.kind, DiagnosticKind::MismatchedMarkers { .. })));
    }

    #[test]
    fn test_truncated_block_does_not_swallow_the_next_one() {
        let text = "\
===== FILE: a.txt =====
```
a is cut off here

===== FILE: b.txt =====
```
b
```
===== END FILE: b.txt =====";
        let outcome = parse_blocks(text);
        assert_eq!(pairs(&outcome), vec![("b.txt", "b\n")]);
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(outcome.diagnostics[0].subject, "a.txt");
    }

    #[test]
    fn test_fallback_grammar() {
        let text = "\
I changed one file:

`src/app.py`
```python
print('hi')
```
";
        let outcome = parse_blocks(text);
        assert_eq!(pairs(&outcome), vec![("src/app.py", "print('hi')\n")]);
        assert_eq!(outcome.diagnostics[0].kind, DiagnosticKind::FallbackGrammar);
    }

    #[test]
    fn test_fallback_keeps_document_order() {
        let text = "`b.rs`:\n```rust\nb\n```\n\nthen\n\n`a.rs`\n```\na\n```\n";
        let outcome = parse_blocks(text);
        assert_eq!(pairs(&outcome), vec![("b.rs", "b\n"), ("a.rs", "a\n")]);
    }

    #[test]
    fn test_fallback_suppressed_when_primary_matches() {
        let text = "\
===== FILE: a.txt =====
```
a
```
===== END FILE: a.txt =====

`b.txt`
```
b
```
";
        let outcome = parse_blocks(text);
        assert_eq!(pairs(&outcome), vec![("a.txt", "a\n")]);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_no_blocks_at_all() {
        let outcome = parse_blocks("Sorry, I cannot help with that.");
        assert!(outcome.is_empty());
        assert_eq!(outcome.diagnostics.len(), 1);
    }
}
