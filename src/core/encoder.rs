//! Bundle text encoding.
//!
//! The bundle is the wire format shared with [`block_parser`](crate::core::block_parser):
//! a header with instructions, the file tree, then one delimited block per file.
//!
//! ````text
//! ===== FILE: src/main.rs =====
//! ```rs
//! fn main() {}
//! ```
//! ===== END FILE: src/main.rs =====
//! ````
//!
//! The example inside the instructions is indented so that it never parses as
//! a real block.

use crate::core::state::FileEntry;
use crate::core::tree_render::{human_size, render_tree};
use std::path::Path;

pub const FILE_MARKER_OPEN: &str = "===== FILE:";
pub const FILE_MARKER_CLOSE: &str = "===== END FILE:";
pub const MARKER_SUFFIX: &str = "=====";

const INSTRUCTIONS: &str = "\
When you respond with modified files, use EXACTLY this format for each file:

  ===== FILE: path/to/file.ext =====
  ```
  <full file contents>
  ```
  ===== END FILE: path/to/file.ext =====

IMPORTANT: Always wrap the file contents in ``` code fences as shown above.
Only include files you have changed. Do not include unchanged files.
===== END INSTRUCTIONS =====";

/// Sum of the UTF-8 byte lengths of all contents
pub fn total_content_size(files: &[FileEntry]) -> u64 {
    files.iter().map(|f| f.content.len() as u64).sum()
}

/// Header block: project name, counts and the reply instructions
pub fn render_header(project_name: &str, files: &[FileEntry]) -> String {
    format!(
        "===== PROJECT BUNDLE =====\nProject: {project_name}\nFiles: {}\nTotal size: {}\n\n{INSTRUCTIONS}",
        files.len(),
        human_size(total_content_size(files)),
    )
}

/// One delimited block. Content is given exactly one trailing newline when it has none.
pub fn render_block(entry: &FileEntry) -> String {
    let path = entry.slash_path();
    let ext = Path::new(&path)
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut block = String::with_capacity(entry.content.len() + 2 * path.len() + 64);
    block.push_str(&format!("{FILE_MARKER_OPEN} {path} {MARKER_SUFFIX}\n"));
    block.push_str(&format!("```{ext}\n"));
    // Exactly one trailing newline, whatever the file had
    block.push_str(entry.content.trim_end_matches('\n'));
    block.push('\n');
    block.push_str("```\n");
    block.push_str(&format!("{FILE_MARKER_CLOSE} {path} {MARKER_SUFFIX}"));
    block
}

/// Full bundle text for `files`, in the given order
pub fn render_bundle(project_name: &str, files: &[FileEntry]) -> String {
    let mut sections = vec![
        render_header(project_name, files),
        format!("===== TREE =====\n{}\n===== END TREE =====", render_tree(files)),
    ];
    sections.extend(files.iter().map(render_block));

    let mut bundle = sections.join("\n\n");
    bundle.push('\n');
    bundle
}
