//! Test data generation utilities and predefined scenarios
//!
//! Provides sample projects and assistant replies in the block format, so
//! every test starts from the same well-known state.

#![allow(dead_code)]

use super::project::*;
use ctxpack::core::error::Result;
use std::fs;
use std::path::PathBuf;

/// Markdown with its own code fence, the classic nested-fence case
pub const GUIDE_MD: &str = "# Guide\n\nRun it:\n\n```rust\nfn main() {}\n```\n";

/// Scenario: a small Rust project with files that must be skipped
pub fn create_sample_project() -> Result<TestProject> {
    let project = setup_test_project()?;
    let root = project.path().to_path_buf();

    create_file(&root, "README.md", "# Demo\n")?;
    create_file(&root, "src/main.rs", "fn main() {\n    println!(\"hi\");\n}\n")?;
    create_file(&root, "src/lib.rs", "pub fn answer() -> u32 {\n    42\n}\n")?;
    create_file(&root, "docs/guide.md", GUIDE_MD)?;

    // Never bundled
    create_file(&root, "Cargo.lock", "# generated\n")?;
    create_file(&root, "node_modules/pkg/index.js", "module.exports = 1;\n")?;
    create_file_bytes(&root, "logo.png", &[0x89, b'P', b'N', b'G', 0, 0, 0, 0])?;

    Ok(project)
}

/// Scenario: one file `x.txt` containing `hello\n`
pub fn create_hello_project() -> Result<TestProject> {
    let project = setup_test_project()?;
    create_file(project.path(), "x.txt", "hello\n")?;
    Ok(project)
}

/// One well-formed block as an assistant would send it
pub fn file_block(path: &str, content: &str) -> String {
    format!("===== FILE: {path} =====\n```\n{content}```\n===== END FILE: {path} =====\n")
}

/// Reply with some prose around the given blocks
pub fn reply(blocks: &[String]) -> String {
    format!(
        "Here are the updated files.\n\n{}\nLet me know if anything else is needed.\n",
        blocks.join("\n")
    )
}

/// Writes `text` to a reply file in the scratch directory
pub fn write_reply(project: &TestProject, text: &str) -> Result<PathBuf> {
    let path = project.scratch.join("reply.txt");
    fs::write(&path, text)?;
    Ok(path)
}
