//! Project directory management and command setup utilities
//!
//! Provides functions for creating temporary projects, reading and writing
//! files inside them, and building a `ctxpack` invocation that is isolated
//! from the user's own configuration.

#![allow(dead_code)]

use assert_cmd::Command;
use ctxpack::core::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Name of the project directory inside every test sandbox
pub const PROJECT_NAME: &str = "demo";

/// Test sandbox holding a project directory and a scratch directory.
/// The TempDir must be kept alive for the duration of the test.
pub struct TestProject {
    pub temp_dir: TempDir,
    /// The project root, `<sandbox>/demo`
    pub path: PathBuf,
    /// Working directory for commands, outside the project
    pub scratch: PathBuf,
}

impl TestProject {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute path of `rel` inside the project
    pub fn file(&self, rel: &str) -> PathBuf {
        self.path.join(rel)
    }

    pub fn read(&self, rel: &str) -> Result<String> {
        read_file(&self.path, rel)
    }

    /// A `ctxpack` command running in the scratch directory
    pub fn command(&self) -> anyhow::Result<Command> {
        let mut cmd = ctxpack_command()?;
        cmd.current_dir(&self.scratch)
            .env("CTXPACK_CONFIG", self.scratch.join("no-config.json"));
        Ok(cmd)
    }
}

/// Sets up an empty project with a sibling scratch directory
pub fn setup_test_project() -> Result<TestProject> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join(PROJECT_NAME);
    let scratch = temp_dir.path().join("scratch");
    fs::create_dir(&path)?;
    fs::create_dir(&scratch)?;

    Ok(TestProject {
        temp_dir,
        path,
        scratch,
    })
}

/// The binary with colors and logging noise turned off
pub fn ctxpack_command() -> anyhow::Result<Command> {
    let mut cmd = Command::cargo_bin("ctxpack")?;
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    Ok(cmd)
}

/// Creates `rel` under `root`, including missing parent directories
pub fn create_file(root: &Path, rel: &str, content: &str) -> Result<()> {
    create_file_bytes(root, rel, content.as_bytes())
}

pub fn create_file_bytes(root: &Path, rel: &str, content: &[u8]) -> Result<()> {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

pub fn read_file(root: &Path, rel: &str) -> Result<String> {
    Ok(fs::read_to_string(root.join(rel))?)
}

/// Names of leftover `.tmp_*` files directly inside `dir`
pub fn temp_files_in(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if name.starts_with(".tmp_") {
            names.push(name);
        }
    }
    Ok(names)
}
