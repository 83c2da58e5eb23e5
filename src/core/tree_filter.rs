//! Directory walk and file selection for bundling.
//!
//! [`collect`] walks a project root and returns the files worth sending to an
//! assistant, in a deterministic order, together with a [`SkipRecord`] for every
//! file it left out.
//!
//! # Ordering
//! Inside each directory files come first, then subdirectories, both sorted by
//! name. Two walks over an unchanged tree yield identical lists.
//!
//! # Rules (per file, first match wins)
//! 1. Excluded exact path (the bundle file being written)
//! 2. Excluded filename (`.DS_Store`, `Thumbs.db`, `--exclude-file`)
//! 3. Lockfile basename, excluded in every mode
//! 4. [`ExtensionPolicy`]: allow-list or deny-list, never both
//! 5. Size ceiling
//! 6. Binary sniff: a NUL byte within the first 8 KiB
//!
//! Unreadable files and directories become skip records; the walk never aborts.

use crate::core::state::{slash_path, FileEntry, SkipRecord};
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024;

const BINARY_SNIFF_LEN: u64 = 8192;

pub const EXCLUDED_DIRS: &[&str] = &[
    ".git",
    "__pycache__",
    ".venv",
    "venv",
    "env",
    "node_modules",
    ".mypy_cache",
    ".pytest_cache",
    ".tox",
    ".eggs",
    "dist",
    "build",
    ".idea",
    ".vscode",
    ".claude",
    ".ruff_cache",
    "target",
];

pub const EXCLUDED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

pub const LOCKFILES: &[&str] = &[
    "Cargo.lock",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "poetry.lock",
    "Pipfile.lock",
    "composer.lock",
    "Gemfile.lock",
    "uv.lock",
    "bun.lockb",
    "go.sum",
];

pub const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &[
    // images
    ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".ico", ".webp", ".tiff", ".psd",
    // documents and archives
    ".pdf", ".zip", ".tar", ".gz", ".tgz", ".bz2", ".xz", ".7z", ".rar",
    // compiled artifacts
    ".exe", ".dll", ".so", ".dylib", ".o", ".a", ".lib", ".class", ".jar", ".pyc", ".pyo",
    ".wasm", ".bin",
    // media and fonts
    ".mp3", ".mp4", ".wav", ".ogg", ".mov", ".avi", ".ttf", ".otf", ".woff", ".woff2",
    // data stores
    ".db", ".sqlite", ".sqlite3",
    ".lock",
];

/// How file extensions decide inclusion. Chosen once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionPolicy {
    /// Only these extensions (or exact dotfile names) are bundled
    AllowList(BTreeSet<String>),
    /// Everything except these extensions is bundled
    DenyList(BTreeSet<String>),
}

impl ExtensionPolicy {
    pub fn allow<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ExtensionPolicy::AllowList(
            extensions
                .into_iter()
                .map(|e| normalize_extension(e.as_ref()))
                .collect(),
        )
    }

    /// The default deny list extended with `extra`
    pub fn deny<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set: BTreeSet<String> = DEFAULT_EXCLUDED_EXTENSIONS
            .iter()
            .map(|e| e.to_string())
            .collect();
        set.extend(extra.into_iter().map(|e| normalize_extension(e.as_ref())));
        ExtensionPolicy::DenyList(set)
    }

    /// Pick the policy from command-line and settings lists.
    ///
    /// Command-line lists win over settings; within one source at most one of
    /// the two lists may be non-empty (callers enforce that).
    pub fn select(
        cli_include: &[String],
        cli_exclude: &[String],
        settings_include: &[String],
        settings_exclude: &[String],
    ) -> Self {
        if !cli_include.is_empty() {
            Self::allow(cli_include)
        } else if !cli_exclude.is_empty() {
            Self::deny(settings_exclude.iter().chain(cli_exclude))
        } else if !settings_include.is_empty() {
            Self::allow(settings_include)
        } else {
            Self::deny(settings_exclude)
        }
    }

    /// Reason for skipping `file_name`, if this policy rejects it
    fn rejects(&self, file_name: &str) -> Option<&'static str> {
        let lowered = file_name.to_lowercase();
        let ext = Path::new(&lowered)
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        match self {
            ExtensionPolicy::AllowList(allowed) => {
                if (!ext.is_empty() && allowed.contains(&ext)) || allowed.contains(&lowered) {
                    None
                } else {
                    Some("extension not included")
                }
            }
            ExtensionPolicy::DenyList(denied) => {
                if !ext.is_empty() && denied.contains(&ext) {
                    Some("excluded extension")
                } else {
                    None
                }
            }
        }
    }
}

impl Default for ExtensionPolicy {
    fn default() -> Self {
        Self::deny(std::iter::empty::<&str>())
    }
}

/// Lowercase and ensure a leading dot: `RS` becomes `.rs`
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Size ceiling in bytes
    pub max_file_size: u64,
    pub extra_excluded_dirs: BTreeSet<String>,
    pub extra_excluded_files: BTreeSet<String>,
    /// Exact paths relative to the root, such as the bundle being written
    pub excluded_paths: BTreeSet<PathBuf>,
    pub extensions: ExtensionPolicy,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            extra_excluded_dirs: BTreeSet::new(),
            extra_excluded_files: BTreeSet::new(),
            excluded_paths: BTreeSet::new(),
            extensions: ExtensionPolicy::default(),
        }
    }
}

impl FilterConfig {
    fn is_excluded_dir(&self, name: &OsStr) -> bool {
        let lossy = name.to_string_lossy();
        let name: &str = &lossy;
        EXCLUDED_DIRS.contains(&name) || self.extra_excluded_dirs.contains(name)
    }

    fn is_excluded_file(&self, name: &str) -> bool {
        EXCLUDED_FILES.contains(&name) || self.extra_excluded_files.contains(name)
    }
}

/// Walk `root` and select the files to bundle
pub fn collect(root: &Path, config: &FilterConfig) -> (Vec<FileEntry>, Vec<SkipRecord>) {
    let mut files = Vec::new();
    let mut skipped = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by(|a, b| {
            a.file_type()
                .is_dir()
                .cmp(&b.file_type().is_dir())
                .then_with(|| a.file_name().cmp(b.file_name()))
        })
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !config.is_excluded_dir(entry.file_name())
        });

    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(err) => {
                let rel_path = err
                    .path()
                    .and_then(|p| p.strip_prefix(root).ok())
                    .map(Path::to_path_buf)
                    .unwrap_or_default();
                log::warn!("Cannot walk {}: {err}", rel_path.display());
                skipped.push(SkipRecord::new(rel_path, "unreadable"));
                continue;
            }
        };

        if entry.depth() == 0 {
            continue;
        }

        // Symlinked files are followed, symlinked directories are not descended
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }

        let rel_path = match entry.path().strip_prefix(root) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => continue,
        };
        if config.excluded_paths.contains(&rel_path) {
            skipped.push(SkipRecord::new(rel_path, "bundle output"));
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();

        match read_candidate(entry.path(), &file_name, config) {
            Ok(content) => files.push(FileEntry::new(rel_path, content)),
            Err(reason) => {
                log::debug!("Skipping {}: {reason}", slash_path(&rel_path));
                skipped.push(SkipRecord::new(rel_path, reason));
            }
        }
    }

    log::debug!(
        "Collected {} files, skipped {} under {}",
        files.len(),
        skipped.len(),
        root.display()
    );
    (files, skipped)
}

/// Apply the per-file rules in order and read the file if it passes them all
fn read_candidate(path: &Path, file_name: &str, config: &FilterConfig) -> Result<String, String> {
    if config.is_excluded_file(file_name) {
        return Err("excluded file".to_string());
    }
    if LOCKFILES.contains(&file_name) {
        return Err("lockfile".to_string());
    }
    if let Some(reason) = config.extensions.rejects(file_name) {
        return Err(reason.to_string());
    }

    let size = fs::metadata(path)
        .map_err(|_| "unreadable".to_string())?
        .len();
    if size > config.max_file_size {
        return Err(format!("exceeds {} KB", config.max_file_size / 1024));
    }

    if is_binary(path).map_err(|_| "unreadable".to_string())? {
        return Err("binary".to_string());
    }

    let bytes = fs::read(path).map_err(|_| "read error".to_string())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// A NUL byte in the first 8 KiB marks a file as binary
pub fn is_binary(path: &Path) -> std::io::Result<bool> {
    let mut head = Vec::with_capacity(BINARY_SNIFF_LEN as usize);
    fs::File::open(path)?
        .take(BINARY_SNIFF_LEN)
        .read_to_end(&mut head)?;
    Ok(head.contains(&0))
}
