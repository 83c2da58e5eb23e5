use crate::core::{
    clipboard::Clipboard,
    colors::Style,
    committer::write_atomic,
    config::Settings,
    encoder::render_bundle,
    error::{CtxPackError, Result},
    print_info, print_success, print_warning,
    state::{slash_path, FileEntry, SkipRecord},
    tree_filter::{collect, ExtensionPolicy, FilterConfig, DEFAULT_MAX_FILE_SIZE},
    tree_render::human_size,
};
use clap::Args;
use std::io::Write;
use std::path::{Path, PathBuf};

const LARGE_BUNDLE: usize = 500 * 1024;
const HUGE_BUNDLE: usize = 1024 * 1024;

#[derive(Args, Debug, Clone, Default)]
pub struct BundleArgs {
    /// Path to the project directory
    pub project_dir: PathBuf,

    /// Output file path (default: <project_name>_bundle.txt)
    #[arg(short, long, value_name = "OUTPUT", conflicts_with_all = ["clipboard", "stdout"])]
    pub output: Option<PathBuf>,

    /// Copy to clipboard instead of writing to file
    #[arg(long, conflicts_with = "stdout")]
    pub clipboard: bool,

    /// Print to stdout instead of writing to file
    #[arg(long)]
    pub stdout: bool,

    /// Skip files larger than this in KB (default: 100)
    #[arg(long, value_name = "KB")]
    pub max_file_size: Option<u64>,

    /// Additional directory name to exclude (repeatable)
    #[arg(long = "exclude-dir", value_name = "DIR")]
    pub exclude_dirs: Vec<String>,

    /// Additional file name to exclude (repeatable)
    #[arg(long = "exclude-file", value_name = "NAME")]
    pub exclude_files: Vec<String>,

    /// Only bundle these extensions, e.g. --include-ext .rs (repeatable)
    #[arg(long = "include-ext", value_name = "EXT", conflicts_with = "exclude_exts")]
    pub include_exts: Vec<String>,

    /// Additional extension to exclude (repeatable)
    #[arg(long = "exclude-ext", value_name = "EXT")]
    pub exclude_exts: Vec<String>,
}

/// Where the finished bundle goes
#[derive(Debug, Clone, PartialEq, Eq)]
enum Sink {
    File(PathBuf),
    Clipboard,
    Stdout,
}

impl Sink {
    fn from_args(args: &BundleArgs, project_name: &str) -> Self {
        if args.stdout {
            Sink::Stdout
        } else if args.clipboard {
            Sink::Clipboard
        } else {
            let path = args
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(format!("{project_name}_bundle.txt")));
            Sink::File(path)
        }
    }
}

pub fn execute_bundle(args: BundleArgs, style: Style, clipboard: &dyn Clipboard) -> Result<()> {
    let settings = Settings::load()?;
    run_bundle(&args, &settings, style, clipboard)?;
    Ok(())
}

/// Bundle `args.project_dir` with already-loaded settings. Returns the bundle size in bytes.
pub fn run_bundle(
    args: &BundleArgs,
    settings: &Settings,
    style: Style,
    clipboard: &dyn Clipboard,
) -> Result<usize> {
    let root = resolve_root(&args.project_dir)?;
    let project_name = project_name(&root);

    let sink = Sink::from_args(args, &project_name);

    let mut config = filter_config(args, settings);
    if let Sink::File(path) = &sink {
        // A previous bundle inside the project must never be bundled again
        if let Some(rel) = path_under_root(path, &root) {
            config.excluded_paths.insert(rel);
        }
    }
    log::debug!("Collecting files under {} with {:?}", root.display(), config);
    let (files, skipped) = collect(&root, &config);
    if files.is_empty() {
        return Err(CtxPackError::NoFilesCollected);
    }

    let bundle = render_bundle(&project_name, &files);
    let bundle_size = bundle.len();

    match sink {
        Sink::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bundle.as_bytes())?;
            stdout.flush()?;
        }
        Sink::Clipboard => {
            clipboard.write_text(&bundle)?;
            print_success(style, "Copied to clipboard.");
        }
        Sink::File(path) => {
            write_atomic(&path, &bundle).map_err(|e| CtxPackError::output_write(&path, e))?;
            print_info(&format!("Wrote {}", path.display()));
        }
    }

    print_summary(style, &project_name, &files, &skipped, bundle_size);
    Ok(bundle_size)
}

fn resolve_root(project_dir: &Path) -> Result<PathBuf> {
    if !project_dir.is_dir() {
        return Err(CtxPackError::not_a_directory(project_dir));
    }
    project_dir
        .canonicalize()
        .map_err(|e| CtxPackError::input_read(project_dir, e))
}

/// `path` relative to `root`, when the file lives inside the project
fn path_under_root(path: &Path, root: &Path) -> Option<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(path)
    };
    // The file itself may not exist yet; its directory is resolved instead
    let parent = absolute.parent()?.canonicalize().ok()?;
    let resolved = parent.join(absolute.file_name()?);
    resolved.strip_prefix(root).ok().map(Path::to_path_buf)
}

fn project_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string())
}

/// Merge settings with command-line flags; flags extend lists and override scalars
fn filter_config(args: &BundleArgs, settings: &Settings) -> FilterConfig {
    let max_file_size = args
        .max_file_size
        .or(settings.max_file_size_kb)
        .map(|kb| kb.saturating_mul(1024))
        .unwrap_or(DEFAULT_MAX_FILE_SIZE);

    FilterConfig {
        max_file_size,
        extra_excluded_dirs: settings
            .exclude_dirs
            .iter()
            .chain(&args.exclude_dirs)
            .cloned()
            .collect(),
        extra_excluded_files: settings
            .exclude_files
            .iter()
            .chain(&args.exclude_files)
            .cloned()
            .collect(),
        excluded_paths: Default::default(),
        extensions: ExtensionPolicy::select(
            &args.include_exts,
            &args.exclude_exts,
            &settings.include_extensions,
            &settings.exclude_extensions,
        ),
    }
}

fn print_summary(
    style: Style,
    project_name: &str,
    files: &[FileEntry],
    skipped: &[SkipRecord],
    bundle_size: usize,
) {
    let size = human_size(bundle_size as u64);
    print_info(&format!(
        "\nBundled {} files ({size}) from \"{project_name}\"",
        files.len()
    ));

    if !skipped.is_empty() {
        print_info(&format!("\nSkipped {} files:", skipped.len()));
        for skip in skipped {
            print_info(&format!("  {} ({})", slash_path(&skip.rel_path), skip.reason));
        }
    }

    if bundle_size > HUGE_BUNDLE {
        print_warning(style, &format!("WARNING: Bundle is {size}. Context might be truncated."));
    } else if bundle_size > LARGE_BUNDLE {
        print_warning(style, &format!("WARNING: Bundle is {size}. May exceed context limits."));
    }
}
