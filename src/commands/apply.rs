use crate::core::{
    block_parser::parse_blocks,
    change_status::ChangeStatus,
    clipboard::Clipboard,
    colors::Style,
    committer::commit_changes,
    error::{CtxPackError, Result},
    planner::{plan_changes, Change},
    print_diagnostics, print_info, print_section_header,
    state::slash_path,
};
use clap::Args;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Clone, Default)]
pub struct ApplyArgs {
    /// Path to the project directory
    pub project_dir: PathBuf,

    /// Show what would change without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub no_confirm: bool,

    /// Read from a file instead of the clipboard
    #[arg(long, value_name = "PATH")]
    pub from_file: Option<PathBuf>,
}

pub fn execute_apply(args: ApplyArgs, style: Style, clipboard: &dyn Clipboard) -> Result<()> {
    let stdin = io::stdin();
    run_apply(&args, style, clipboard, &mut stdin.lock())?;
    Ok(())
}

/// Parse, review and commit. Returns the number of files written.
///
/// `answers` supplies the reply to the confirmation prompt.
pub fn run_apply<R: BufRead>(
    args: &ApplyArgs,
    style: Style,
    clipboard: &dyn Clipboard,
    answers: &mut R,
) -> Result<usize> {
    if !args.project_dir.is_dir() {
        return Err(CtxPackError::not_a_directory(&args.project_dir));
    }
    let root = args
        .project_dir
        .canonicalize()
        .map_err(|e| CtxPackError::input_read(&args.project_dir, e))?;

    let text = read_source(args, clipboard)?;

    let parsed = parse_blocks(&text);
    print_diagnostics(style, &parsed.diagnostics);
    if parsed.is_empty() {
        return Err(CtxPackError::NoBlocksFound);
    }
    log::debug!("Parsed {} block(s)", parsed.len());

    let plan = plan_changes(&parsed.items, &root);
    print_diagnostics(style, &plan.diagnostics);
    if plan.is_empty() {
        return Err(CtxPackError::NoValidChanges);
    }

    print_section_header(style, "Changes to apply");
    for change in &plan.items {
        eprintln!("{}", style.status(change.status, &summary_line(change)));
    }

    if !plan.items.iter().any(|c| c.status.is_actionable()) {
        print_info("\nAll files are unchanged. Nothing to do.");
        return Ok(0);
    }

    eprintln!();
    for change in plan.items.iter().filter(|c| c.status.is_actionable()) {
        print_diff(style, change);
    }

    if args.dry_run {
        eprintln!("{}", style.yellow("Dry run, no files were modified."));
        return Ok(0);
    }

    if !args.no_confirm && !confirm(answers) {
        return Err(CtxPackError::Aborted);
    }

    let committed = commit_changes(&plan.items);
    for path in &committed.items {
        let shown = path.strip_prefix(&root).unwrap_or(path);
        print_info(&format!("  Wrote {}", slash_path(shown)));
    }
    print_diagnostics(style, &committed.diagnostics);

    print_info(&format!("\nApplied {} file(s).", committed.len()));
    Ok(committed.len())
}

fn read_source(args: &ApplyArgs, clipboard: &dyn Clipboard) -> Result<String> {
    match &args.from_file {
        Some(path) => read_input_file(path),
        None => {
            let text = clipboard.read_text()?;
            if text.trim().is_empty() {
                return Err(CtxPackError::ClipboardEmpty);
            }
            Ok(text)
        }
    }
}

fn read_input_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| CtxPackError::input_read(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// `  [M] path  (+a, -r lines)` and friends
fn summary_line(change: &Change) -> String {
    let tag = change.status.as_str();
    match change.status {
        ChangeStatus::Modified => {
            let (added, removed) = change.line_counts();
            format!("  {tag} {}  (+{added}, -{removed} lines)", change.rel_path)
        }
        ChangeStatus::Added => format!(
            "  {tag} {}  (new file, {} lines)",
            change.rel_path,
            change.diff_lines.len()
        ),
        ChangeStatus::Unchanged => format!("  {tag} {}  (unchanged, skipping)", change.rel_path),
    }
}

fn print_diff(style: Style, change: &Change) {
    if change.status == ChangeStatus::Added {
        eprintln!("{}", style.green(&format!("--- New file: {} ---", change.rel_path)));
        for line in &change.diff_lines {
            eprintln!("{}", style.green(line));
        }
    } else {
        for line in &change.diff_lines {
            eprintln!("{}", style.diff_line(line));
        }
    }
    eprintln!();
}

/// Ask on stderr, read one line. Only `y`/`yes` accepts; EOF or a read error declines.
fn confirm<R: BufRead>(answers: &mut R) -> bool {
    eprint!("Apply these changes? [y/N]: ");
    let _ = io::stderr().flush();

    let mut answer = String::new();
    match answers.read_line(&mut answer) {
        Ok(0) | Err(_) => {
            eprintln!();
            false
        }
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
    }
}
