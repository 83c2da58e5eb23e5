//! Indented tree listing of the bundled files, plus size formatting.

use crate::core::state::FileEntry;

/// Render `files` (in collection order) as an indented tree.
///
/// A directory line is only printed when the entry's directory differs from the
/// previous entry's at that depth, so siblings share one parent line.
pub fn render_tree(files: &[FileEntry]) -> String {
    let mut lines = Vec::new();
    let mut previous: Vec<String> = Vec::new();

    for entry in files {
        let parts: Vec<String> = entry
            .rel_path
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let Some((file_name, dirs)) = parts.split_last() else {
            continue;
        };

        let common = previous
            .iter()
            .zip(dirs)
            .take_while(|(prev, cur)| prev == cur)
            .count();

        for (depth, dir) in dirs.iter().enumerate().skip(common) {
            lines.push(format!("{}{dir}/", "  ".repeat(depth)));
        }
        lines.push(format!("{}{file_name}", "  ".repeat(dirs.len())));

        previous = dirs.to_vec();
    }

    lines.join("\n")
}

/// `512 B`, `1.5 KB`, `2.0 MB`
pub fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;

    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}
