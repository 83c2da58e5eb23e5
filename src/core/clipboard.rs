//! Clipboard access through the platform's command-line helpers.
//!
//! # Public API
//! - [`Clipboard`]: Read/write text seam used by the commands
//! - [`SystemClipboard`]: Shells out to `pbcopy`/`pbpaste`, `clip`/`Get-Clipboard`,
//!   `wl-copy`/`wl-paste`, `xclip` or `xsel`, whichever the platform has

use crate::core::error::{CtxPackError, Result};
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

pub trait Clipboard {
    fn read_text(&self) -> Result<String>;
    fn write_text(&self, text: &str) -> Result<()>;
}

/// One external helper invocation
struct Helper {
    program: &'static str,
    args: &'static [&'static str],
}

impl Helper {
    const fn new(program: &'static str, args: &'static [&'static str]) -> Self {
        Self { program, args }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(self.program);
        cmd.args(self.args);
        cmd
    }
}

#[cfg(target_os = "macos")]
const READ_HELPERS: &[Helper] = &[Helper::new("pbpaste", &[])];
#[cfg(target_os = "macos")]
const WRITE_HELPERS: &[Helper] = &[Helper::new("pbcopy", &[])];

#[cfg(windows)]
const READ_HELPERS: &[Helper] = &[Helper::new("powershell", &["-command", "Get-Clipboard"])];
#[cfg(windows)]
const WRITE_HELPERS: &[Helper] = &[Helper::new("clip", &[])];

#[cfg(not(any(target_os = "macos", windows)))]
const READ_HELPERS: &[Helper] = &[
    Helper::new("wl-paste", &["--no-newline"]),
    Helper::new("xclip", &["-selection", "clipboard", "-o"]),
    Helper::new("xsel", &["--clipboard", "--output"]),
];
#[cfg(not(any(target_os = "macos", windows)))]
const WRITE_HELPERS: &[Helper] = &[
    Helper::new("wl-copy", &[]),
    Helper::new("xclip", &["-selection", "clipboard"]),
    Helper::new("xsel", &["--clipboard", "--input"]),
];

/// The real clipboard. Helpers are tried in order until one succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl Clipboard for SystemClipboard {
    fn read_text(&self) -> Result<String> {
        let mut failures = Vec::new();

        for helper in READ_HELPERS {
            let output = match helper.command().stdin(Stdio::null()).output() {
                Ok(output) => output,
                Err(e) => {
                    log::debug!("Clipboard helper {} unavailable: {e}", helper.program);
                    failures.push(describe_spawn_failure(helper.program, &e));
                    continue;
                }
            };

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                log::debug!("{} failed: {}", helper.program, stderr.trim());
                failures.push(format!("{} exited with {}", helper.program, output.status));
                continue;
            }

            log::debug!("Read {} bytes with {}", output.stdout.len(), helper.program);
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        Err(CtxPackError::clipboard_unavailable(failures.join("; ")))
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let mut failures = Vec::new();

        for helper in WRITE_HELPERS {
            match pipe_into(helper, text) {
                Ok(()) => {
                    log::debug!("Copied {} bytes with {}", text.len(), helper.program);
                    return Ok(());
                }
                Err(reason) => {
                    log::debug!("Clipboard helper {} failed: {reason}", helper.program);
                    failures.push(reason);
                }
            }
        }

        Err(CtxPackError::clipboard_write_failed(failures.join("; ")))
    }
}

fn pipe_into(helper: &Helper, text: &str) -> std::result::Result<(), String> {
    // xclip and wl-copy leave a background process holding any inherited
    // pipe, so nothing but stdin may be captured.
    let mut child = helper
        .command()
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| describe_spawn_failure(helper.program, &e))?;

    let written = match child.stdin.take() {
        // stdin is dropped at the end of this arm so the helper sees EOF
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };

    let status = child
        .wait()
        .map_err(|e| format!("{}: {e}", helper.program))?;
    if !status.success() {
        return Err(format!("{} exited with {status}", helper.program));
    }
    written.map_err(|e| format!("{}: {e}", helper.program))
}

fn describe_spawn_failure(program: &str, error: &std::io::Error) -> String {
    if error.kind() == ErrorKind::NotFound {
        format!("{program} not found")
    } else {
        format!("{program}: {error}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_platform_has_helpers() {
        assert!(!READ_HELPERS.is_empty());
        assert!(!WRITE_HELPERS.is_empty());
    }

    #[test]
    fn test_missing_helper_is_described() {
        let err = std::io::Error::new(ErrorKind::NotFound, "no such file");
        assert_eq!(describe_spawn_failure("pbcopy", &err), "pbcopy not found");

        let err = std::io::Error::new(ErrorKind::PermissionDenied, "denied");
        assert_eq!(describe_spawn_failure("xclip", &err), "xclip: denied");
    }

    #[test]
    fn test_missing_program_fails_to_pipe() {
        let helper = Helper::new("ctxpack-definitely-not-a-real-helper", &[]);
        let reason = pipe_into(&helper, "text").unwrap_err();
        assert!(reason.contains("not found"));
    }

    #[cfg(unix)]
    #[test]
    fn test_helper_exit_status_is_reported() {
        let helper = Helper::new("sh", &["-c", "cat >/dev/null; exit 3"]);
        let reason = pipe_into(&helper, "text").unwrap_err();
        assert!(reason.starts_with("sh exited with"), "{reason}");
    }

    #[cfg(unix)]
    #[test]
    fn test_helper_that_keeps_running_in_background_does_not_block() {
        // Mimics xclip: the foreground process exits while a child lingers
        // with the original stdout and stderr.
        let helper = Helper::new("sh", &["-c", "cat >/dev/null; (sleep 30 &); exit 0"]);
        let started = std::time::Instant::now();
        assert!(pipe_into(&helper, "text").is_ok());
        assert!(started.elapsed() < std::time::Duration::from_secs(10));
    }
}
