use std::path::PathBuf;
use crate::core::error::CtxPackError;

pub fn get_config_directory() -> Result<PathBuf, CtxPackError> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => {
            match std::env::var("XDG_CONFIG_HOME") {
                Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
                _ => dirs::home_dir()
                    .ok_or(CtxPackError::ConfigDirectoryNotFound)?
                    .join(".config"),
            }
        },
        "macos" => {
            dirs::home_dir()
                .ok_or(CtxPackError::ConfigDirectoryNotFound)?
                .join("Library/Application Support")
        },
        _ => dirs::config_dir().ok_or(CtxPackError::ConfigDirectoryNotFound)?,
    };

    Ok(base.join("ctxpack"))
}
