//! Opening files and URLs with the desktop's default application.

use std::ffi::OsStr;
use std::io;
use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};

/// Opens `target` (a path or URL) with the OS default application.
pub fn open_with_os_default(target: &OsStr) -> Result<()> {
    let status =
        launch(target).with_context(|| format!("failed to open {}", target.to_string_lossy()))?;
    if !status.success() {
        tracing::warn!(%status, target = %target.to_string_lossy(), "opener exited unsuccessfully");
    }
    Ok(())
}

#[cfg(target_os = "macos")]
fn launch(target: &OsStr) -> io::Result<ExitStatus> {
    Command::new("open").arg(target).status()
}

#[cfg(windows)]
fn launch(target: &OsStr) -> io::Result<ExitStatus> {
    // The empty argument is the window title `start` expects before a quoted path.
    Command::new("cmd").args(["/C", "start", ""]).arg(target).status()
}

#[cfg(all(unix, not(target_os = "macos")))]
fn launch(target: &OsStr) -> io::Result<ExitStatus> {
    match Command::new("xdg-open").arg(target).status() {
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let editor = std::env::var_os("EDITOR").unwrap_or_else(|| "vi".into());
            tracing::debug!(editor = %editor.to_string_lossy(), "xdg-open not found, using editor");
            Command::new(editor).arg(target).status()
        }
        other => other,
    }
}
