//! Hand a written pattern to the platform image viewer.

use std::io;
use std::path::Path;
use std::process::Command;

use log::warn;

/// Open `path` with the platform viewer, waiting for the launcher to return.
pub fn open_in_viewer(path: &Path) -> io::Result<()> {
    let status = viewer_command(path).status()?;
    if !status.success() {
        warn!("image viewer launcher exited with {status}");
    }
    Ok(())
}

#[cfg(target_os = "macos")]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(target_os = "windows")]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}
