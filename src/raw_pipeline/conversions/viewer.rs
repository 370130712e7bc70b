use std::io;
use std::path::Path;
use std::process::Command;
use std::thread;

use tracing::{debug, warn};

/// Hands a written file to an image viewer.
pub trait ViewerLauncher {
    fn open(&self, path: &Path) -> io::Result<()>;
}

/// Launches the platform's default application without waiting for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemViewer;

impl SystemViewer {
    fn command(path: &Path) -> Command {
        #[cfg(target_os = "windows")]
        {
            let mut command = Command::new("cmd");
            command.args(["/C", "start", ""]).arg(path);
            command
        }
        #[cfg(target_os = "macos")]
        {
            let mut command = Command::new("open");
            command.arg(path);
            command
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            let mut command = Command::new("xdg-open");
            command.arg(path);
            command
        }
    }
}

impl ViewerLauncher for SystemViewer {
    fn open(&self, path: &Path) -> io::Result<()> {
        debug!("Opening {} in viewer", path.display());
        spawn_detached(Self::command(path)).map(|_| ())
    }
}

/// Starts `command` and reaps it on a background thread, so a long batch
/// does not pile up zombie processes.
fn spawn_detached(mut command: Command) -> io::Result<thread::JoinHandle<()>> {
    let mut child = command.spawn()?;
    let pid = child.id();
    debug!("Viewer started (pid {})", pid);
    Ok(thread::spawn(move || match child.wait() {
        Ok(status) => debug!("Viewer {} exited with {}", pid, status),
        Err(e) => warn!("Failed to wait on viewer {}: {}", pid, e),
    }))
}
