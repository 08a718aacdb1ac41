//! Detached process launching
//!
//! The library starts games through the [`Launcher`] trait so tests can
//! substitute [`RecordingLauncher`] and never spawn real processes.

use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;
use tracing::{debug, info};

/// Starts an executable without waiting on it.
pub trait Launcher {
    /// Start `executable` as a detached process.
    ///
    /// Returns once the process has been spawned; the launched process is
    /// not supervised afterwards.
    fn launch_detached(&self, executable: &Path) -> std::io::Result<()>;
}

/// Launcher that spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedLauncher;

impl Launcher for DetachedLauncher {
    #[allow(clippy::zombie_processes)] // Detached: the child is never waited on
    fn launch_detached(&self, executable: &Path) -> std::io::Result<()> {
        let mut command = Command::new(executable);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        // Games usually expect their own directory as working directory
        if let Some(dir) = executable.parent().filter(|d| !d.as_os_str().is_empty()) {
            command.current_dir(dir);
        }

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;

            const DETACHED_PROCESS: u32 = 0x0000_0008;
            const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
            command.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
        }

        debug!("Command to execute: {:?}", command);
        let child = command.spawn()?;
        info!(
            "Started {} (pid {})",
            executable.display(),
            child.id()
        );
        Ok(())
    }
}

/// Launcher that records requested paths instead of spawning processes.
///
/// Public so integration tests and embedders can drive a [`GameLibrary`]
/// without starting games. Clones share the same call log, so a caller can
/// keep one clone and hand the other to the library.
///
/// [`GameLibrary`]: crate::controller::GameLibrary
#[derive(Debug, Clone, Default)]
pub struct RecordingLauncher {
    fail_with: Option<String>,
    calls: Arc<Mutex<Vec<PathBuf>>>,
}

impl RecordingLauncher {
    /// Launcher that accepts every launch
    pub fn new() -> Self {
        Self::default()
    }

    /// Launcher that rejects every launch with the given message
    pub fn with_failure(message: impl Into<String>) -> Self {
        Self {
            fail_with: Some(message.into()),
            ..Self::default()
        }
    }

    /// Paths passed to `launch_detached`, in call order
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().clone()
    }
}

impl Launcher for RecordingLauncher {
    fn launch_detached(&self, executable: &Path) -> std::io::Result<()> {
        self.calls.lock().push(executable.to_path_buf());

        match &self.fail_with {
            Some(message) => Err(std::io::Error::other(message.clone())),
            None => Ok(()),
        }
    }
}
