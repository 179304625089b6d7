//! A `Launcher` that never spawns anything and remembers what it was asked to run.

use std::cell::RefCell;
use std::process::ExitStatus;

use tether::connections::Launcher;
use tether::{Profile, TetherError};

#[derive(Debug, Default)]
pub struct RecordingLauncher {
    pub calls: RefCell<Vec<(String, Profile)>>,
    /// What every launch reports. Default is a successful exit.
    status: ExitStatus,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sessions end as if the client exited with `code`.
    #[cfg(unix)]
    pub fn exiting_with(code: i32) -> Self {
        use std::os::unix::process::ExitStatusExt;

        Self {
            status: ExitStatus::from_raw(code << 8),
            ..Self::default()
        }
    }

    pub fn launched(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(name, _)| name.clone()).collect()
    }
}

impl Launcher for RecordingLauncher {
    fn launch(&self, name: &str, profile: &Profile) -> Result<ExitStatus, TetherError> {
        self.calls
            .borrow_mut()
            .push((name.to_string(), profile.clone()));
        Ok(self.status)
    }
}
