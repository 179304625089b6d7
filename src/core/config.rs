use std::path::PathBuf;

use directories::ProjectDirs;

use super::errors::TetherError;

const STORE_FILE: &str = "profiles.json";
const DEFAULT_SSH_PROGRAM: &str = "ssh";

/// Everything the store, launcher and router need to know about their environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// The single JSON file holding every profile.
    pub store_path: PathBuf,
    /// SSH client executable, looked up on `PATH` when not absolute.
    pub ssh_program: PathBuf,
    /// Clear the terminal before each render of the interactive menu.
    pub clear_screen: bool,
}

impl Config {
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
            ssh_program: PathBuf::from(DEFAULT_SSH_PROGRAM),
            clear_screen: true,
        }
    }

    /// `~/.config/tether/profiles.json` on Linux, `%APPDATA%\tether\config\profiles.json` on Windows, etc.
    pub fn default_store_path() -> Result<PathBuf, TetherError> {
        let proj = ProjectDirs::from("", "", "tether")
            .ok_or_else(|| TetherError::Config("Unable to locate config dir".into()))?;
        Ok(proj.config_dir().join(STORE_FILE))
    }

    pub fn with_ssh_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.ssh_program = program.into();
        self
    }

    pub fn with_clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }
}
