use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use log::{info, warn};

#[cfg(unix)]
use super::askpass::Askpass;
use crate::core::config::Config;
use crate::core::errors::TetherError;
use crate::storage::profile::Profile;

/// Something that can run an interactive session against a profile and
/// report how it ended. The router only ever talks to this trait.
pub trait Launcher {
    fn launch(&self, name: &str, profile: &Profile) -> Result<ExitStatus, TetherError>;
}

impl<T: Launcher + ?Sized> Launcher for &T {
    fn launch(&self, name: &str, profile: &Profile) -> Result<ExitStatus, TetherError> {
        (**self).launch(name, profile)
    }
}

/// Runs the system ssh client in the foreground, sharing our terminal.
#[derive(Debug, Clone)]
pub struct SshLauncher {
    program: PathBuf,
}

impl SshLauncher {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.ssh_program.clone())
    }

    /// `ssh -p <port> <user>@<host>`. The secret is never part of it.
    pub fn command(&self, profile: &Profile) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-p")
            .arg(profile.port.to_string())
            .arg(profile.destination());
        cmd
    }
}

impl Launcher for SshLauncher {
    fn launch(&self, name: &str, profile: &Profile) -> Result<ExitStatus, TetherError> {
        let mut cmd = self.command(profile);
        let secret = profile.secret.as_deref().filter(|s| !s.is_empty());

        // Must outlive the child: dropping it deletes the helper script.
        #[cfg(unix)]
        let _askpass = match secret {
            Some(secret) => {
                let askpass = Askpass::create()?;
                askpass.apply(&mut cmd, secret);
                Some(askpass)
            }
            None => None,
        };
        #[cfg(not(unix))]
        if secret.is_some() {
            warn!("Stored passwords cannot be forwarded on this platform; ssh will prompt for it");
        }

        info!(
            "Launching {} -p {} {} for profile {name}",
            self.program.display(),
            profile.port,
            profile.destination()
        );
        let mut child = cmd.spawn().map_err(|source| TetherError::Launch {
            program: self.program.clone(),
            source,
        })?;
        let status = child.wait()?;
        if !status.success() {
            warn!("ssh session for {name} ended with {status}");
        }
        Ok(status)
    }
}
