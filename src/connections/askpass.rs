//! Hands a stored secret to `ssh` without putting it on the command line.
//!
//! OpenSSH (8.4+) runs `$SSH_ASKPASS` instead of reading the terminal when
//! `SSH_ASKPASS_REQUIRE=force` is set. The helper script below answers
//! password prompts from an environment variable only the child sees, and
//! forwards every other question (host key confirmation, key passphrases)
//! to the tty. `TETHER_ASKPASS_TTY` replaces `/dev/tty` when set.

use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;
use tempfile::TempDir;

pub const SECRET_ENV: &str = "TETHER_ASKPASS_SECRET";
pub const TTY_ENV: &str = "TETHER_ASKPASS_TTY";

const SCRIPT: &str = r#"#!/bin/sh
case "$1" in
  *passphrase*)
    ;;
  *assword*)
    printf '%s\n' "$TETHER_ASKPASS_SECRET"
    exit 0
    ;;
esac
tty="${TETHER_ASKPASS_TTY:-/dev/tty}"
printf '%s ' "$1" > "$tty"
read -r answer < "$tty"
printf '%s\n' "$answer"
"#;

/// An askpass script in its own owner-only temp dir. Removed on drop.
pub struct Askpass {
    _dir: TempDir,
    script: PathBuf,
}

impl Askpass {
    pub fn create() -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("tether-askpass-").tempdir()?;
        let script = dir.path().join("askpass.sh");
        fs::write(&script, SCRIPT)?;
        fs::set_permissions(&script, fs::Permissions::from_mode(0o700))?;
        debug!("Askpass helper written to {:?}", script);
        Ok(Self { _dir: dir, script })
    }

    pub fn script(&self) -> &Path {
        &self.script
    }

    /// Points `cmd` at the helper and gives it the secret through its environment.
    pub fn apply(&self, cmd: &mut Command, secret: &str) {
        cmd.env("SSH_ASKPASS", &self.script)
            .env("SSH_ASKPASS_REQUIRE", "force")
            .env(SECRET_ENV, secret);
        // Older clients only consult SSH_ASKPASS when DISPLAY is set.
        if std::env::var_os("DISPLAY").is_none() {
            cmd.env("DISPLAY", ":0");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn script_is_owner_only_and_cleaned_up() {
        let askpass = Askpass::create().unwrap();
        let path = askpass.script().to_path_buf();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
        drop(askpass);
        assert!(!path.exists());
    }

    #[test]
    fn script_echoes_secret_for_password_prompts() {
        let askpass = Askpass::create().unwrap();
        let out = Command::new("sh")
            .arg(askpass.script())
            .arg("alice@10.0.0.5's password: ")
            .env(SECRET_ENV, "hunter2")
            .output()
            .unwrap();
        assert_eq!(out.stdout, b"hunter2\n");
    }

    #[test]
    fn key_passphrase_prompts_go_to_the_tty() {
        let askpass = Askpass::create().unwrap();
        let out = Command::new("sh")
            .arg(askpass.script())
            .arg("Enter passphrase for key '/home/alice/.ssh/id_ed25519': ")
            .env(SECRET_ENV, "hunter2")
            .env(TTY_ENV, "/dev/null")
            .output()
            .unwrap();
        assert_eq!(out.stdout, b"\n");
    }

    #[test]
    fn secret_only_travels_in_the_environment() {
        let askpass = Askpass::create().unwrap();
        let mut cmd = Command::new("ssh");
        cmd.arg("alice@host");
        askpass.apply(&mut cmd, "hunter2");

        assert!(cmd.get_args().all(|a| a != OsStr::new("hunter2")));
        let secret = cmd
            .get_envs()
            .find(|(k, _)| *k == OsStr::new(SECRET_ENV))
            .and_then(|(_, v)| v);
        assert_eq!(secret, Some(OsStr::new("hunter2")));
    }
}
