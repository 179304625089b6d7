use serde::{Deserialize, Serialize};

use crate::core::errors::TetherError;

pub const DEFAULT_PORT: u16 = 22;

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// One saved SSH target. The profile name is the key it is stored under,
/// so it is not part of the record itself.
///
/// JSON looks like the files the first tether versions wrote:
/// `{ "user": "alice", "ip": "10.0.0.5", "port": 2200, "password": "x" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user: String,
    #[serde(rename = "ip", alias = "host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Stored in clear text. Profiles without one let ssh prompt on its own.
    #[serde(rename = "password", default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl Profile {
    pub fn new(user: impl Into<String>, host: impl Into<String>, port: u16, secret: Option<String>) -> Self {
        Self {
            user: user.into(),
            host: host.into(),
            port,
            secret,
        }
    }

    /// `user@host`, the destination handed to the ssh client.
    pub fn destination(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }

    /// Checks the field invariants. `name` is the key the profile will be stored under.
    pub fn validate(&self, name: &str) -> Result<(), TetherError> {
        if name.trim().is_empty() {
            return Err(TetherError::InvalidProfile("profile name must not be empty".into()));
        }
        if self.user.trim().is_empty() {
            return Err(TetherError::InvalidProfile(format!("{name}: user must not be empty")));
        }
        if self.host.trim().is_empty() {
            return Err(TetherError::InvalidProfile(format!("{name}: host must not be empty")));
        }
        if self.port == 0 {
            return Err(TetherError::InvalidProfile(format!(
                "{name}: port must be between 1 and 65535"
            )));
        }
        Ok(())
    }
}

/// Parses a port typed by the user. Only `1..=65535` is accepted.
pub fn parse_port(raw: &str) -> Option<u16> {
    raw.trim().parse::<u16>().ok().filter(|p| *p != 0)
}
