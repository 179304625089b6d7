use std::path::PathBuf;

use thiserror::Error;

/// A central error enum for everything a tether command can run into.
///
/// A corrupt store file is deliberately absent: the store recovers from it
/// by itself (see [`crate::storage::store::ProfileStore::load`]).
#[derive(Debug, Error)]
pub enum TetherError {
    /// No profile with this name exists in the store.
    #[error("Profile {0} not found!")]
    NotFound(String),

    /// The user typed the cancellation sentinel (or closed stdin) mid-prompt.
    #[error("Operation cancelled.")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not encode profiles: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to launch {}: {source}", .program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TetherError {
    /// Process exit code used by one-shot commands.
    pub fn exit_code(&self) -> i32 {
        match self {
            TetherError::NotFound(_) => 2,
            TetherError::Cancelled => 130,
            TetherError::InvalidProfile(_) | TetherError::Config(_) => 64,
            TetherError::Io(_) | TetherError::Encode(_) | TetherError::Launch { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_its_own_exit_code() {
        let err = TetherError::NotFound("db1".into());
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "Profile db1 not found!");
    }

    #[test]
    fn io_errors_are_generic_failures() {
        let err: TetherError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope").into();
        assert_eq!(err.exit_code(), 1);
    }
}
