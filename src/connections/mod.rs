#[cfg(unix)]
pub mod askpass;
pub mod launcher;

pub use launcher::{Launcher, SshLauncher};
