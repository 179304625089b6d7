pub mod connections;
pub mod core;
pub mod storage;
pub mod ui;
pub mod utils;

// re‑export ergonomic entry points
pub use crate::core::config::Config;
pub use crate::core::errors::TetherError;
pub use storage::profile::Profile;
pub use storage::store::{ProfileMap, ProfileStore};
