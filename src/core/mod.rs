pub mod config;
pub mod errors;

// Re-export the modules here for easy import elsewhere.
pub use config::*;
pub use errors::*;
