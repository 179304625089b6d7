pub mod cli_commands;
pub mod router;

pub use router::CommandRouter;
