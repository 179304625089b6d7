pub mod cli;
pub mod prompt;
pub mod table;
