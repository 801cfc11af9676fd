//! Command implementations for the CLI.
//!
//! Each command is implemented in its own module.

pub mod generate;
pub mod init;
pub mod routes;
pub mod watch;
