//! Command execution and git integration for the reuse utilities.
//!
//! [`commands`] wraps `std::process::Command` with captured output and a
//! debug log line per invocation. [`gitdir`] builds on it to tell whether a
//! directory is inside a git checkout and where that checkout's root is.

pub mod commands;
pub mod gitdir;

pub use commands::{CommandError, CommandOptions, CompletedCommand, Redirect, execute_command};
pub use gitdir::{GitExecutable, find_root, git, in_git_repo};
