//! `reuse-util run` -- run a command through the executor.

use std::io::{self, Write};

use anyhow::Result;
use reuse_git::{CommandOptions, execute_command};
use tracing::error_span;

use crate::cli::RunArgs;
use crate::context::RuntimeContext;

/// Execute the `reuse-util run` command.
///
/// Captured stdout and stderr are relayed unchanged. Returns the exit code
/// to finish with; a process killed by a signal counts as 1.
pub fn run(_ctx: &RuntimeContext, args: &RunArgs) -> Result<i32> {
    let mut options = CommandOptions::new();
    if let Some(dir) = &args.cwd {
        options = options.cwd(dir);
    }

    let logger = error_span!("reuse.util");
    let result = execute_command(args.command.as_slice(), &logger, &options)?;

    io::stdout().write_all(&result.stdout)?;
    io::stderr().write_all(&result.stderr)?;
    io::stdout().flush()?;

    Ok(result.returncode().unwrap_or(1))
}
