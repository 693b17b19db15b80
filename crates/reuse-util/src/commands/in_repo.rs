//! `reuse-util in-repo` -- report whether a directory is inside a checkout.

use anyhow::Result;

use crate::cli::DirArgs;
use crate::context::RuntimeContext;

/// Execute the `reuse-util in-repo` command.
///
/// Prints `true` or `false`; both are successful outcomes.
pub fn run(ctx: &RuntimeContext, args: &DirArgs) -> Result<()> {
    let inside = ctx.git.in_git_repo(args.dir.as_deref())?;
    println!("{inside}");
    Ok(())
}
