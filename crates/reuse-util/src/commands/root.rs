//! `reuse-util root` -- print the top-level directory of the checkout.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Result, bail};

use crate::cli::DirArgs;
use crate::context::RuntimeContext;

/// Execute the `reuse-util root` command.
pub fn run(ctx: &RuntimeContext, args: &DirArgs) -> Result<()> {
    let root = match &args.dir {
        Some(dir) => ctx.git.find_root_from(dir)?,
        None => ctx.git.find_root()?,
    };

    match root {
        Some(root) => print_path(&root),
        None => bail!("not inside a git repository"),
    }
}

#[cfg(unix)]
fn print_path(path: &Path) -> Result<()> {
    use std::os::unix::ffi::OsStrExt;

    let mut out = io::stdout().lock();
    out.write_all(path.as_os_str().as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

#[cfg(not(unix))]
fn print_path(path: &Path) -> Result<()> {
    writeln!(io::stdout().lock(), "{}", path.display())?;
    Ok(())
}
