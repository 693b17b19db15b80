//! `reuse-util decode` -- print a file decoded with its detected encoding.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use reuse_text::decoded_text_from_binary;

use crate::cli::DecodeArgs;
use crate::context::RuntimeContext;

/// Execute the `reuse-util decode` command.
pub fn run(_ctx: &RuntimeContext, args: &DecodeArgs) -> Result<()> {
    let text = if args.file == Path::new("-") {
        decoded_text_from_binary(&mut io::stdin().lock(), args.size)
            .context("failed to read stdin")?
    } else {
        let mut file = File::open(&args.file)
            .with_context(|| format!("cannot open {}", args.file.display()))?;
        decoded_text_from_binary(&mut file, args.size)
            .with_context(|| format!("failed to read {}", args.file.display()))?
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
