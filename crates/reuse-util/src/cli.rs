//! Clap CLI definitions for the `reuse-util` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use reuse_logging::LogLevel;

/// reuse-util -- inspect what the reuse utilities see.
#[derive(Parser, Debug)]
#[command(
    name = "reuse-util",
    about = "Inspect git checkouts, file encodings and commands the way the reuse utilities do",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Minimum log level (default: $REUSE_LOG_LEVEL, then warning).
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Enable debug output (same as --log-level debug).
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Git executable to use instead of the one on PATH.
    #[arg(long, global = true, value_name = "PATH")]
    pub git: Option<PathBuf>,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the top-level directory of the enclosing git checkout.
    Root(DirArgs),

    /// Print whether a directory is inside a git checkout.
    InRepo(DirArgs),

    /// Print a file's contents decoded with the detected encoding.
    Decode(DecodeArgs),

    /// Run a command with captured output and relay it.
    Run(RunArgs),
}

/// Arguments for commands that look at a directory.
#[derive(Args, Debug)]
pub struct DirArgs {
    /// Directory to inspect (default: current directory).
    pub dir: Option<PathBuf>,
}

/// Arguments for `reuse-util decode`.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// File to decode, or `-` for stdin.
    pub file: PathBuf,

    /// Read at most this many bytes.
    #[arg(long, value_name = "BYTES")]
    pub size: Option<usize>,
}

/// Arguments for `reuse-util run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Working directory for the command.
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Program and arguments.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}
