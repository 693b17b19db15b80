//! `reuse-util` -- diagnostics for the reuse utilities.
//!
//! Parses CLI arguments with clap, builds the runtime context (configuration,
//! logging, git lookup) and dispatches to a command handler.

mod cli;
mod commands;
mod context;

use clap::Parser;

use cli::{Cli, Commands};
use context::RuntimeContext;

fn main() {
    let cli = Cli::parse();

    let result = RuntimeContext::from_global_args(&cli.global).and_then(|ctx| match &cli.command {
        Commands::Root(args) => commands::root::run(&ctx, args).map(|()| 0),
        Commands::InRepo(args) => commands::in_repo::run(&ctx, args).map(|()| 0),
        Commands::Decode(args) => commands::decode::run(&ctx, args).map(|()| 0),
        Commands::Run(args) => commands::run::run(&ctx, args),
    });

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}
