//! treemirror CLI - mirror a source tree into a destination tree
//!
//! Usage: treemirror <COMMAND>
//!
//! Commands:
//!   watch     Watch SOURCE and keep DEST in step until interrupted
//!   compress  Process every file in SOURCE once and exit

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;
use treemirror::application::CompressOptions;

use cli::{Cli, Commands};
use commands::GlobalArgs;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let globals = GlobalArgs::from_cli(&cli);

    match cli.command {
        Commands::Watch {
            source,
            dest,
            no_initial_scan,
            exec,
        } => commands::watch::cmd_watch(&globals, &source, &dest, no_initial_scan, exec),
        Commands::Compress {
            source,
            dest,
            after,
            before,
            force,
            exec,
        } => {
            let options = CompressOptions {
                after,
                before,
                force,
            };
            let ok = commands::compress::cmd_compress(&globals, &source, &dest, options, exec)?;
            if !ok {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
