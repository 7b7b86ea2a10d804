//! CLI Argument Parsing
//!
//! Global flags (--json, --color, --verbose, --config) are inherited by all
//! subcommands.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// treemirror - mirror a source tree into a destination tree
#[derive(Parser, Debug)]
#[command(name = "treemirror")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v shows skips and per-path traces)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: $XDG_CONFIG_HOME/treemirror/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch SOURCE and keep DEST in step until interrupted
    Watch {
        /// Directory to watch
        source: PathBuf,

        /// Directory that receives processed files
        dest: PathBuf,

        /// Skip the startup pass over files already in SOURCE
        #[arg(long)]
        no_initial_scan: bool,

        /// Transform command; {input}, {output_dir} and {output} are substituted
        #[arg(long, num_args = 1.., allow_hyphen_values = true, value_name = "CMD")]
        exec: Vec<String>,
    },

    /// Process every file in SOURCE once and exit
    Compress {
        /// Directory to read
        source: PathBuf,

        /// Directory that receives processed files
        dest: PathBuf,

        /// Only files modified at or after this time (RFC 3339)
        #[arg(long, value_parser = parse_timestamp, value_name = "TIME")]
        after: Option<DateTime<Utc>>,

        /// Only files modified at or before this time (RFC 3339)
        #[arg(long, value_parser = parse_timestamp, value_name = "TIME")]
        before: Option<DateTime<Utc>>,

        /// Process files even when the output is newer than the source
        #[arg(short, long)]
        force: bool,

        /// Transform command; {input}, {output_dir} and {output} are substituted
        #[arg(long, num_args = 1.., allow_hyphen_values = true, value_name = "CMD")]
        exec: Vec<String>,
    },
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp such as 2024-05-01T12:00:00Z ({e})"))
}
