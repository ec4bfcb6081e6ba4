//! slidecast CLI entry point.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slidecast",
    version,
    about = "Record slide transitions as a WEBVTT track, then inspect or convert the result"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a session interactively, driven by commands on stdin
    Record {
        /// Directory to export the finished track into
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Convert a capture log (JSON) or recorded track into a playback track
    Convert {
        /// Input file: a `.json` capture log or a recorded `.vtt` track
        input: PathBuf,
        /// Output path (defaults to the input with a `.vtt` extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the cue boundaries and titles of a track
    Cues {
        /// Track file to inspect
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Record { output_dir } => commands::record::handle(output_dir),
        Commands::Convert { input, output } => commands::convert::handle(&input, output.as_deref()),
        Commands::Cues { file } => commands::cues::handle(&file),
    }
}
