//! jiedu command-line entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use jiedu_cli::commands::{ReadArgs, SegmentArgs, StatsArgs};

/// Segment and analyze CJK prose
#[derive(Debug, Parser)]
#[command(name = "jiedu", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Split text into canonical sentence units
    Segment(SegmentArgs),
    /// Interactive reading session against an analysis backend
    Read(ReadArgs),
    /// Show backend dictionary statistics
    Stats(StatsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Segment(args) => args.execute(),
        Command::Read(args) => args.execute().await,
        Command::Stats(args) => args.execute().await,
    }
}
