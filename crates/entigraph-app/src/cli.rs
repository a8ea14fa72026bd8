//! Command line interface.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "entigraph",
    version,
    about = "Replay an entity diagram editing script and export the resulting graph as JSON"
)]
pub struct Cli {
    /// Script file: a JSON array of editor events (reads stdin if not provided)
    pub script: Option<PathBuf>,

    /// Editor configuration file (JSON)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Start from a previously exported diagram instead of an empty canvas
    #[arg(long, short = 'i')]
    pub import: Option<PathBuf>,

    /// Write the export to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Also copy the export to the system clipboard
    #[arg(long)]
    pub clipboard: bool,

    /// Emit compact JSON
    #[arg(long)]
    pub compact: bool,
}
