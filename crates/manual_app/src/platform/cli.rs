use std::path::PathBuf;

use clap::Parser;

/// Turn a website into a structured manual outline.
#[derive(Debug, Parser)]
#[command(name = "web2manual", author, version, about)]
pub struct Cli {
    /// Site to structure. Without it an interactive prompt starts.
    pub url: Option<String>,

    /// Write the text export once the manual is ready (only with URL).
    #[arg(long)]
    pub export: bool,

    /// Output directory for exports.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Configuration file (RON). Defaults to `web2manual.ron` when present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Model name for the structuring service.
    #[arg(long)]
    pub model: Option<String>,

    /// Also log debug output to the terminal.
    #[arg(short, long)]
    pub verbose: bool,
}
