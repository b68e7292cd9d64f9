use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// EverGreen: chat with the landscaping assistant or visualize a garden.
#[derive(Parser, Debug)]
#[command(name = "evergreen", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter override (e.g. `evergreen=debug`).
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive chat; `/quit` or EOF exits.
    Chat,
    /// Generate one garden design.
    Visualize {
        /// What to draw. Ignored when --preset is given.
        description: Option<String>,

        /// Use one of the built-in descriptions (1-based, see `presets`).
        #[arg(short, long)]
        preset: Option<usize>,

        /// Where to write an inline image.
        #[arg(short, long, default_value = "garden.png")]
        out: PathBuf,
    },
    /// List the built-in visualizer descriptions.
    Presets,
}

pub fn parse() -> Args {
    Args::parse()
}
