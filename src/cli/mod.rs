//! CLI module for Taxoscope.
//!
//! Subcommands:
//! - `render`: Build the scored graph and write it as HTML, JSON or TOON
//! - `stats`: Print per-depth score statistics of a traversal
//! - `lookup`: Print the effective score of labels

mod args;
mod lookup;
mod render;
mod stats;

use clap::{Parser, Subcommand};

use crate::config::Config;

pub use args::InputArgs;
pub use lookup::LookupCommand;
pub use render::RenderCommand;
pub use stats::StatsCommand;

/// Taxoscope - taxonomy score graph
#[derive(Parser)]
#[command(name = "taxoscope")]
#[command(about = "Render a label hierarchy as a graph colored by consistency score")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the graph and write the render payload
    Render(RenderCommand),

    /// Print per-depth score statistics
    Stats(StatsCommand),

    /// Look up the effective score of labels
    Lookup(LookupCommand),
}

impl App {
    /// Run the CLI application.
    pub fn run(self) -> color_eyre::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Render(cmd) => cmd.run(config),
            Command::Stats(cmd) => cmd.run(config),
            Command::Lookup(cmd) => cmd.run(config),
        }
    }
}
