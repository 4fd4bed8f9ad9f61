//! CLI module for Granske.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Granske - Multi-Agent Video Research
///
/// A CLI tool that coordinates a Supervisor, a video Analyst, and a Report
/// Writer to research a topic from YouTube video content.
/// The name "Granske" comes from the Norwegian word for "to examine."
#[derive(Parser, Debug)]
#[command(name = "granske")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a research query end-to-end and write a final report
    Research {
        /// The research query
        query: String,

        /// Maximum number of hops (agent/tool steps) before aborting
        #[arg(long)]
        max_hops: Option<usize>,

        /// Workspace directory for transcripts, summaries, and reports
        #[arg(short, long)]
        workspace: Option<String>,
    },

    /// Check credentials and configuration
    Doctor,
}
