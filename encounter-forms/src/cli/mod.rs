//! Command-line driver around the encounter details element

pub mod commands;
pub mod loader;

use clap::{Parser, Subcommand};

use commands::{RenderArgs, SubmitArgs};

#[derive(Parser, Debug)]
#[command(name = "encounter-forms", version, about = "Render and submit encounter details forms")]
pub struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the markup for a form definition
    Render(RenderArgs),
    /// Validate a submission and, if it passes, commit it onto the encounter
    Submit(SubmitArgs),
}
