use anyhow::Result;
use clap::Parser;

use encounter_forms::cli::commands::render::handle_render_command;
use encounter_forms::cli::commands::submit::handle_submit_command;
use encounter_forms::cli::{Cli, Commands};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Render(args) => handle_render_command(args)?,
        Commands::Submit(args) => handle_submit_command(args)?,
    }

    Ok(())
}
