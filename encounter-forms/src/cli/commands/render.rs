use anyhow::Result;
use colored::Colorize;

use crate::cli::loader::LoadedInputs;
use crate::services::{FormServices, SystemClock};

use super::RenderArgs;

pub fn handle_render_command(args: RenderArgs) -> Result<()> {
    let loaded = LoadedInputs::load(&args.inputs)?;
    let mode = loaded.mode(args.mode)?;
    let clock = SystemClock;
    let services = FormServices::new(&loaded.directory, &loaded.messages, &clock);

    let form = loaded.build_session(mode, &services)?;
    log::info!("Rendering form in {} mode", mode.label());

    if args.fields {
        // stderr, so stdout stays pure markup
        eprintln!("{}", "Fields:".bold());
        for (label, name) in &form.fields {
            eprintln!("  {:<10} {}", label.cyan(), name);
        }
    }

    println!("{}", form.session.render());
    Ok(())
}
