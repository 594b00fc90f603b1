pub mod render;
pub mod submit;

use std::path::PathBuf;

use clap::Args;

use crate::form::Mode;

/// Inputs shared by every command
#[derive(Args, Debug, Clone)]
pub struct FormInputs {
    /// Form definition file (TOML, `[element]` and optional `[messages]`)
    #[arg(short, long)]
    pub form: PathBuf,

    /// Directory of persons, users, roles and locations (TOML)
    #[arg(short, long)]
    pub directory: PathBuf,

    /// Existing encounter to view or edit (JSON)
    #[arg(short, long)]
    pub encounter: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub inputs: FormInputs,

    /// view, enter or edit (defaults to edit with --encounter, enter without)
    #[arg(short, long)]
    pub mode: Option<Mode>,

    /// Also list the field name assigned to each input
    #[arg(long)]
    pub fields: bool,
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub inputs: FormInputs,

    /// Submitted form data, url-encoded (e.g. "w1=2024-01-05&w3=14%3A30")
    #[arg(long)]
    pub data: String,

    /// Pretend the current time is this timestamp (YYYY-MM-DDTHH:MM)
    #[arg(long)]
    pub now: Option<String>,
}
