use anyhow::{Context, Result, bail};
use colored::Colorize;

use crate::cli::loader::LoadedInputs;
use crate::config::parse_timestamp;
use crate::form::{Mode, Submission, SubmitOutcome};
use crate::services::{Clock, FixedClock, FormServices, SystemClock};

use super::SubmitArgs;

pub fn handle_submit_command(args: SubmitArgs) -> Result<()> {
    let loaded = LoadedInputs::load(&args.inputs)?;
    let mode = loaded.mode(None)?;
    if mode == Mode::View {
        bail!("Cannot submit a form in view mode");
    }

    let clock: Box<dyn Clock> = match args.now.as_deref() {
        Some(raw) => match parse_timestamp(raw) {
            Some(now) => Box::new(FixedClock(now)),
            None => bail!("--now '{}' is not a timestamp (expected YYYY-MM-DDTHH:MM)", raw),
        },
        None => Box::new(SystemClock),
    };
    let services = FormServices::new(&loaded.directory, &loaded.messages, &*clock);

    let submission = Submission::from_query(&args.data).context("Submitted data is not valid UTF-8")?;
    log::debug!("Submission carries {} field(s)", submission.len());

    let mut form = loaded.build_session(mode, &services)?;
    let outcome = form
        .session
        .submit(&submission, &services)
        .context("Failed to commit the submission")?;

    match outcome {
        SubmitOutcome::Accepted => {
            eprintln!("{}", "Submission accepted".green().bold());
            let encounter = serde_json::to_string_pretty(form.session.encounter())?;
            println!("{}", encounter);
            Ok(())
        }
        SubmitOutcome::Rejected(errors) => {
            eprintln!("{}", "Submission rejected:".red().bold());
            for error in &errors {
                let label = form
                    .fields
                    .iter()
                    .find(|(_, name)| error_belongs_to(&error.field, name))
                    .map(|(label, _)| *label)
                    .unwrap_or("field");
                eprintln!("  {} ({}): {}", label.yellow(), error.field, error.message);
            }
            println!("{}", form.session.render());
            bail!("{} validation error(s)", errors.len())
        }
    }
}

/// Error widgets are registered straight after the input they report on
fn error_belongs_to(error_field: &str, input_field: &str) -> bool {
    let number = |name: &str| name.strip_prefix('w').and_then(|n| n.parse::<u64>().ok());
    match (number(error_field), number(input_field)) {
        (Some(error), Some(input)) => error == input + 1,
        _ => false,
    }
}
