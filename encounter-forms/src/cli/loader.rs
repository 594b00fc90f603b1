//! Reading command inputs from disk

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::config::{ElementParameters, FormDefinition};
use crate::domain::Encounter;
use crate::element::EncounterDetailElement;
use crate::form::{FormSession, Mode};
use crate::services::{DirectoryFile, FormServices, InMemoryDirectory, MessageBundle};

use super::commands::FormInputs;

const MESSAGES_FILE: &str = "messages.toml";

/// Everything a command needs before a session can be built
#[derive(Debug)]
pub struct LoadedInputs {
    pub parameters: ElementParameters,
    pub directory: InMemoryDirectory,
    pub messages: MessageBundle,
    pub encounter: Option<Encounter>,
}

impl LoadedInputs {
    pub fn load(inputs: &FormInputs) -> Result<Self> {
        let form = load_form(&inputs.form)?;
        let parameters = form
            .parameters()
            .with_context(|| format!("Invalid [element] table in {}", inputs.form.display()))?;
        let directory = load_directory(&inputs.directory)?;
        let messages = load_messages(&form)?;
        let encounter = inputs.encounter.as_deref().map(load_encounter).transpose()?;

        Ok(LoadedInputs {
            parameters,
            directory,
            messages,
            encounter,
        })
    }

    /// Resolve the mode, defaulting to edit when an encounter was given
    pub fn mode(&self, requested: Option<Mode>) -> Result<Mode> {
        match (requested, &self.encounter) {
            (Some(Mode::Enter), Some(_)) => bail!("--mode enter cannot be combined with --encounter"),
            (Some(mode), None) if mode != Mode::Enter => {
                bail!("--mode {} requires --encounter", mode.label())
            }
            (Some(mode), _) => Ok(mode),
            (None, Some(_)) => Ok(Mode::Edit),
            (None, None) => Ok(Mode::Enter),
        }
    }

    /// Session holding a single encounter details element
    pub fn build_session(&self, mode: Mode, services: &FormServices<'_>) -> Result<BuiltForm> {
        let mut session = match &self.encounter {
            Some(encounter) => FormSession::for_encounter(mode, encounter.clone()),
            None => FormSession::enter(),
        };

        let element = EncounterDetailElement::new(session.context_mut(), &self.parameters, services)
            .context("Failed to build the encounter details element")?;
        let fields = element
            .fields(session.context())
            .into_iter()
            .map(|(label, name)| (label, name.to_string()))
            .collect();
        session.add_element(element);

        Ok(BuiltForm { session, fields })
    }
}

/// A ready session plus the field name given to each input
#[derive(Debug)]
pub struct BuiltForm {
    pub session: FormSession,
    pub fields: Vec<(&'static str, String)>,
}

fn read(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {} file {}", what, path.display()))
}

pub fn load_form(path: &Path) -> Result<FormDefinition> {
    let text = read(path, "form")?;
    FormDefinition::parse(&text).with_context(|| format!("Failed to parse form {}", path.display()))
}

pub fn load_directory(path: &Path) -> Result<InMemoryDirectory> {
    let text = read(path, "directory")?;
    let file = DirectoryFile::parse(&text)
        .with_context(|| format!("Failed to parse directory {}", path.display()))?;
    let directory = InMemoryDirectory::from_file(file)
        .with_context(|| format!("Inconsistent directory {}", path.display()))?;
    log::debug!("Loaded directory from {}", path.display());
    Ok(directory)
}

pub fn load_encounter(path: &Path) -> Result<Encounter> {
    let text = read(path, "encounter")?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse encounter {}", path.display()))
}

/// User-wide message overrides, e.g. `~/.config/encounter-forms/messages.toml`
pub fn user_messages_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("encounter-forms").join(MESSAGES_FILE))
}

/// Built-in messages, then user-wide overrides, then the form's own
pub fn load_messages(form: &FormDefinition) -> Result<MessageBundle> {
    let mut bundle = MessageBundle::default();

    if let Some(path) = user_messages_path().filter(|p| p.exists()) {
        let text = read(&path, "messages")?;
        let overrides = MessageBundle::parse_overrides(&text)
            .with_context(|| format!("Failed to parse messages {}", path.display()))?;
        log::debug!("Applying {} message override(s) from {}", overrides.len(), path.display());
        bundle = bundle.with_overrides(overrides);
    }

    Ok(bundle.with_overrides(form.messages.clone()))
}
