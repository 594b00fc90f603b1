//! Per-form render context
//!
//! Maps every live widget to its field name, pairs widgets with their error
//! widgets, and carries the mode plus the encounter being edited.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::ConfigError;
use crate::domain::Encounter;

use super::FieldError;

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique widget identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Allocate a fresh identity; never reused for the life of the process
    pub fn next() -> Self {
        WidgetId(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How the form is being shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Read-only display of an existing encounter
    View,
    /// Entering a new encounter
    #[default]
    Enter,
    /// Editing an existing encounter
    Edit,
}

impl Mode {
    pub fn is_view(&self) -> bool {
        matches!(self, Mode::View)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::View => "view",
            Mode::Enter => "enter",
            Mode::Edit => "edit",
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "view" => Ok(Mode::View),
            "enter" => Ok(Mode::Enter),
            "edit" => Ok(Mode::Edit),
            other => Err(format!("unknown mode '{}' (use view, enter or edit)", other)),
        }
    }
}

/// Registry of widgets for one form instance
#[derive(Debug, Default)]
pub struct RenderContext {
    mode: Mode,
    existing_encounter: Option<Encounter>,
    sequence: u32,
    field_names: HashMap<WidgetId, String>,
    error_widgets: HashMap<WidgetId, WidgetId>,
    errors: HashMap<String, Vec<String>>,
}

impl RenderContext {
    /// Context for entering a new encounter
    pub fn new(mode: Mode) -> Self {
        RenderContext {
            mode,
            ..Default::default()
        }
    }

    /// Context for viewing or editing an existing encounter
    pub fn for_encounter(mode: Mode, encounter: Encounter) -> Self {
        RenderContext {
            mode,
            existing_encounter: Some(encounter),
            ..Default::default()
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn existing_encounter(&self) -> Option<&Encounter> {
        self.existing_encounter.as_ref()
    }

    /// Assign the next field name (`w1`, `w2`, ...) to a widget
    pub fn register_widget(&mut self, widget: WidgetId) -> Result<String, ConfigError> {
        if self.field_names.contains_key(&widget) {
            return Err(ConfigError::WidgetAlreadyRegistered(widget));
        }
        self.sequence += 1;
        let field_name = format!("w{}", self.sequence);
        log::debug!("Registered widget {} as field '{}'", widget, field_name);
        self.field_names.insert(widget, field_name.clone());
        Ok(field_name)
    }

    /// Register an error widget as its own field and pair it with `widget`
    pub fn register_error_widget(
        &mut self,
        widget: WidgetId,
        error_widget: WidgetId,
    ) -> Result<String, ConfigError> {
        let field_name = self.register_widget(error_widget)?;
        self.error_widgets.insert(widget, error_widget);
        Ok(field_name)
    }

    /// Field name of a registered widget
    pub fn field_name(&self, widget: WidgetId) -> Option<&str> {
        self.field_names.get(&widget).map(String::as_str)
    }

    /// Error widget paired with `widget`, if any
    pub fn error_widget_of(&self, widget: WidgetId) -> Option<WidgetId> {
        self.error_widgets.get(&widget).copied()
    }

    /// Field name under which errors for `widget` are reported
    pub fn error_field_name(&self, widget: WidgetId) -> Option<&str> {
        self.error_widget_of(widget).and_then(|e| self.field_name(e))
    }

    pub fn registered_count(&self) -> usize {
        self.field_names.len()
    }

    /// Remember validation errors so error widgets show them on re-render
    pub fn record_errors(&mut self, errors: &[FieldError]) {
        self.errors.clear();
        for error in errors {
            self.errors
                .entry(error.field.clone())
                .or_default()
                .push(error.message.clone());
        }
    }

    pub fn errors_for(&self, field_name: &str) -> &[String] {
        self.errors.get(field_name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Drop recorded errors and switch the encounter being edited
    ///
    /// Field names stay as assigned.
    pub fn reset_for_encounter(&mut self, mode: Mode, encounter: Option<Encounter>) {
        self.mode = mode;
        self.existing_encounter = encounter;
        self.errors.clear();
    }
}
