//! One form-entry round trip
//!
//! The session owns the render context, the encounter being built and the
//! elements on the page. Elements commit onto the same encounter one after
//! another, in the order they were added.

use crate::config::ConfigError;
use crate::domain::Encounter;
use crate::element::FormElement;
use crate::services::FormServices;
use crate::widgets::ConversionError;

use super::{FieldError, Mode, Parameters, RenderContext};

/// Result of submitting a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Every element validated and committed
    Accepted,
    /// Nothing was committed; errors are also recorded in the context
    Rejected(Vec<FieldError>),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted)
    }

    pub fn errors(&self) -> &[FieldError] {
        match self {
            SubmitOutcome::Accepted => &[],
            SubmitOutcome::Rejected(errors) => errors,
        }
    }
}

pub struct FormSession {
    context: RenderContext,
    encounter: Encounter,
    elements: Vec<Box<dyn FormElement>>,
}

impl FormSession {
    /// Session for a new encounter
    pub fn enter() -> Self {
        FormSession {
            context: RenderContext::new(Mode::Enter),
            encounter: Encounter::new(),
            elements: Vec::new(),
        }
    }

    /// Session viewing or editing `encounter`
    pub fn for_encounter(mode: Mode, encounter: Encounter) -> Self {
        FormSession {
            context: RenderContext::for_encounter(mode, encounter.clone()),
            encounter,
            elements: Vec::new(),
        }
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// The encounter commits write onto
    pub fn encounter(&self) -> &Encounter {
        &self.encounter
    }

    pub fn into_encounter(self) -> Encounter {
        self.encounter
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Context for building elements by hand; pair with `add_element`
    pub fn context_mut(&mut self) -> &mut RenderContext {
        &mut self.context
    }

    /// Add an element built against this session's context
    pub fn add_element(&mut self, element: impl FormElement + 'static) {
        self.elements.push(Box::new(element));
        log::debug!("Form session now holds {} element(s)", self.elements.len());
    }

    /// Build an element against this session's context and add it
    pub fn build_element<E, F>(&mut self, build: F) -> Result<(), ConfigError>
    where
        E: FormElement + 'static,
        F: FnOnce(&mut RenderContext) -> Result<E, ConfigError>,
    {
        let element = build(&mut self.context)?;
        self.add_element(element);
        Ok(())
    }

    pub fn render(&self) -> String {
        self.elements
            .iter()
            .map(|e| e.generate_html(&self.context))
            .collect()
    }

    /// Validate every element, collecting all errors
    pub fn validate(&self, params: &dyn Parameters, services: &FormServices<'_>) -> Vec<FieldError> {
        self.elements
            .iter()
            .flat_map(|e| e.validate(&self.context, params, services))
            .collect()
    }

    /// Commit every element onto the session's encounter
    ///
    /// Callers must have validated the same submission first.
    pub fn commit(&mut self, params: &dyn Parameters) -> Result<(), ConversionError> {
        for element in &self.elements {
            element.commit(&self.context, &mut self.encounter, params)?;
        }
        Ok(())
    }

    /// Validate, then commit if and only if nothing failed
    pub fn submit(
        &mut self,
        params: &dyn Parameters,
        services: &FormServices<'_>,
    ) -> Result<SubmitOutcome, ConversionError> {
        let errors = self.validate(params, services);
        self.context.record_errors(&errors);

        if !errors.is_empty() {
            log::info!("Submission rejected with {} error(s)", errors.len());
            return Ok(SubmitOutcome::Rejected(errors));
        }

        self.commit(params)?;
        Ok(SubmitOutcome::Accepted)
    }
}

impl std::fmt::Debug for FormSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormSession")
            .field("context", &self.context)
            .field("encounter", &self.encounter)
            .field("elements", &self.elements.len())
            .finish()
    }
}
