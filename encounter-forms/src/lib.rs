//! Encounter details form element
//!
//! Renders, validates and commits an encounter's date/time, provider and
//! location as part of a larger dynamic form. The element composes its
//! widgets from configuration, resolves their initial values from the
//! encounter being edited or from configured defaults, and writes accepted
//! values back onto the session's encounter.

pub mod cli;
pub mod config;
pub mod domain;
pub mod element;
pub mod form;
pub mod services;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{ConfigError, ElementParameters, FormDefinition, ParamValue};
pub use domain::{Encounter, Location, Person, Role, User};
pub use element::{EncounterDetailElement, FormElement};
pub use form::{FieldError, FormSession, Mode, Parameters, RenderContext, Submission, SubmitOutcome};
pub use services::{Clock, FormServices, LookupService, MessageSource, SystemClock};
pub use widgets::{ConversionError, Widget};
