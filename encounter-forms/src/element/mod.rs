//! Form elements
//!
//! An element owns a set of widgets and drives them through one
//! render → validate → commit round trip.

mod encounter_details;

pub use encounter_details::EncounterDetailElement;

use crate::domain::Encounter;
use crate::form::{FieldError, Parameters, RenderContext};
use crate::services::FormServices;
use crate::widgets::ConversionError;

/// Three-phase protocol every element on a page follows
pub trait FormElement {
    /// Markup for the element's widgets
    fn generate_html(&self, ctx: &RenderContext) -> String;

    /// Check a submission without touching any record
    ///
    /// Returns every failure found, not just the first.
    fn validate(
        &self,
        ctx: &RenderContext,
        params: &dyn Parameters,
        services: &FormServices<'_>,
    ) -> Vec<FieldError>;

    /// Write submitted values onto `encounter`
    ///
    /// Only meaningful after `validate` returned no errors for the same
    /// submission; nothing is re-checked here.
    fn commit(
        &self,
        ctx: &RenderContext,
        encounter: &mut Encounter,
        params: &dyn Parameters,
    ) -> Result<(), ConversionError>;
}
