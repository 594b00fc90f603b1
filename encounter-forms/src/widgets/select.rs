//! Drop-down choice over a fixed option list

use crate::form::{Parameters, RenderContext, WidgetId};
use crate::services::message_keys;

use super::{ConversionError, Widget, display_value, escape_html, field_name, submitted};

/// Something that can appear as an `<option>`
pub trait SelectOption: Clone {
    /// Submitted value identifying the option
    fn option_value(&self) -> String;
    /// Text shown to the user
    fn option_label(&self) -> String;
}

/// Single-choice widget
///
/// Options and the initial selection are set while the owning element is
/// being built. Submitted values are matched against the option list only.
#[derive(Debug)]
pub struct SelectWidget<T> {
    id: WidgetId,
    initial: Option<T>,
    options: Vec<T>,
    placeholder: String,
}

impl<T: SelectOption> SelectWidget<T> {
    pub fn new() -> Self {
        SelectWidget {
            id: WidgetId::next(),
            initial: None,
            options: Vec::new(),
            placeholder: String::new(),
        }
    }

    pub fn set_initial_value(&mut self, value: Option<T>) {
        self.initial = value;
    }

    pub fn initial_value(&self) -> Option<&T> {
        self.initial.as_ref()
    }

    pub fn set_options(&mut self, options: Vec<T>) {
        self.options = options;
    }

    pub fn options(&self) -> &[T] {
        &self.options
    }

    /// Label of the leading empty option (shown with a trailing "...")
    pub fn set_placeholder(&mut self, text: impl Into<String>) {
        self.placeholder = text.into();
    }

    fn is_selected(&self, option: &T) -> bool {
        self.initial
            .as_ref()
            .is_some_and(|selected| selected.option_value() == option.option_value())
    }
}

impl<T: SelectOption> Default for SelectWidget<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SelectOption> Widget for SelectWidget<T> {
    type Value = T;

    fn id(&self) -> WidgetId {
        self.id
    }

    fn render(&self, ctx: &RenderContext) -> String {
        if ctx.mode().is_view() {
            return match &self.initial {
                Some(selected) => display_value(&selected.option_label()),
                None => String::new(),
            };
        }

        let name = field_name(ctx, self.id);
        let mut html = format!("<select name=\"{name}\" id=\"{name}\">");
        html.push_str("\n<option value=\"\">");
        html.push_str(&escape_html(&self.placeholder));
        html.push_str("...</option>");

        for option in &self.options {
            html.push_str("\n<option");
            if self.is_selected(option) {
                html.push_str(" selected=\"true\"");
            }
            html.push_str(&format!(
                " value=\"{}\">{}</option>",
                escape_html(&option.option_value()),
                escape_html(&option.option_label())
            ));
        }

        html.push_str("</select>");
        html
    }

    fn value(&self, ctx: &RenderContext, params: &dyn Parameters) -> Result<Option<T>, ConversionError> {
        let Some(raw) = submitted(ctx, self.id, params) else {
            return Ok(None);
        };

        self.options
            .iter()
            .find(|o| o.option_value() == raw)
            .cloned()
            .map(Some)
            .ok_or_else(|| ConversionError::new(message_keys::INVALID_OPTION, raw))
    }
}
