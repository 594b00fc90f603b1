use crate::form::{RenderContext, WidgetId};

use super::{escape_html, field_name};

/// Shows validation messages next to the widget it is paired with
///
/// Registered as a field of its own; the field name is what `FieldError`s
/// point at. Renders nothing in view mode.
#[derive(Debug)]
pub struct ErrorWidget {
    id: WidgetId,
}

impl Default for ErrorWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorWidget {
    pub fn new() -> Self {
        ErrorWidget { id: WidgetId::next() }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn render(&self, ctx: &RenderContext) -> String {
        if ctx.mode().is_view() {
            return String::new();
        }

        let name = field_name(ctx, self.id);
        let messages = ctx.errors_for(name);
        if messages.is_empty() {
            return format!("<span class=\"error\" style=\"display: none\" id=\"{}\"></span>", name);
        }

        let text = messages
            .iter()
            .map(|m| escape_html(m))
            .collect::<Vec<_>>()
            .join("; ");
        format!("<span class=\"error\" id=\"{}\">{}</span>", name, text)
    }
}
