//! Form widgets
//!
//! A widget renders itself as markup and reads its typed value back out of a
//! submitted request. Widgets know nothing about records; the element that
//! owns them decides where values go.

mod date;
mod error;
mod location;
mod person;
mod select;
mod time;

pub use date::DateWidget;
pub use error::ErrorWidget;
pub use location::LocationWidget;
pub use person::PersonWidget;
pub use select::{SelectOption, SelectWidget};
pub use time::TimeWidget;

use crate::form::{Parameters, RenderContext, WidgetId};

/// Render/extract capability shared by every widget
pub trait Widget {
    /// Typed value the widget produces
    type Value;

    fn id(&self) -> WidgetId;

    /// Markup for the widget in the context's mode
    fn render(&self, ctx: &RenderContext) -> String;

    /// Read the submitted value
    ///
    /// `Ok(None)` when the parameter is missing or blank. A present but
    /// unparsable value is a `ConversionError`; the caller decides whether that
    /// is a validation failure.
    fn value(&self, ctx: &RenderContext, params: &dyn Parameters) -> Result<Option<Self::Value>, ConversionError>;
}

/// A submitted value that could not be converted to the widget's type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionError {
    /// Message key describing the problem
    pub key: &'static str,
    /// The raw submitted text
    pub value: String,
}

impl ConversionError {
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        ConversionError {
            key,
            value: value.into(),
        }
    }
}

impl std::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot convert '{}' ({})", self.value, self.key)
    }
}

impl std::error::Error for ConversionError {}

/// Field name of a widget, empty if it was never registered
pub(crate) fn field_name(ctx: &RenderContext, id: WidgetId) -> &str {
    match ctx.field_name(id) {
        Some(name) => name,
        None => {
            log::warn!("Widget {} used without being registered", id);
            ""
        }
    }
}

/// Trimmed, non-blank submitted text for a widget
pub(crate) fn submitted<'a>(ctx: &RenderContext, id: WidgetId, params: &'a dyn Parameters) -> Option<&'a str> {
    let name = ctx.field_name(id)?;
    params
        .parameter(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Escape text for use in element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Read-only rendering of a value
pub fn display_value(text: &str) -> String {
    format!("<span class=\"value\">{}</span>", escape_html(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Mode, Submission};

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">O'Neil & co</a>"#),
            "&lt;a href=&quot;x&quot;&gt;O&#39;Neil &amp; co&lt;/a&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value("A & B"), "<span class=\"value\">A &amp; B</span>");
    }

    #[test]
    fn test_submitted_trims_and_skips_blank() {
        let mut ctx = RenderContext::new(Mode::Enter);
        let a = WidgetId::next();
        let b = WidgetId::next();
        let unregistered = WidgetId::next();
        ctx.register_widget(a).unwrap();
        ctx.register_widget(b).unwrap();

        let params = Submission::new().with("w1", "  x ").with("w2", "   ");
        assert_eq!(submitted(&ctx, a, &params), Some("x"));
        assert_eq!(submitted(&ctx, b, &params), None);
        assert_eq!(submitted(&ctx, unregistered, &params), None);
        assert_eq!(field_name(&ctx, unregistered), "");
    }
}
