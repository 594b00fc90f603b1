use chrono::NaiveDate;

use crate::form::{Parameters, RenderContext, WidgetId};
use crate::services::message_keys;

use super::{ConversionError, Widget, display_value, field_name, submitted};

/// Format of the editable control's value and of submissions
const INPUT_FORMAT: &str = "%Y-%m-%d";
/// Format shown in view mode (also accepted on submit)
const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Calendar-day picker
#[derive(Debug)]
pub struct DateWidget {
    id: WidgetId,
    initial: Option<NaiveDate>,
}

impl Default for DateWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl DateWidget {
    pub fn new() -> Self {
        DateWidget {
            id: WidgetId::next(),
            initial: None,
        }
    }

    pub fn set_initial_value(&mut self, value: Option<NaiveDate>) {
        self.initial = value;
    }

    pub fn initial_value(&self) -> Option<NaiveDate> {
        self.initial
    }

    /// Parse a submitted date
    pub fn parse(raw: &str) -> Result<NaiveDate, ConversionError> {
        let trimmed = raw.trim();
        NaiveDate::parse_from_str(trimmed, INPUT_FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(trimmed, DISPLAY_FORMAT))
            .map_err(|_| ConversionError::new(message_keys::INVALID_DATE, trimmed))
    }
}

impl Widget for DateWidget {
    type Value = NaiveDate;

    fn id(&self) -> WidgetId {
        self.id
    }

    fn render(&self, ctx: &RenderContext) -> String {
        if ctx.mode().is_view() {
            return match self.initial {
                Some(date) => display_value(&date.format(DISPLAY_FORMAT).to_string()),
                None => String::new(),
            };
        }

        let name = field_name(ctx, self.id);
        let value = self
            .initial
            .map(|d| d.format(INPUT_FORMAT).to_string())
            .unwrap_or_default();
        format!(
            "<input type=\"date\" id=\"{name}\" name=\"{name}\" size=\"10\" value=\"{value}\"/>"
        )
    }

    fn value(&self, ctx: &RenderContext, params: &dyn Parameters) -> Result<Option<NaiveDate>, ConversionError> {
        submitted(ctx, self.id, params).map(Self::parse).transpose()
    }
}
