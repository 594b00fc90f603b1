use chrono::NaiveTime;

use crate::form::{Parameters, RenderContext, WidgetId};
use crate::services::message_keys;

use super::{ConversionError, Widget, display_value, field_name, submitted};

const DISPLAY_FORMAT: &str = "%H:%M";

/// Time-of-day picker
#[derive(Debug)]
pub struct TimeWidget {
    id: WidgetId,
    initial: Option<NaiveTime>,
}

impl Default for TimeWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeWidget {
    pub fn new() -> Self {
        TimeWidget {
            id: WidgetId::next(),
            initial: None,
        }
    }

    pub fn set_initial_value(&mut self, value: Option<NaiveTime>) {
        self.initial = value;
    }

    pub fn initial_value(&self) -> Option<NaiveTime> {
        self.initial
    }

    /// Parse `HH:MM` or `HH:MM:SS`
    pub fn parse(raw: &str) -> Result<NaiveTime, ConversionError> {
        let trimmed = raw.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
            .map_err(|_| ConversionError::new(message_keys::INVALID_TIME, trimmed))
    }
}

impl Widget for TimeWidget {
    type Value = NaiveTime;

    fn id(&self) -> WidgetId {
        self.id
    }

    fn render(&self, ctx: &RenderContext) -> String {
        let formatted = self.initial.map(|t| t.format(DISPLAY_FORMAT).to_string());

        if ctx.mode().is_view() {
            return formatted.map(|t| display_value(&t)).unwrap_or_default();
        }

        let name = field_name(ctx, self.id);
        format!(
            "<input type=\"time\" id=\"{name}\" name=\"{name}\" value=\"{}\"/>",
            formatted.unwrap_or_default()
        )
    }

    fn value(&self, ctx: &RenderContext, params: &dyn Parameters) -> Result<Option<NaiveTime>, ConversionError> {
        submitted(ctx, self.id, params).map(Self::parse).transpose()
    }
}
