use crate::domain::Location;

use super::{SelectOption, SelectWidget};

/// Location picker
pub type LocationWidget = SelectWidget<Location>;

impl SelectOption for Location {
    fn option_value(&self) -> String {
        self.id.to_string()
    }

    fn option_label(&self) -> String {
        self.name.clone()
    }
}
