use crate::domain::Person;

use super::{SelectOption, SelectWidget};

/// Provider picker
pub type PersonWidget = SelectWidget<Person>;

impl SelectOption for Person {
    fn option_value(&self) -> String {
        self.id.to_string()
    }

    fn option_label(&self) -> String {
        self.display_name()
    }
}
