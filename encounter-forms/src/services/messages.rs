//! Message bundle with English defaults

use std::collections::BTreeMap;

use super::MessageSource;

/// Message keys used by the widgets and the encounter details element
pub mod message_keys {
    pub const REQUIRED: &str = "htmlformentry.error.required";
    pub const CANNOT_BE_IN_FUTURE: &str = "htmlformentry.error.cannotBeInFuture";
    pub const INVALID_DATE: &str = "htmlformentry.error.invalidDate";
    pub const INVALID_TIME: &str = "htmlformentry.error.invalidTime";
    pub const INVALID_OPTION: &str = "htmlformentry.error.invalidOption";
    pub const CHOOSE: &str = "general.choose";
}

const DEFAULTS: &[(&str, &str)] = &[
    (message_keys::REQUIRED, "Required"),
    (message_keys::CANNOT_BE_IN_FUTURE, "Cannot be in the future"),
    (message_keys::INVALID_DATE, "Invalid date"),
    (message_keys::INVALID_TIME, "Invalid time"),
    (message_keys::INVALID_OPTION, "Not one of the available choices"),
    (message_keys::CHOOSE, "Choose"),
];

/// Key → text table; unknown keys translate to themselves
#[derive(Debug, Clone)]
pub struct MessageBundle {
    messages: BTreeMap<String, String>,
}

impl Default for MessageBundle {
    fn default() -> Self {
        MessageBundle {
            messages: DEFAULTS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl MessageBundle {
    /// Bundle without any defaults
    pub fn empty() -> Self {
        MessageBundle {
            messages: BTreeMap::new(),
        }
    }

    /// Replace or add messages
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in overrides {
            self.messages.insert(key.into(), value.into());
        }
        self
    }

    /// Parse a flat TOML table of overrides
    pub fn parse_overrides(text: &str) -> Result<BTreeMap<String, String>, toml::de::Error> {
        toml::from_str(text)
    }
}

impl MessageSource for MessageBundle {
    fn translate(&self, key: &str) -> String {
        match self.messages.get(key) {
            Some(text) => text.clone(),
            None => {
                log::debug!("No message for key '{}'", key);
                key.to_string()
            }
        }
    }
}
