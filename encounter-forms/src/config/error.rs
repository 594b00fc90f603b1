//! Fatal configuration errors raised while building a form element

use crate::form::WidgetId;

/// Error building a form element from its configuration
///
/// These are author mistakes in the form definition (or a broken lookup
/// service), never end-user input problems. Element construction is aborted.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// An explicit person identifier did not resolve
    PersonNotFound(String),
    /// An explicit role name did not resolve
    RoleNotFound(String),
    /// An explicit location identifier did not resolve
    LocationNotFound(String),
    /// The provider default did not resolve to a person
    InvalidDefaultProvider(String),
    /// `default="currentuser"` was requested without an authenticated user
    NoAuthenticatedUser,
    /// A parameter had a value of the wrong shape
    InvalidParameter { key: String, expected: &'static str },
    /// The same widget was registered twice with one render context
    WidgetAlreadyRegistered(WidgetId),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::PersonNotFound(id) => write!(f, "Cannot find person: {}", id),
            ConfigError::RoleNotFound(name) => write!(f, "Cannot find role: {}", name),
            ConfigError::LocationNotFound(id) => write!(f, "Cannot find location: {}", id),
            ConfigError::InvalidDefaultProvider(value) => {
                write!(f, "Invalid default provider specified for encounter: {}", value)
            }
            ConfigError::NoAuthenticatedUser => {
                write!(f, "Default provider 'currentuser' requires an authenticated user")
            }
            ConfigError::InvalidParameter { key, expected } => {
                write!(f, "Parameter '{}' must be {}", key, expected)
            }
            ConfigError::WidgetAlreadyRegistered(id) => {
                write!(f, "Widget {} is already registered", id)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
