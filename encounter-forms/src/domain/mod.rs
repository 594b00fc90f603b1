//! Clinical records touched by the encounter details element
//!
//! These are plain data carriers. Persistence belongs to whoever owns the
//! session; the form element only reads them while building widgets and
//! writes onto an `Encounter` at commit time.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person known to the system (patients, providers, users)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    #[serde(default = "Uuid::new_v4")]
    pub uuid: Uuid,
    pub given_name: String,
    pub family_name: String,
}

impl Person {
    pub fn new(id: i64, given_name: impl Into<String>, family_name: impl Into<String>) -> Self {
        Person {
            id,
            uuid: Uuid::new_v4(),
            given_name: given_name.into(),
            family_name: family_name.into(),
        }
    }

    /// Name as shown in pickers and read-only views
    pub fn display_name(&self) -> String {
        match (self.given_name.is_empty(), self.family_name.is_empty()) {
            (false, false) => format!("{} {}", self.given_name, self.family_name),
            (false, true) => self.given_name.clone(),
            (true, false) => self.family_name.clone(),
            (true, true) => format!("#{}", self.id),
        }
    }
}

/// A named role users can hold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Role { name: name.into() }
    }
}

/// A system account, always backed by a person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub person: Person,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl User {
    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.iter().any(|r| r.eq_ignore_ascii_case(&role.name))
    }
}

/// A place where encounters happen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    #[serde(default = "Uuid::new_v4")]
    pub uuid: Uuid,
    pub name: String,
}

impl Location {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Location {
            id,
            uuid: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// The encounter being entered or edited
///
/// Owned by the caller's session. Several form elements on one page write
/// onto the same encounter, one after another.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Encounter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default = "Uuid::new_v4")]
    pub uuid: Uuid,
    #[serde(default)]
    pub encounter_datetime: Option<NaiveDateTime>,
    #[serde(default)]
    pub provider: Option<Person>,
    #[serde(default)]
    pub location: Option<Location>,
}

impl Encounter {
    /// A fresh, unsaved encounter
    pub fn new() -> Self {
        Encounter {
            uuid: Uuid::new_v4(),
            ..Default::default()
        }
    }
}
