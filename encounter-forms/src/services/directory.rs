//! In-memory lookup service
//!
//! Backs the CLI and the tests. Loaded from a TOML directory file:
//!
//! ```toml
//! authenticated = "admin"
//!
//! [[roles]]
//! name = "Provider"
//!
//! [[persons]]
//! id = 1
//! given_name = "Ada"
//! family_name = "Lovelace"
//!
//! [[users]]
//! id = 1
//! username = "admin"
//! person = 1
//! roles = ["Provider"]
//!
//! [[locations]]
//! id = 1
//! name = "Outpatient Clinic"
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;
use uuid::Uuid;

use crate::config::ConfigError;
use crate::domain::{Location, Person, Role, User};

use super::LookupService;

/// A user row in a directory file; `person` refers to a person id
#[derive(Debug, Clone, Deserialize)]
pub struct UserEntry {
    pub id: i64,
    pub username: String,
    pub person: i64,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// On-disk shape of a directory
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryFile {
    #[serde(default)]
    pub authenticated: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub users: Vec<UserEntry>,
    #[serde(default)]
    pub locations: Vec<Location>,
}

impl DirectoryFile {
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Lookup service over data held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    persons: BTreeMap<i64, Person>,
    users: BTreeMap<i64, User>,
    roles: Vec<Role>,
    locations: BTreeMap<i64, Location>,
    authenticated: Option<String>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a parsed directory file
    ///
    /// A user pointing at an unknown person is rejected.
    pub fn from_file(file: DirectoryFile) -> Result<Self, ConfigError> {
        let mut directory = InMemoryDirectory::new();

        for role in file.roles {
            directory.add_role(role.name);
        }
        for person in file.persons {
            directory.persons.insert(person.id, person);
        }
        for entry in file.users {
            let person = directory
                .persons
                .get(&entry.person)
                .cloned()
                .ok_or_else(|| ConfigError::PersonNotFound(entry.person.to_string()))?;
            directory.users.insert(
                entry.id,
                User {
                    id: entry.id,
                    username: entry.username,
                    person,
                    roles: entry.roles,
                },
            );
        }
        for location in file.locations {
            directory.locations.insert(location.id, location);
        }
        directory.authenticated = file.authenticated;

        log::debug!(
            "Directory loaded: {} persons, {} users, {} roles, {} locations",
            directory.persons.len(),
            directory.users.len(),
            directory.roles.len(),
            directory.locations.len()
        );

        Ok(directory)
    }

    pub fn add_person(&mut self, person: Person) -> &mut Self {
        self.persons.insert(person.id, person);
        self
    }

    pub fn add_role(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        if !self.roles.iter().any(|r| r.name == name) {
            self.roles.push(Role::new(name));
        }
        self
    }

    /// Add a user account for an existing person
    pub fn add_user(
        &mut self,
        id: i64,
        username: impl Into<String>,
        person_id: i64,
        roles: &[&str],
    ) -> Result<&mut Self, ConfigError> {
        let person = self
            .persons
            .get(&person_id)
            .cloned()
            .ok_or_else(|| ConfigError::PersonNotFound(person_id.to_string()))?;
        self.users.insert(
            id,
            User {
                id,
                username: username.into(),
                person,
                roles: roles.iter().map(|r| r.to_string()).collect(),
            },
        );
        Ok(self)
    }

    pub fn add_location(&mut self, location: Location) -> &mut Self {
        self.locations.insert(location.id, location);
        self
    }

    /// Run subsequent lookups as `username`
    pub fn authenticate(&mut self, username: impl Into<String>) -> &mut Self {
        self.authenticated = Some(username.into());
        self
    }

    fn user_by_username(&self, username: &str) -> Option<&User> {
        self.users.values().find(|u| u.username == username)
    }
}

impl LookupService for InMemoryDirectory {
    fn find_person(&self, identifier: &str) -> Option<Person> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return None;
        }

        if let Ok(id) = identifier.parse::<i64>() {
            return self.persons.get(&id).cloned();
        }

        if let Ok(uuid) = Uuid::parse_str(identifier) {
            return self.persons.values().find(|p| p.uuid == uuid).cloned();
        }

        self.user_by_username(identifier).map(|u| u.person.clone())
    }

    fn find_location(&self, identifier: &str) -> Option<Location> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return None;
        }

        if let Ok(id) = identifier.parse::<i64>() {
            return self.locations.get(&id).cloned();
        }

        if let Ok(uuid) = Uuid::parse_str(identifier) {
            return self.locations.values().find(|l| l.uuid == uuid).cloned();
        }

        self.locations
            .values()
            .find(|l| l.name == identifier)
            .cloned()
    }

    fn find_role(&self, name: &str) -> Option<Role> {
        self.roles.iter().find(|r| r.name == name).cloned()
    }

    fn users_with_role(&self, role: &Role) -> Vec<User> {
        self.users.values().filter(|u| u.has_role(role)).cloned().collect()
    }

    fn all_users(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }

    fn all_locations(&self) -> Vec<Location> {
        self.locations.values().cloned().collect()
    }

    fn authenticated_user(&self) -> Option<User> {
        self.authenticated
            .as_deref()
            .and_then(|name| self.user_by_username(name))
            .cloned()
    }
}
