//! Option-list and default-value resolution
//!
//! Pure helpers on top of a `LookupService`. Every failure here is a
//! configuration error: the identifiers come from the form author, not the
//! person filling in the form.

use crate::config::ConfigError;
use crate::domain::{Location, Person, User};

use super::LookupService;

/// Role whose members are offered as providers when nothing narrower is configured
pub const PROVIDER_ROLE: &str = "Provider";

/// Default-provider token meaning "whoever is logged in"
pub const CURRENT_USER_TOKEN: &str = "currentuser";

/// Where a provider option list came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderSource {
    /// Explicit `persons` list, caller order preserved
    Explicit,
    /// Members of an explicitly named role
    Role(String),
    /// Members of the default provider role
    DefaultRole,
    /// The default role had no members, so every user
    AllUsers,
}

impl ProviderSource {
    /// Lists built from user populations are shown alphabetically
    pub fn is_sorted(&self) -> bool {
        !matches!(self, ProviderSource::Explicit)
    }
}

/// Resolved provider choices
#[derive(Debug, Clone)]
pub struct ProviderOptions {
    pub people: Vec<Person>,
    pub source: ProviderSource,
}

/// Resolve each identifier to a person, keeping order
pub fn resolve_persons(lookup: &dyn LookupService, identifiers: &[String]) -> Result<Vec<Person>, ConfigError> {
    identifiers
        .iter()
        .map(|id| {
            lookup
                .find_person(id)
                .ok_or_else(|| ConfigError::PersonNotFound(id.clone()))
        })
        .collect()
}

/// Resolve each identifier to a location, keeping order
pub fn resolve_locations(lookup: &dyn LookupService, identifiers: &[String]) -> Result<Vec<Location>, ConfigError> {
    identifiers
        .iter()
        .map(|id| {
            lookup
                .find_location(id)
                .ok_or_else(|| ConfigError::LocationNotFound(id.clone()))
        })
        .collect()
}

/// Provider option list: explicit persons, else a named role, else the
/// default provider role, else all users
///
/// Each step is final once it yields anything. A named role that does not
/// exist is an error; a missing default role is not.
pub fn resolve_provider_options(
    lookup: &dyn LookupService,
    persons: Option<&[String]>,
    role: Option<&str>,
) -> Result<ProviderOptions, ConfigError> {
    if let Some(identifiers) = persons {
        let people = resolve_persons(lookup, identifiers)?;
        if !people.is_empty() {
            log::debug!("Provider options: {} explicit persons", people.len());
            return Ok(ProviderOptions {
                people,
                source: ProviderSource::Explicit,
            });
        }
    }

    if let Some(role_name) = role {
        let role = lookup
            .find_role(role_name)
            .ok_or_else(|| ConfigError::RoleNotFound(role_name.to_string()))?;
        let people = persons_of(lookup.users_with_role(&role));
        log::debug!("Provider options: {} users with role '{}'", people.len(), role.name);
        return Ok(ProviderOptions {
            people,
            source: ProviderSource::Role(role.name),
        });
    }

    let default_role_members = lookup
        .find_role(PROVIDER_ROLE)
        .map(|role| lookup.users_with_role(&role))
        .unwrap_or_default();

    if default_role_members.is_empty() {
        let people = persons_of(lookup.all_users());
        log::debug!(
            "Provider options: role '{}' unused, falling back to all {} users",
            PROVIDER_ROLE,
            people.len()
        );
        return Ok(ProviderOptions {
            people,
            source: ProviderSource::AllUsers,
        });
    }

    Ok(ProviderOptions {
        people: persons_of(default_role_members),
        source: ProviderSource::DefaultRole,
    })
}

fn persons_of(users: Vec<User>) -> Vec<Person> {
    let mut people: Vec<Person> = Vec::with_capacity(users.len());
    for user in users {
        // one person can hold several accounts
        if !people.iter().any(|p| p.id == user.person.id) {
            people.push(user.person);
        }
    }
    people
}

/// Resolve an explicit provider default
///
/// `currentuser` (any case) means the authenticated user's person.
pub fn resolve_default_provider(lookup: &dyn LookupService, value: &str) -> Result<Person, ConfigError> {
    if value.eq_ignore_ascii_case(CURRENT_USER_TOKEN) {
        return lookup
            .authenticated_user()
            .map(|u| u.person)
            .ok_or(ConfigError::NoAuthenticatedUser);
    }

    lookup
        .find_person(value)
        .ok_or_else(|| ConfigError::InvalidDefaultProvider(value.to_string()))
}

/// Location choices: the explicit order if given, else every location by name
pub fn resolve_location_options(
    lookup: &dyn LookupService,
    order: Option<&[String]>,
) -> Result<Vec<Location>, ConfigError> {
    match order {
        Some(identifiers) if !identifiers.is_empty() => resolve_locations(lookup, identifiers),
        _ => {
            let mut locations = lookup.all_locations();
            locations.sort_by(|a, b| {
                a.name
                    .to_lowercase()
                    .cmp(&b.name.to_lowercase())
                    .then(a.id.cmp(&b.id))
            });
            Ok(locations)
        }
    }
}

/// Alphabetical by display name, ties broken by id
pub fn sort_by_display_name(people: &mut [Person]) {
    people.sort_by_cached_key(|p| (p.display_name().to_lowercase(), p.id));
}

/// Initial value of a widget
///
/// `existing` is `Some` when an encounter is being edited, carrying that
/// encounter's field (which may itself be empty). An edited encounter always
/// wins, even when its field is empty; otherwise `fallback` supplies the
/// configured default.
pub fn resolve_initial<T, E>(
    existing: Option<Option<T>>,
    fallback: impl FnOnce() -> Result<Option<T>, E>,
) -> Result<Option<T>, E> {
    match existing {
        Some(value) => Ok(value),
        None => fallback(),
    }
}
