// Collaborator services
//
// The form element never reaches for global state. Everything it needs from
// the outside world (who exists, how to word a message, what time it is)
// comes in through the traits below, bundled in `FormServices`.

pub mod directory;
pub mod lookup;
pub mod messages;

pub use directory::{DirectoryFile, InMemoryDirectory};
pub use messages::{MessageBundle, message_keys};

use chrono::NaiveDateTime;

use crate::domain::{Location, Person, Role, User};

/// Domain lookups the element needs while building its widgets
pub trait LookupService {
    /// Resolve a person by id, uuid or username
    fn find_person(&self, identifier: &str) -> Option<Person>;
    /// Resolve a location by id, uuid or name
    fn find_location(&self, identifier: &str) -> Option<Location>;
    fn find_role(&self, name: &str) -> Option<Role>;
    fn users_with_role(&self, role: &Role) -> Vec<User>;
    fn all_users(&self) -> Vec<User>;
    fn all_locations(&self) -> Vec<Location>;
    /// The user the current request runs as
    fn authenticated_user(&self) -> Option<User>;
}

/// Turns message keys into user-facing text
pub trait MessageSource {
    fn translate(&self, key: &str) -> String;
}

/// Source of "now" for future-date checks
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// A clock stuck at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Everything an element borrows from its surroundings for one request
#[derive(Clone, Copy)]
pub struct FormServices<'a> {
    pub lookup: &'a dyn LookupService,
    pub messages: &'a dyn MessageSource,
    pub clock: &'a dyn Clock,
}

impl<'a> FormServices<'a> {
    pub fn new(
        lookup: &'a dyn LookupService,
        messages: &'a dyn MessageSource,
        clock: &'a dyn Clock,
    ) -> Self {
        FormServices { lookup, messages, clock }
    }
}

impl std::fmt::Debug for FormServices<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormServices")
            .field("now", &self.clock.now())
            .finish_non_exhaustive()
    }
}
