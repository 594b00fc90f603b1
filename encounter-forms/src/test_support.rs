//! Shared fixtures for unit tests

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{Location, Person};
use crate::services::{FixedClock, FormServices, InMemoryDirectory, MessageBundle};

pub(crate) fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, 0))
        .expect("valid fixture timestamp")
}

/// Providers John Doe (1) and Ann Baker (2), nurse Nina Nurse (4), Carl
/// Clerk (3) without an account, Zoe Visitor (5) with no roles; locations
/// 3, 7 and 9; logged in as `jdoe`
pub(crate) fn directory() -> InMemoryDirectory {
    let mut dir = InMemoryDirectory::new();
    dir.add_role("Provider").add_role("Nurse");

    dir.add_person(Person::new(1, "John", "Doe"))
        .add_person(Person::new(2, "Ann", "Baker"))
        .add_person(Person::new(3, "Carl", "Clerk"))
        .add_person(Person::new(4, "Nina", "Nurse"))
        .add_person(Person::new(5, "Zoe", "Visitor"));

    dir.add_user(10, "jdoe", 1, &["Provider"]).expect("fixture user");
    dir.add_user(11, "abaker", 2, &["Provider"]).expect("fixture user");
    dir.add_user(12, "nnurse", 4, &["Nurse"]).expect("fixture user");
    dir.add_user(13, "zvisitor", 5, &[]).expect("fixture user");

    dir.add_location(Location::new(3, "Outpatient Clinic"))
        .add_location(Location::new(7, "Ward 7"))
        .add_location(Location::new(9, "Emergency"));

    dir.authenticate("jdoe");
    dir
}

/// Directory, default messages and a clock fixed at 2024-06-01 12:00
pub(crate) struct Fixture {
    pub directory: InMemoryDirectory,
    pub messages: MessageBundle,
    pub clock: FixedClock,
}

impl Fixture {
    pub fn new() -> Self {
        Fixture {
            directory: directory(),
            messages: MessageBundle::default(),
            clock: FixedClock(ts(2024, 6, 1, 12, 0)),
        }
    }

    pub fn services(&self) -> FormServices<'_> {
        FormServices::new(&self.directory, &self.messages, &self.clock)
    }
}
