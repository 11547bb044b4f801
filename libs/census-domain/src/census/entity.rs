//! Domain entities for countries and people
//!
//! A Person stores an explicit foreign key to its Country. When a person is
//! presented to callers, the country is resolved and embedded, giving a
//! [`PersonDetails`].

use serde::{Deserialize, Serialize};

use crate::census::ids::{CountryId, PersonId};

/// Maximum length of a country or person name, enforced by storage
pub const NAME_MAX_LEN: usize = 100;

/// A persisted country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: CountryId,
    /// Unique across all countries
    pub name: String,
}

/// Caller-supplied country fields, used for both create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryDraft {
    pub name: String,
}

impl CountryDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A persisted person, as stored: the country is referenced by id only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub age: Option<i32>,
    pub country_id: CountryId,
}

impl Person {
    /// Attach the resolved country for presentation
    ///
    /// The caller is responsible for passing the country whose id matches
    /// `self.country_id`.
    pub fn with_country(self, country: Country) -> PersonDetails {
        debug_assert_eq!(self.country_id, country.id);
        PersonDetails {
            id: self.id,
            name: self.name,
            age: self.age,
            country,
        }
    }
}

/// A person together with the country it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonDetails {
    pub id: PersonId,
    pub name: String,
    pub age: Option<i32>,
    pub country: Country,
}

impl PersonDetails {
    /// Drop the embedded country, keeping only its id
    pub fn into_person(self) -> Person {
        Person {
            id: self.id,
            name: self.name,
            age: self.age,
            country_id: self.country.id,
        }
    }
}

/// Caller-supplied person fields for create and update
///
/// `country_id` is optional here because callers may omit it; the service
/// rejects a draft without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonDraft {
    pub name: String,
    pub age: Option<i32>,
    pub country_id: Option<CountryId>,
}

impl PersonDraft {
    pub fn new(name: impl Into<String>, age: Option<i32>, country_id: Option<CountryId>) -> Self {
        Self {
            name: name.into(),
            age,
            country_id,
        }
    }
}

/// A validated person ready to be inserted; storage assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
    pub age: Option<i32>,
    pub country_id: CountryId,
}
