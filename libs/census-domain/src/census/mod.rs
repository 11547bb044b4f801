//! Census domain module
//!
//! Countries, the people that belong to them, and the services that keep
//! every person attached to an existing country.

mod country_service;
mod entity;
mod error;
mod ids;
mod person_service;

pub use country_service::CountryService;
pub use entity::{
    Country, CountryDraft, NewPerson, Person, PersonDetails, PersonDraft, NAME_MAX_LEN,
};
pub use error::{CensusError, EntityKind, Result};
pub use ids::{CountryId, PersonId};
pub use person_service::PersonService;
