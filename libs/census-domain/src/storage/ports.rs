//! Ports (trait definitions) for storage
//!
//! The domain defines what it needs from a relational store; adapters such
//! as the PostgreSQL repository provide it.
//!
//! ## Static Dispatch
//!
//! We use native Rust async traits with `impl Future` return types instead of
//! `async_trait` to ensure zero-cost abstractions and static dispatch.

use std::future::Future;

use crate::census::{
    Country, CountryDraft, CountryId, NewPerson, Person, PersonDetails, PersonId, Result,
};

/// Port for the `countries` table
///
/// Implementations must:
/// - Assign ids on insert
/// - Enforce name uniqueness, reporting violations as
///   `CensusError::ConstraintViolation`
/// - Convert any other infrastructure error to `CensusError::StorageFailure`
pub trait CountryRepository: Send + Sync {
    /// Fetch every country
    fn find_all(&self) -> impl Future<Output = Result<Vec<Country>>> + Send;

    /// Fetch one country by primary key
    fn find_by_id(&self, id: CountryId) -> impl Future<Output = Result<Option<Country>>> + Send;

    /// Check whether a country row exists
    fn exists(&self, id: CountryId) -> impl Future<Output = Result<bool>> + Send;

    /// Insert a new country and return it with its assigned id
    fn insert(&self, country: &CountryDraft) -> impl Future<Output = Result<Country>> + Send;

    /// Persist the fields of an existing country
    ///
    /// Returns `None` when the row no longer exists.
    fn update(&self, country: &Country) -> impl Future<Output = Result<Option<Country>>> + Send;

    /// Delete a country by primary key
    ///
    /// Returns `true` if a row was removed.
    fn delete(&self, id: CountryId) -> impl Future<Output = Result<bool>> + Send;
}

/// Port for the `people` table
///
/// Reads that return [`PersonDetails`] resolve the referenced country in the
/// same call (a join in relational stores).
pub trait PersonRepository: Send + Sync {
    /// Fetch every person with its country
    fn find_all(&self) -> impl Future<Output = Result<Vec<PersonDetails>>> + Send;

    /// Fetch one person with its country
    fn find_by_id(
        &self,
        id: PersonId,
    ) -> impl Future<Output = Result<Option<PersonDetails>>> + Send;

    /// Fetch the stored people that reference the given country
    fn find_by_country(&self, country_id: CountryId)
        -> impl Future<Output = Result<Vec<Person>>> + Send;

    /// Check whether a person row exists
    fn exists(&self, id: PersonId) -> impl Future<Output = Result<bool>> + Send;

    /// Insert a new person and return it with its assigned id
    ///
    /// A `country_id` with no matching country is a
    /// `CensusError::ConstraintViolation`.
    fn insert(&self, person: &NewPerson) -> impl Future<Output = Result<Person>> + Send;

    /// Persist the fields of an existing person
    ///
    /// Returns `None` when the row no longer exists.
    fn update(&self, person: &Person) -> impl Future<Output = Result<Option<Person>>> + Send;

    /// Delete a person by primary key
    ///
    /// Returns `true` if a row was removed.
    fn delete(&self, id: PersonId) -> impl Future<Output = Result<bool>> + Send;
}
