//! Application state shared across handlers

use std::sync::Arc;

use census_domain::ports::{CountryRepository, PersonRepository};
use census_domain::{CountryService, PersonService};

/// A storage backend serving both tables
///
/// Implemented for every type that provides both repository ports, such as
/// `PgRepository` in production and `InMemoryRepository` in tests.
pub trait CensusStore: CountryRepository + PersonRepository + Clone + 'static {}

impl<T> CensusStore for T where T: CountryRepository + PersonRepository + Clone + 'static {}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState<S> {
    pub country_service: Arc<CountryService<S, S>>,
    pub person_service: Arc<PersonService<S, S>>,
}

impl<S: CensusStore> AppState<S> {
    /// Build both services over the same store
    pub fn new(store: S) -> Self {
        Self {
            country_service: Arc::new(CountryService::new(store.clone(), store.clone())),
            person_service: Arc::new(PersonService::new(store.clone(), store)),
        }
    }
}
