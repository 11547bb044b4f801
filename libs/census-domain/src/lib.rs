//! # Census Domain Layer
//!
//! This crate contains the business logic and domain models for the Census
//! service: countries, the people who belong to them, and the one
//! referential-integrity rule between the two. It follows hexagonal
//! architecture principles:
//!
//! - **Entities**: Core domain models (Country, Person)
//! - **Ports**: Trait definitions for storage (CountryRepository, PersonRepository)
//! - **Services**: Business logic orchestration (CountryService, PersonService)
//!
//! ## Architecture
//!
//! This layer has NO dependencies on infrastructure concerns (SQL, HTTP, etc.).
//! Storage is expressed as traits (ports) implemented by adapter crates.
//!
//! ## Example
//!
//! ```rust
//! use census_domain::census::{CountryDraft, CountryService};
//! use census_domain::ports::{CountryRepository, PersonRepository};
//!
//! async fn example<C: CountryRepository, P: PersonRepository>(service: CountryService<C, P>) {
//!     let chile = service.create(CountryDraft::new("Chile")).await.unwrap();
//!     println!("Created country {} with id {}", chile.name, chile.id);
//! }
//! ```

pub mod census;
pub mod storage;

pub use storage::ports;

// Re-export commonly used types
pub use census::{
    CensusError, Country, CountryDraft, CountryId, CountryService, Person, PersonDetails,
    PersonDraft, PersonId, PersonService,
};
pub use ports::{CountryRepository, PersonRepository};
