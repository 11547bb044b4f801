//! Domain errors for country and person operations
//!
//! These are business-level failures. Storage adapters translate their own
//! errors into [`CensusError::ConstraintViolation`] or
//! [`CensusError::StorageFailure`] so no driver types leak into this crate.

use std::fmt;

use thiserror::Error;

use crate::census::ids::CountryId;

/// Kind of record an id refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Country,
    Person,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Country => f.write_str("Country"),
            Self::Person => f.write_str("Person"),
        }
    }
}

/// Errors returned by the country and person services
#[derive(Error, Debug)]
pub enum CensusError {
    /// No record with this id
    #[error("{entity} with id {id} not found")]
    NotFound { entity: EntityKind, id: i64 },

    /// The request is missing a required value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The country still has people referencing it
    #[error(
        "Cannot delete country with id {country_id} because it has {people} associated people. \
         Delete the people first"
    )]
    Conflict { country_id: CountryId, people: usize },

    /// Storage rejected the write (unique, foreign key, not-null or length constraint)
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Storage backend failed for any other reason
    #[error("Storage operation failed: {0}")]
    StorageFailure(String),
}

impl CensusError {
    /// Create a not found error for a country id
    pub fn country_not_found(id: impl Into<i64>) -> Self {
        Self::NotFound {
            entity: EntityKind::Country,
            id: id.into(),
        }
    }

    /// Create a not found error for a person id
    pub fn person_not_found(id: impl Into<i64>) -> Self {
        Self::NotFound {
            entity: EntityKind::Person,
            id: id.into(),
        }
    }

    /// Create an invalid input error with a message
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a constraint violation error with a message
    pub fn constraint_violation(msg: impl Into<String>) -> Self {
        Self::ConstraintViolation(msg.into())
    }

    /// Create a storage failure error with a message
    pub fn storage_failure(msg: impl Into<String>) -> Self {
        Self::StorageFailure(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type alias for census operations
pub type Result<T> = std::result::Result<T, CensusError>;
