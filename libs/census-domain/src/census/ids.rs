use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a Country row
///
/// Assigned by storage on insert and never changed afterwards. The newtype
/// keeps country ids from being mixed up with person ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryId(i64);

impl CountryId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw integer value
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CountryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CountryId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<CountryId> for i64 {
    fn from(id: CountryId) -> Self {
        id.0
    }
}

/// Identifier of a Person row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(i64);

impl PersonId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw integer value
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PersonId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<PersonId> for i64 {
    fn from(id: PersonId) -> Self {
        id.0
    }
}
