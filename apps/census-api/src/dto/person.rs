//! DTOs for person endpoints

use census_domain::census::{CountryId, PersonDetails, PersonDraft};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::country::CountryResponse;

/// Reference to an existing country by id
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CountryRef {
    #[schema(example = 1)]
    pub id: Option<i64>,
}

/// Request body for creating or replacing a person
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({"name": "Ana", "age": 30, "country": {"id": 1}}))]
pub struct PersonRequest {
    #[schema(max_length = 100)]
    pub name: String,
    pub age: Option<i32>,
    /// Country the person belongs to; its id is required
    pub country: Option<CountryRef>,
}

impl From<PersonRequest> for PersonDraft {
    fn from(request: PersonRequest) -> Self {
        let country_id = request.country.and_then(|c| c.id).map(CountryId::new);
        PersonDraft::new(request.name, request.age, country_id)
    }
}

/// A person with the country it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PersonResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Ana")]
    pub name: String,
    #[schema(example = 30)]
    pub age: Option<i32>,
    pub country: CountryResponse,
}

impl From<PersonDetails> for PersonResponse {
    fn from(person: PersonDetails) -> Self {
        Self {
            id: person.id.get(),
            name: person.name,
            age: person.age,
            country: person.country.into(),
        }
    }
}
