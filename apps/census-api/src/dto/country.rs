//! DTOs for country endpoints

use census_domain::census::{Country, CountryDraft};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for creating or renaming a country
#[derive(Debug, Deserialize, ToSchema)]
pub struct CountryRequest {
    /// Country name, unique across all countries
    #[schema(example = "Chile", max_length = 100)]
    pub name: String,
}

impl From<CountryRequest> for CountryDraft {
    fn from(request: CountryRequest) -> Self {
        CountryDraft::new(request.name)
    }
}

/// A country as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CountryResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Chile")]
    pub name: String,
}

impl From<Country> for CountryResponse {
    fn from(country: Country) -> Self {
        Self {
            id: country.id.get(),
            name: country.name,
        }
    }
}
