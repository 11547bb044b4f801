//! Country service - CRUD on countries plus the delete-blocking rule

use tracing::{debug, info, warn};

use super::{CensusError, Country, CountryDraft, CountryId, Result};
use crate::ports::{CountryRepository, PersonRepository};

/// Service for managing countries
///
/// Business rules:
/// - Names are unique; storage enforces this and the service does not pre-check
/// - A country cannot be deleted while any person references it
///
/// The person repository is only read, to count the people attached to a
/// country before deleting it.
pub struct CountryService<C, P> {
    countries: C,
    people: P,
}

impl<C, P> CountryService<C, P>
where
    C: CountryRepository,
    P: PersonRepository,
{
    /// Create a new CountryService over the given repositories
    pub fn new(countries: C, people: P) -> Self {
        Self { countries, people }
    }

    /// List every country, in storage order
    pub async fn list_all(&self) -> Result<Vec<Country>> {
        let countries = self.countries.find_all().await?;
        debug!(count = countries.len(), "Fetched countries");
        Ok(countries)
    }

    /// Fetch a country by id
    pub async fn get_by_id(&self, id: CountryId) -> Result<Option<Country>> {
        let country = self.countries.find_by_id(id).await?;
        match &country {
            Some(country) => debug!(country_id = %id, name = %country.name, "Country found"),
            None => warn!(country_id = %id, "Country not found"),
        }
        Ok(country)
    }

    /// Create a country; storage assigns the id
    ///
    /// # Errors
    ///
    /// - `CensusError::ConstraintViolation` if the name is already taken
    /// - `CensusError::StorageFailure` if the storage operation fails
    pub async fn create(&self, draft: CountryDraft) -> Result<Country> {
        info!(name = %draft.name, "Creating country");
        let country = self.countries.insert(&draft).await?;
        info!(country_id = %country.id, name = %country.name, "Country created");
        Ok(country)
    }

    /// Rename an existing country
    ///
    /// # Errors
    ///
    /// - `CensusError::NotFound` if no country has this id
    /// - `CensusError::ConstraintViolation` if the new name is already taken
    pub async fn update(&self, id: CountryId, patch: CountryDraft) -> Result<Country> {
        info!(country_id = %id, name = %patch.name, "Updating country");

        let mut existing = self.countries.find_by_id(id).await?.ok_or_else(|| {
            warn!(country_id = %id, "Update failed: country not found");
            CensusError::country_not_found(id)
        })?;

        existing.name = patch.name;

        // The row can disappear between the read and the write
        let updated = self
            .countries
            .update(&existing)
            .await?
            .ok_or_else(|| CensusError::country_not_found(id))?;

        info!(country_id = %updated.id, name = %updated.name, "Country updated");
        Ok(updated)
    }

    /// Delete a country that has no people
    ///
    /// People are checked first, so a blocked delete reports `Conflict` even
    /// when the id would otherwise be unknown.
    ///
    /// # Errors
    ///
    /// - `CensusError::Conflict` if people still reference the country
    /// - `CensusError::NotFound` if no country has this id
    pub async fn delete(&self, id: CountryId) -> Result<()> {
        info!(country_id = %id, "Deleting country");

        let associated = self.people.find_by_country(id).await?;
        if !associated.is_empty() {
            warn!(
                country_id = %id,
                people = associated.len(),
                "Country has associated people, delete cancelled"
            );
            return Err(CensusError::Conflict {
                country_id: id,
                people: associated.len(),
            });
        }

        if !self.countries.exists(id).await? {
            warn!(country_id = %id, "Delete failed: country not found");
            return Err(CensusError::country_not_found(id));
        }

        if !self.countries.delete(id).await? {
            return Err(CensusError::country_not_found(id));
        }

        info!(country_id = %id, "Country deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::census::{NewPerson, PersonId};
    use crate::storage::InMemoryRepository;

    fn service(repo: &InMemoryRepository) -> CountryService<InMemoryRepository, InMemoryRepository> {
        CountryService::new(repo.clone(), repo.clone())
    }

    async fn add_person(repo: &InMemoryRepository, country_id: CountryId) -> PersonId {
        let person = NewPerson {
            name: "Ana".to_string(),
            age: Some(30),
            country_id,
        };
        PersonRepository::insert(repo, &person).await.unwrap().id
    }

    #[tokio::test]
    async fn test_create_then_get_returns_equal_record() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);

        let created = service.create(CountryDraft::new("Chile")).await.unwrap();
        let fetched = service.get_by_id(created.id).await.unwrap();

        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_create_duplicate_name_fails() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);

        service.create(CountryDraft::new("Chile")).await.unwrap();
        let result = service.create(CountryDraft::new("Chile")).await;

        assert!(matches!(
            result.unwrap_err(),
            CensusError::ConstraintViolation(_)
        ));
        assert_eq!(service.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_absent() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);

        let fetched = service.get_by_id(CountryId::new(99)).await.unwrap();

        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn test_update_overwrites_name_only() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);

        let created = service.create(CountryDraft::new("Chile")).await.unwrap();
        let updated = service
            .update(created.id, CountryDraft::new("Peru"))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Peru");
        assert_eq!(
            service.get_by_id(created.id).await.unwrap().unwrap().name,
            "Peru"
        );
    }

    #[tokio::test]
    async fn test_update_to_taken_name_keeps_original() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);

        service.create(CountryDraft::new("Chile")).await.unwrap();
        let peru = service.create(CountryDraft::new("Peru")).await.unwrap();

        let err = service
            .update(peru.id, CountryDraft::new("Chile"))
            .await
            .unwrap_err();

        assert!(matches!(err, CensusError::ConstraintViolation(_)));
        assert_eq!(service.get_by_id(peru.id).await.unwrap(), Some(peru));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);

        let result = service.update(CountryId::new(5), CountryDraft::new("Peru")).await;

        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_without_people_succeeds() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);

        let created = service.create(CountryDraft::new("Chile")).await.unwrap();
        service.delete(created.id).await.unwrap();

        assert!(service.get_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_with_people_is_blocked() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);

        let chile = service.create(CountryDraft::new("Chile")).await.unwrap();
        let ana = add_person(&repo, chile.id).await;

        let err = service.delete(chile.id).await.unwrap_err();

        assert!(matches!(
            &err,
            CensusError::Conflict { country_id, people: 1 } if *country_id == chile.id
        ));
        assert!(err.to_string().contains("associated people"));

        // Nothing was removed
        assert_eq!(service.get_by_id(chile.id).await.unwrap(), Some(chile.clone()));
        let ana = PersonRepository::find_by_id(&repo, ana).await.unwrap().unwrap();
        assert_eq!(ana.country, chile);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);

        let err = service.delete(CountryId::new(42)).await.unwrap_err();

        assert!(err.is_not_found());
    }
}
