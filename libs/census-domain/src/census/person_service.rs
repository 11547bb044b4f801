//! Person service - CRUD on people, keeping each person attached to an
//! existing country

use tracing::{debug, info, warn};

use super::{
    CensusError, Country, CountryId, NewPerson, PersonDetails, PersonDraft, PersonId, Result,
};
use crate::ports::{CountryRepository, PersonRepository};

/// Service for managing people
///
/// Business rules:
/// - Every person references exactly one country, which must exist when the
///   person is created or updated
/// - Updates replace name, age and country as a whole; a missing age clears it
pub struct PersonService<P, C> {
    people: P,
    countries: C,
}

impl<P, C> PersonService<P, C>
where
    P: PersonRepository,
    C: CountryRepository,
{
    /// Create a new PersonService over the given repositories
    pub fn new(people: P, countries: C) -> Self {
        Self { people, countries }
    }

    /// List every person with their country
    pub async fn list_all(&self) -> Result<Vec<PersonDetails>> {
        let people = self.people.find_all().await?;
        debug!(count = people.len(), "Fetched people");
        Ok(people)
    }

    /// Fetch a person with their country
    pub async fn get_by_id(&self, id: PersonId) -> Result<Option<PersonDetails>> {
        let person = self.people.find_by_id(id).await?;
        match &person {
            Some(person) => debug!(person_id = %id, name = %person.name, "Person found"),
            None => warn!(person_id = %id, "Person not found"),
        }
        Ok(person)
    }

    /// Create a person in an existing country
    ///
    /// # Errors
    ///
    /// - `CensusError::InvalidInput` if the draft has no country id
    /// - `CensusError::NotFound` if the country does not exist; nothing is written
    pub async fn create(&self, draft: PersonDraft) -> Result<PersonDetails> {
        info!(name = %draft.name, "Creating person");

        let country_id = draft.country_id.ok_or_else(|| {
            warn!("Country id is missing, person not created");
            CensusError::invalid_input("country id must not be null to create a person")
        })?;
        let country = self.resolve_country(country_id).await?;

        let person = self
            .people
            .insert(&NewPerson {
                name: draft.name,
                age: draft.age,
                country_id: country.id,
            })
            .await?;

        info!(person_id = %person.id, name = %person.name, country_id = %country.id, "Person created");
        Ok(person.with_country(country))
    }

    /// Replace the name, age and country of an existing person
    ///
    /// # Errors
    ///
    /// - `CensusError::NotFound` if the person or the new country does not exist
    /// - `CensusError::InvalidInput` if the draft has no country id
    pub async fn update(&self, id: PersonId, draft: PersonDraft) -> Result<PersonDetails> {
        info!(person_id = %id, name = %draft.name, "Updating person");

        let mut existing = self
            .people
            .find_by_id(id)
            .await?
            .ok_or_else(|| {
                warn!(person_id = %id, "Update failed: person not found");
                CensusError::person_not_found(id)
            })?
            .into_person();

        existing.name = draft.name;
        existing.age = draft.age;

        let country_id = draft.country_id.ok_or_else(|| {
            warn!(person_id = %id, "Country id is missing, person not updated");
            CensusError::invalid_input("country id must not be null to update a person")
        })?;
        let country = self.resolve_country(country_id).await?;
        existing.country_id = country.id;

        let updated = self
            .people
            .update(&existing)
            .await?
            .ok_or_else(|| CensusError::person_not_found(id))?;

        info!(person_id = %updated.id, country_id = %country.id, "Person updated");
        Ok(updated.with_country(country))
    }

    /// Delete a person
    ///
    /// # Errors
    ///
    /// Returns `CensusError::NotFound` if no person has this id
    pub async fn delete(&self, id: PersonId) -> Result<()> {
        info!(person_id = %id, "Deleting person");

        if !self.people.exists(id).await? {
            warn!(person_id = %id, "Delete failed: person not found");
            return Err(CensusError::person_not_found(id));
        }

        if !self.people.delete(id).await? {
            return Err(CensusError::person_not_found(id));
        }

        info!(person_id = %id, "Person deleted");
        Ok(())
    }

    async fn resolve_country(&self, id: CountryId) -> Result<Country> {
        self.countries.find_by_id(id).await?.ok_or_else(|| {
            warn!(country_id = %id, "Referenced country not found");
            CensusError::country_not_found(id)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::census::{CountryDraft, EntityKind};
    use crate::storage::InMemoryRepository;

    fn service(repo: &InMemoryRepository) -> PersonService<InMemoryRepository, InMemoryRepository> {
        PersonService::new(repo.clone(), repo.clone())
    }

    async fn add_country(repo: &InMemoryRepository, name: &str) -> Country {
        CountryRepository::insert(repo, &CountryDraft::new(name))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_attaches_full_country() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);
        let chile = add_country(&repo, "Chile").await;

        let ana = service
            .create(PersonDraft::new("Ana", Some(30), Some(chile.id)))
            .await
            .unwrap();

        assert_eq!(ana.id, PersonId::new(1));
        assert_eq!(ana.age, Some(30));
        assert_eq!(ana.country, chile);
        assert_eq!(service.get_by_id(ana.id).await.unwrap(), Some(ana));
    }

    #[tokio::test]
    async fn test_create_without_country_id_is_invalid() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);

        let err = service
            .create(PersonDraft::new("Ana", Some(30), None))
            .await
            .unwrap_err();

        assert!(matches!(err, CensusError::InvalidInput(_)));
        assert!(service.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_with_unknown_country_writes_nothing() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);

        let err = service
            .create(PersonDraft::new("Ana", None, Some(CountryId::new(9))))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CensusError::NotFound {
                entity: EntityKind::Country,
                id: 9
            }
        ));
        assert!(service.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_reassigns_country() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);
        let chile = add_country(&repo, "Chile").await;
        let peru = add_country(&repo, "Peru").await;

        let ana = service
            .create(PersonDraft::new("Ana", Some(30), Some(chile.id)))
            .await
            .unwrap();
        let updated = service
            .update(ana.id, PersonDraft::new("Ana Maria", Some(31), Some(peru.id)))
            .await
            .unwrap();

        assert_eq!(updated.id, ana.id);
        assert_eq!(updated.name, "Ana Maria");
        assert_eq!(updated.country, peru);

        let fetched = service.get_by_id(ana.id).await.unwrap().unwrap();
        assert_eq!(fetched.country.id, peru.id);
    }

    #[tokio::test]
    async fn test_update_clears_missing_age() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);
        let chile = add_country(&repo, "Chile").await;

        let ana = service
            .create(PersonDraft::new("Ana", Some(30), Some(chile.id)))
            .await
            .unwrap();
        let updated = service
            .update(ana.id, PersonDraft::new("Ana", None, Some(chile.id)))
            .await
            .unwrap();

        assert_eq!(updated.age, None);
    }

    #[tokio::test]
    async fn test_update_unknown_person_is_not_found() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);
        let chile = add_country(&repo, "Chile").await;

        let err = service
            .update(PersonId::new(3), PersonDraft::new("Ana", None, Some(chile.id)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CensusError::NotFound {
                entity: EntityKind::Person,
                id: 3
            }
        ));
    }

    #[tokio::test]
    async fn test_update_with_unknown_country_keeps_record() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);
        let chile = add_country(&repo, "Chile").await;

        let ana = service
            .create(PersonDraft::new("Ana", Some(30), Some(chile.id)))
            .await
            .unwrap();
        let err = service
            .update(ana.id, PersonDraft::new("Bea", None, Some(CountryId::new(77))))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(service.get_by_id(ana.id).await.unwrap(), Some(ana));
    }

    #[tokio::test]
    async fn test_update_without_country_id_is_invalid() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);
        let chile = add_country(&repo, "Chile").await;

        let ana = service
            .create(PersonDraft::new("Ana", Some(30), Some(chile.id)))
            .await
            .unwrap();
        let err = service
            .update(ana.id, PersonDraft::new("Ana", Some(30), None))
            .await
            .unwrap_err();

        assert!(matches!(err, CensusError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_delete_person() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);
        let chile = add_country(&repo, "Chile").await;

        let ana = service
            .create(PersonDraft::new("Ana", Some(30), Some(chile.id)))
            .await
            .unwrap();
        service.delete(ana.id).await.unwrap();

        assert!(service.get_by_id(ana.id).await.unwrap().is_none());
        assert!(service.delete(ana.id).await.unwrap_err().is_not_found());
    }
}
