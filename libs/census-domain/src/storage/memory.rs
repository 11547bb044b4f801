//! In-memory implementation of both storage ports
//!
//! Behaves like the relational store for the rules the services rely on:
//! ids are assigned sequentially from 1, names fit in `NAME_MAX_LEN`
//! characters, country names are unique, and a person must reference an
//! existing country. Intended for tests.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::census::{
    CensusError, Country, CountryDraft, CountryId, NewPerson, Person, PersonDetails, PersonId,
    Result, NAME_MAX_LEN,
};
use crate::ports::{CountryRepository, PersonRepository};

#[derive(Debug, Default)]
struct Tables {
    countries: BTreeMap<CountryId, Country>,
    people: BTreeMap<PersonId, Person>,
    last_country_id: i64,
    last_person_id: i64,
}

impl Tables {
    fn name_taken(&self, name: &str, except: Option<CountryId>) -> bool {
        self.countries
            .values()
            .any(|c| c.name == name && Some(c.id) != except)
    }

    fn check_name_len(name: &str) -> Result<()> {
        let len = name.chars().count();
        if len > NAME_MAX_LEN {
            return Err(CensusError::constraint_violation(format!(
                "name is {len} characters long, at most {NAME_MAX_LEN} allowed"
            )));
        }
        Ok(())
    }

    fn details(&self, person: &Person) -> Result<PersonDetails> {
        let country = self.countries.get(&person.country_id).cloned().ok_or_else(|| {
            CensusError::storage_failure(format!(
                "person {} references missing country {}",
                person.id, person.country_id
            ))
        })?;
        Ok(person.clone().with_country(country))
    }
}

/// Shared in-memory tables; clones see the same data
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_tables<T>(&self, f: impl FnOnce(&mut Tables) -> Result<T>) -> Result<T> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| CensusError::storage_failure("in-memory tables lock poisoned"))?;
        f(&mut tables)
    }
}

impl CountryRepository for InMemoryRepository {
    fn find_all(&self) -> impl Future<Output = Result<Vec<Country>>> + Send {
        let repo = self.clone();
        async move { repo.with_tables(|t| Ok(t.countries.values().cloned().collect())) }
    }

    fn find_by_id(&self, id: CountryId) -> impl Future<Output = Result<Option<Country>>> + Send {
        let repo = self.clone();
        async move { repo.with_tables(|t| Ok(t.countries.get(&id).cloned())) }
    }

    fn exists(&self, id: CountryId) -> impl Future<Output = Result<bool>> + Send {
        let repo = self.clone();
        async move { repo.with_tables(|t| Ok(t.countries.contains_key(&id))) }
    }

    fn insert(&self, country: &CountryDraft) -> impl Future<Output = Result<Country>> + Send {
        let repo = self.clone();
        let name = country.name.clone();

        async move {
            repo.with_tables(|t| {
                Tables::check_name_len(&name)?;
                if t.name_taken(&name, None) {
                    return Err(CensusError::constraint_violation(format!(
                        "country name '{name}' already exists"
                    )));
                }
                t.last_country_id += 1;
                let country = Country {
                    id: CountryId::new(t.last_country_id),
                    name,
                };
                t.countries.insert(country.id, country.clone());
                Ok(country)
            })
        }
    }

    fn update(&self, country: &Country) -> impl Future<Output = Result<Option<Country>>> + Send {
        let repo = self.clone();
        let country = country.clone();

        async move {
            repo.with_tables(|t| {
                if !t.countries.contains_key(&country.id) {
                    return Ok(None);
                }
                Tables::check_name_len(&country.name)?;
                if t.name_taken(&country.name, Some(country.id)) {
                    return Err(CensusError::constraint_violation(format!(
                        "country name '{}' already exists",
                        country.name
                    )));
                }
                t.countries.insert(country.id, country.clone());
                Ok(Some(country))
            })
        }
    }

    fn delete(&self, id: CountryId) -> impl Future<Output = Result<bool>> + Send {
        let repo = self.clone();

        async move {
            repo.with_tables(|t| {
                if t.people.values().any(|p| p.country_id == id) {
                    return Err(CensusError::constraint_violation(format!(
                        "country {id} is still referenced by people"
                    )));
                }
                Ok(t.countries.remove(&id).is_some())
            })
        }
    }
}

impl PersonRepository for InMemoryRepository {
    fn find_all(&self) -> impl Future<Output = Result<Vec<PersonDetails>>> + Send {
        let repo = self.clone();
        async move { repo.with_tables(|t| t.people.values().map(|p| t.details(p)).collect()) }
    }

    fn find_by_id(
        &self,
        id: PersonId,
    ) -> impl Future<Output = Result<Option<PersonDetails>>> + Send {
        let repo = self.clone();
        async move { repo.with_tables(|t| t.people.get(&id).map(|p| t.details(p)).transpose()) }
    }

    fn find_by_country(
        &self,
        country_id: CountryId,
    ) -> impl Future<Output = Result<Vec<Person>>> + Send {
        let repo = self.clone();

        async move {
            repo.with_tables(|t| {
                Ok(t.people
                    .values()
                    .filter(|p| p.country_id == country_id)
                    .cloned()
                    .collect())
            })
        }
    }

    fn exists(&self, id: PersonId) -> impl Future<Output = Result<bool>> + Send {
        let repo = self.clone();
        async move { repo.with_tables(|t| Ok(t.people.contains_key(&id))) }
    }

    fn insert(&self, person: &NewPerson) -> impl Future<Output = Result<Person>> + Send {
        let repo = self.clone();
        let person = person.clone();

        async move {
            repo.with_tables(|t| {
                Tables::check_name_len(&person.name)?;
                if !t.countries.contains_key(&person.country_id) {
                    return Err(CensusError::constraint_violation(format!(
                        "country {} does not exist",
                        person.country_id
                    )));
                }
                t.last_person_id += 1;
                let person = Person {
                    id: PersonId::new(t.last_person_id),
                    name: person.name,
                    age: person.age,
                    country_id: person.country_id,
                };
                t.people.insert(person.id, person.clone());
                Ok(person)
            })
        }
    }

    fn update(&self, person: &Person) -> impl Future<Output = Result<Option<Person>>> + Send {
        let repo = self.clone();
        let person = person.clone();

        async move {
            repo.with_tables(|t| {
                if !t.people.contains_key(&person.id) {
                    return Ok(None);
                }
                Tables::check_name_len(&person.name)?;
                if !t.countries.contains_key(&person.country_id) {
                    return Err(CensusError::constraint_violation(format!(
                        "country {} does not exist",
                        person.country_id
                    )));
                }
                t.people.insert(person.id, person.clone());
                Ok(Some(person))
            })
        }
    }

    fn delete(&self, id: PersonId) -> impl Future<Output = Result<bool>> + Send {
        let repo = self.clone();
        async move { repo.with_tables(|t| Ok(t.people.remove(&id).is_some())) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_name(len: usize) -> String {
        "x".repeat(len)
    }

    #[tokio::test]
    async fn test_country_name_length_limit() {
        let repo = InMemoryRepository::new();

        let longest = CountryRepository::insert(&repo, &CountryDraft::new(long_name(NAME_MAX_LEN)))
            .await
            .unwrap();
        let err = CountryRepository::insert(&repo, &CountryDraft::new(long_name(NAME_MAX_LEN + 1)))
            .await
            .unwrap_err();
        assert!(matches!(err, CensusError::ConstraintViolation(_)));

        let mut renamed = longest.clone();
        renamed.name = long_name(NAME_MAX_LEN + 1);
        let err = CountryRepository::update(&repo, &renamed).await.unwrap_err();
        assert!(matches!(err, CensusError::ConstraintViolation(_)));

        let stored = CountryRepository::find_all(&repo).await.unwrap();
        assert_eq!(stored, vec![longest]);
    }

    #[tokio::test]
    async fn test_person_name_length_limit() {
        let repo = InMemoryRepository::new();
        let chile = CountryRepository::insert(&repo, &CountryDraft::new("Chile"))
            .await
            .unwrap();

        let err = PersonRepository::insert(
            &repo,
            &NewPerson {
                name: long_name(NAME_MAX_LEN + 1),
                age: None,
                country_id: chile.id,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CensusError::ConstraintViolation(_)));
        assert!(PersonRepository::find_all(&repo).await.unwrap().is_empty());

        let ana = PersonRepository::insert(
            &repo,
            &NewPerson {
                name: "Ana".to_string(),
                age: Some(30),
                country_id: chile.id,
            },
        )
        .await
        .unwrap();
        let mut renamed = ana.clone();
        renamed.name = long_name(NAME_MAX_LEN + 1);
        let err = PersonRepository::update(&repo, &renamed).await.unwrap_err();
        assert!(matches!(err, CensusError::ConstraintViolation(_)));

        let stored = PersonRepository::find_by_id(&repo, ana.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Ana");
    }
}
