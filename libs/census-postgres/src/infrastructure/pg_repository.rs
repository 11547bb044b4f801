//! PostgreSQL Repository Implementation
//!
//! This module implements the `CountryRepository` and `PersonRepository`
//! ports on top of a `sqlx` PostgreSQL pool and converts database errors to
//! domain errors.

use std::future::Future;

use census_domain::{
    census::{
        CensusError, Country, CountryDraft, CountryId, NewPerson, Person, PersonDetails, PersonId,
        Result,
    },
    ports::{CountryRepository, PersonRepository},
};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};
use tracing::{debug, error, info, instrument, warn};

/// PostgreSQL SQLSTATE codes reported as constraint violations
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const NOT_NULL_VIOLATION: &str = "23502";
const STRING_TOO_LONG: &str = "22001";

const PERSON_DETAILS_SELECT: &str = "SELECT p.id, p.name, p.age, p.country_id, c.name AS country_name \
     FROM people p JOIN countries c ON c.id = p.country_id";

#[derive(FromRow)]
struct CountryRow {
    id: i64,
    name: String,
}

impl From<CountryRow> for Country {
    fn from(row: CountryRow) -> Self {
        Self {
            id: CountryId::new(row.id),
            name: row.name,
        }
    }
}

#[derive(FromRow)]
struct PersonRow {
    id: i64,
    name: String,
    age: Option<i32>,
    country_id: i64,
}

impl From<PersonRow> for Person {
    fn from(row: PersonRow) -> Self {
        Self {
            id: PersonId::new(row.id),
            name: row.name,
            age: row.age,
            country_id: CountryId::new(row.country_id),
        }
    }
}

#[derive(FromRow)]
struct PersonDetailsRow {
    id: i64,
    name: String,
    age: Option<i32>,
    country_id: i64,
    country_name: String,
}

impl From<PersonDetailsRow> for PersonDetails {
    fn from(row: PersonDetailsRow) -> Self {
        Self {
            id: PersonId::new(row.id),
            name: row.name,
            age: row.age,
            country: Country {
                id: CountryId::new(row.country_id),
                name: row.country_name,
            },
        }
    }
}

/// PostgreSQL-based implementation of both storage ports
///
/// Cloning is cheap: clones share the same connection pool.
///
/// ## Error Handling
///
/// Unique, foreign key, not-null and length violations become
/// `CensusError::ConstraintViolation`; every other `sqlx` error becomes
/// `CensusError::StorageFailure`.
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    /// Wrap an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use census_postgres::PgRepository;
    ///
    /// # async fn example() -> Result<(), sqlx::Error> {
    /// let repo = PgRepository::connect("postgres://localhost/census", 5).await?;
    /// census_postgres::ensure_schema(repo.pool()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(database_url: &str, max_connections: u32) -> std::result::Result<Self, sqlx::Error> {
        info!(max_connections, "Connecting to PostgreSQL");
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Get the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Translate a `sqlx` error into a domain error
fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> CensusError {
    if let sqlx::Error::Database(db_err) = &err {
        let code = db_err.code();
        if matches!(
            code.as_deref(),
            Some(UNIQUE_VIOLATION | FOREIGN_KEY_VIOLATION | NOT_NULL_VIOLATION | STRING_TOO_LONG)
        ) {
            warn!(
                operation,
                code = ?code,
                constraint = ?db_err.constraint(),
                "Constraint violation"
            );
            return CensusError::constraint_violation(db_err.message().to_string());
        }
    }

    error!(operation, error = ?err, "Database operation failed");
    CensusError::storage_failure(format!("{operation} failed: {err}"))
}

impl CountryRepository for PgRepository {
    #[instrument(skip(self))]
    fn find_all(&self) -> impl Future<Output = Result<Vec<Country>>> + Send {
        let pool = self.pool.clone();

        async move {
            let rows = sqlx::query_as::<_, CountryRow>("SELECT id, name FROM countries ORDER BY id")
                .fetch_all(&pool)
                .await
                .map_err(|e| map_sqlx_error("list countries", e))?;
            debug!(count = rows.len(), "Loaded countries");
            Ok(rows.into_iter().map(Country::from).collect())
        }
    }

    #[instrument(skip(self, id), fields(country_id = %id))]
    fn find_by_id(&self, id: CountryId) -> impl Future<Output = Result<Option<Country>>> + Send {
        let pool = self.pool.clone();

        async move {
            let row = sqlx::query_as::<_, CountryRow>("SELECT id, name FROM countries WHERE id = $1")
                .bind(id.get())
                .fetch_optional(&pool)
                .await
                .map_err(|e| map_sqlx_error("find country", e))?;
            Ok(row.map(Country::from))
        }
    }

    #[instrument(skip(self, id), fields(country_id = %id))]
    fn exists(&self, id: CountryId) -> impl Future<Output = Result<bool>> + Send {
        let pool = self.pool.clone();

        async move {
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM countries WHERE id = $1)")
                .bind(id.get())
                .fetch_one(&pool)
                .await
                .map_err(|e| map_sqlx_error("check country", e))
        }
    }

    #[instrument(skip(self, country), fields(name = %country.name))]
    fn insert(&self, country: &CountryDraft) -> impl Future<Output = Result<Country>> + Send {
        let pool = self.pool.clone();
        let name = country.name.clone();

        async move {
            let row = sqlx::query_as::<_, CountryRow>(
                "INSERT INTO countries (name) VALUES ($1) RETURNING id, name",
            )
            .bind(&name)
            .fetch_one(&pool)
            .await
            .map_err(|e| map_sqlx_error("insert country", e))?;
            debug!(country_id = row.id, "Inserted country row");
            Ok(row.into())
        }
    }

    #[instrument(skip(self, country), fields(country_id = %country.id))]
    fn update(&self, country: &Country) -> impl Future<Output = Result<Option<Country>>> + Send {
        let pool = self.pool.clone();
        let country = country.clone();

        async move {
            let row = sqlx::query_as::<_, CountryRow>(
                "UPDATE countries SET name = $2 WHERE id = $1 RETURNING id, name",
            )
            .bind(country.id.get())
            .bind(&country.name)
            .fetch_optional(&pool)
            .await
            .map_err(|e| map_sqlx_error("update country", e))?;
            Ok(row.map(Country::from))
        }
    }

    #[instrument(skip(self, id), fields(country_id = %id))]
    fn delete(&self, id: CountryId) -> impl Future<Output = Result<bool>> + Send {
        let pool = self.pool.clone();

        async move {
            let result = sqlx::query("DELETE FROM countries WHERE id = $1")
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(|e| map_sqlx_error("delete country", e))?;
            Ok(result.rows_affected() > 0)
        }
    }
}

impl PersonRepository for PgRepository {
    #[instrument(skip(self))]
    fn find_all(&self) -> impl Future<Output = Result<Vec<PersonDetails>>> + Send {
        let pool = self.pool.clone();

        async move {
            let query = format!("{PERSON_DETAILS_SELECT} ORDER BY p.id");
            let rows = sqlx::query_as::<_, PersonDetailsRow>(&query)
                .fetch_all(&pool)
                .await
                .map_err(|e| map_sqlx_error("list people", e))?;
            debug!(count = rows.len(), "Loaded people");
            Ok(rows.into_iter().map(PersonDetails::from).collect())
        }
    }

    #[instrument(skip(self, id), fields(person_id = %id))]
    fn find_by_id(
        &self,
        id: PersonId,
    ) -> impl Future<Output = Result<Option<PersonDetails>>> + Send {
        let pool = self.pool.clone();

        async move {
            let query = format!("{PERSON_DETAILS_SELECT} WHERE p.id = $1");
            let row = sqlx::query_as::<_, PersonDetailsRow>(&query)
                .bind(id.get())
                .fetch_optional(&pool)
                .await
                .map_err(|e| map_sqlx_error("find person", e))?;
            Ok(row.map(PersonDetails::from))
        }
    }

    #[instrument(skip(self, country_id), fields(country_id = %country_id))]
    fn find_by_country(
        &self,
        country_id: CountryId,
    ) -> impl Future<Output = Result<Vec<Person>>> + Send {
        let pool = self.pool.clone();

        async move {
            let rows = sqlx::query_as::<_, PersonRow>(
                "SELECT id, name, age, country_id FROM people WHERE country_id = $1 ORDER BY id",
            )
            .bind(country_id.get())
            .fetch_all(&pool)
            .await
            .map_err(|e| map_sqlx_error("list people by country", e))?;
            Ok(rows.into_iter().map(Person::from).collect())
        }
    }

    #[instrument(skip(self, id), fields(person_id = %id))]
    fn exists(&self, id: PersonId) -> impl Future<Output = Result<bool>> + Send {
        let pool = self.pool.clone();

        async move {
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM people WHERE id = $1)")
                .bind(id.get())
                .fetch_one(&pool)
                .await
                .map_err(|e| map_sqlx_error("check person", e))
        }
    }

    #[instrument(skip(self, person), fields(country_id = %person.country_id))]
    fn insert(&self, person: &NewPerson) -> impl Future<Output = Result<Person>> + Send {
        let pool = self.pool.clone();
        let person = person.clone();

        async move {
            let row = sqlx::query_as::<_, PersonRow>(
                "INSERT INTO people (name, age, country_id) VALUES ($1, $2, $3) \
                 RETURNING id, name, age, country_id",
            )
            .bind(&person.name)
            .bind(person.age)
            .bind(person.country_id.get())
            .fetch_one(&pool)
            .await
            .map_err(|e| map_sqlx_error("insert person", e))?;
            debug!(person_id = row.id, "Inserted person row");
            Ok(row.into())
        }
    }

    #[instrument(skip(self, person), fields(person_id = %person.id))]
    fn update(&self, person: &Person) -> impl Future<Output = Result<Option<Person>>> + Send {
        let pool = self.pool.clone();
        let person = person.clone();

        async move {
            let row = sqlx::query_as::<_, PersonRow>(
                "UPDATE people SET name = $2, age = $3, country_id = $4 WHERE id = $1 \
                 RETURNING id, name, age, country_id",
            )
            .bind(person.id.get())
            .bind(&person.name)
            .bind(person.age)
            .bind(person.country_id.get())
            .fetch_optional(&pool)
            .await
            .map_err(|e| map_sqlx_error("update person", e))?;
            Ok(row.map(Person::from))
        }
    }

    #[instrument(skip(self, id), fields(person_id = %id))]
    fn delete(&self, id: PersonId) -> impl Future<Output = Result<bool>> + Send {
        let pool = self.pool.clone();

        async move {
            let result = sqlx::query("DELETE FROM people WHERE id = $1")
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(|e| map_sqlx_error("delete person", e))?;
            Ok(result.rows_affected() > 0)
        }
    }
}
