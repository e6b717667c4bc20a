//! `SQLite` implementation of [`CityRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use estore_app::ports::CityRepository;
use estore_domain::error::EstoreError;
use estore_domain::geo::City;
use estore_domain::id::{CityId, StateId};

use crate::decode;
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`City`].
struct Wrapper(City);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<City> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let state_id: String = row.try_get("state_id")?;

        Ok(Self(City {
            id: decode::id(&id)?,
            name,
            state_id: decode::id(&state_id)?,
        }))
    }
}

const INSERT: &str = "INSERT INTO cities (id, name, state_id) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM cities WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM cities ORDER BY name";
const SELECT_BY_STATE: &str = "SELECT * FROM cities WHERE state_id = ? ORDER BY name";

/// `SQLite`-backed city repository.
pub struct SqliteCityRepository {
    pool: SqlitePool,
}

impl SqliteCityRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl CityRepository for SqliteCityRepository {
    fn create(&self, city: City) -> impl Future<Output = Result<City, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(city.id.to_string())
                .bind(&city.name)
                .bind(city.state_id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(city)
        }
    }

    fn get_by_id(
        &self,
        id: CityId,
    ) -> impl Future<Output = Result<Option<City>, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<City>, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_by_state(
        &self,
        state_id: StateId,
    ) -> impl Future<Output = Result<Vec<City>, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_STATE)
                .bind(state_id.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use crate::state_repo::SqliteStateRepository;
    use estore_app::ports::StateRepository;
    use estore_domain::geo::State;

    async fn setup() -> (SqliteCityRepository, StateId, StateId) {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        let states = SqliteStateRepository::new(db.pool().clone());
        let karnataka = states
            .create(State::new("Karnataka", "KA").unwrap())
            .await
            .unwrap();
        let maharashtra = states
            .create(State::new("Maharashtra", "MH").unwrap())
            .await
            .unwrap();
        (
            SqliteCityRepository::new(db.pool().clone()),
            karnataka.id,
            maharashtra.id,
        )
    }

    #[tokio::test]
    async fn should_create_and_retrieve_city_when_valid() {
        let (repo, karnataka, _) = setup().await;
        let city = City::new("Bengaluru", karnataka).unwrap();
        let id = city.id;

        repo.create(city).await.unwrap();

        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Bengaluru");
        assert_eq!(fetched.state_id, karnataka);
    }

    #[tokio::test]
    async fn should_filter_cities_by_state() {
        let (repo, karnataka, maharashtra) = setup().await;
        repo.create(City::new("Mysuru", karnataka).unwrap()).await.unwrap();
        repo.create(City::new("Bengaluru", karnataka).unwrap()).await.unwrap();
        repo.create(City::new("Pune", maharashtra).unwrap()).await.unwrap();

        let names: Vec<String> = repo
            .find_by_state(karnataka)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Bengaluru", "Mysuru"]);
        assert_eq!(repo.get_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn should_reject_city_in_unknown_state() {
        let (repo, _, _) = setup().await;
        let result = repo.create(City::new("Nowhere", StateId::new()).unwrap()).await;
        assert!(matches!(result, Err(EstoreError::Storage(_))));
    }
}
