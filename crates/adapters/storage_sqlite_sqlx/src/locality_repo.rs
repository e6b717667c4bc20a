//! `SQLite` implementation of [`LocalityRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use estore_app::ports::LocalityRepository;
use estore_domain::error::EstoreError;
use estore_domain::geo::{City, Locality, LocalityPath, State};
use estore_domain::id::{CityId, LocalityId};

use crate::decode;
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Locality`].
struct Wrapper(Locality);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Locality> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let pincode: String = row.try_get("pincode")?;
        let city_id: String = row.try_get("city_id")?;

        Ok(Self(Locality {
            id: decode::id(&id)?,
            name,
            pincode,
            city_id: decode::id(&city_id)?,
        }))
    }
}

/// Row of [`SELECT_PATH`]: one locality joined with its city and state.
struct PathWrapper(LocalityPath);

impl<'r> FromRow<'r, SqliteRow> for PathWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let locality_id: String = row.try_get("locality_id")?;
        let city_id: String = row.try_get("city_id")?;
        let state_id: String = row.try_get("state_id")?;

        let state = State {
            id: decode::id(&state_id)?,
            name: row.try_get("state_name")?,
            code: row.try_get("state_code")?,
        };
        let city = City {
            id: decode::id(&city_id)?,
            name: row.try_get("city_name")?,
            state_id: state.id,
        };
        let locality = Locality {
            id: decode::id(&locality_id)?,
            name: row.try_get("locality_name")?,
            pincode: row.try_get("pincode")?,
            city_id: city.id,
        };

        Ok(Self(LocalityPath {
            locality,
            city,
            state,
        }))
    }
}

const INSERT: &str = "INSERT INTO localities (id, name, pincode, city_id) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM localities WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM localities ORDER BY name";
const SELECT_BY_CITY: &str = "SELECT * FROM localities WHERE city_id = ? ORDER BY name";
const SELECT_PATH: &str = "SELECT l.id AS locality_id, l.name AS locality_name, l.pincode, \
     c.id AS city_id, c.name AS city_name, \
     s.id AS state_id, s.name AS state_name, s.code AS state_code \
     FROM localities l \
     JOIN cities c ON c.id = l.city_id \
     JOIN states s ON s.id = c.state_id \
     WHERE l.id = ?";

/// `SQLite`-backed locality repository.
pub struct SqliteLocalityRepository {
    pool: SqlitePool,
}

impl SqliteLocalityRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl LocalityRepository for SqliteLocalityRepository {
    fn create(
        &self,
        locality: Locality,
    ) -> impl Future<Output = Result<Locality, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(locality.id.to_string())
                .bind(&locality.name)
                .bind(&locality.pincode)
                .bind(locality.city_id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(locality)
        }
    }

    fn get_by_id(
        &self,
        id: LocalityId,
    ) -> impl Future<Output = Result<Option<Locality>, EstoreError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<Locality>, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_by_city(
        &self,
        city_id: CityId,
    ) -> impl Future<Output = Result<Vec<Locality>, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_CITY)
                .bind(city_id.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn get_path(
        &self,
        id: LocalityId,
    ) -> impl Future<Output = Result<Option<LocalityPath>, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<PathWrapper> = sqlx::query_as(SELECT_PATH)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city_repo::SqliteCityRepository;
    use crate::pool::Config;
    use crate::state_repo::SqliteStateRepository;
    use estore_app::ports::{CityRepository, StateRepository};

    async fn setup() -> (SqliteLocalityRepository, CityId) {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        let state = SqliteStateRepository::new(db.pool().clone())
            .create(State::new("Karnataka", "KA").unwrap())
            .await
            .unwrap();
        let city = SqliteCityRepository::new(db.pool().clone())
            .create(City::new("Bengaluru", state.id).unwrap())
            .await
            .unwrap();
        (SqliteLocalityRepository::new(db.pool().clone()), city.id)
    }

    #[tokio::test]
    async fn should_create_and_retrieve_locality_when_valid() {
        let (repo, city_id) = setup().await;
        let locality = Locality::new("Indiranagar", "560038", city_id).unwrap();
        let id = locality.id;

        repo.create(locality).await.unwrap();

        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Indiranagar");
        assert_eq!(fetched.pincode, "560038");
        assert_eq!(fetched.city_id, city_id);
    }

    #[tokio::test]
    async fn should_list_localities_of_city_by_name() {
        let (repo, city_id) = setup().await;
        repo.create(Locality::new("Koramangala", "560034", city_id).unwrap())
            .await
            .unwrap();
        repo.create(Locality::new("Indiranagar", "560038", city_id).unwrap())
            .await
            .unwrap();

        let names: Vec<String> = repo
            .find_by_city(city_id)
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, vec!["Indiranagar", "Koramangala"]);
        assert!(repo.find_by_city(CityId::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_resolve_full_path_for_locality() {
        let (repo, city_id) = setup().await;
        let locality = repo
            .create(Locality::new("Indiranagar", "560038", city_id).unwrap())
            .await
            .unwrap();

        let path = repo.get_path(locality.id).await.unwrap().unwrap();
        assert_eq!(path.locality.name, "Indiranagar");
        assert_eq!(path.city.name, "Bengaluru");
        assert_eq!(path.state.name, "Karnataka");
        assert_eq!(path.state.code, "KA");
    }

    #[tokio::test]
    async fn should_return_no_path_for_unknown_locality() {
        let (repo, _) = setup().await;
        assert!(repo.get_path(LocalityId::new()).await.unwrap().is_none());
    }
}
