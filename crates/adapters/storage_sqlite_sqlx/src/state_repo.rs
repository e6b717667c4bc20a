//! `SQLite` implementation of [`StateRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use estore_app::ports::StateRepository;
use estore_domain::error::{ConflictError, EstoreError};
use estore_domain::geo::State;
use estore_domain::id::StateId;

use crate::decode;
use crate::error::{StorageError, is_unique_violation, violated_column};

/// Wrapper for converting database rows into domain [`State`].
struct Wrapper(State);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<State> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let code: String = row.try_get("code")?;

        Ok(Self(State {
            id: decode::id(&id)?,
            name,
            code,
        }))
    }
}

const INSERT: &str = "INSERT INTO states (id, name, code) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM states WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM states ORDER BY name";
const SELECT_BY_NAME: &str = "SELECT * FROM states WHERE name = ?";
const SELECT_BY_CODE: &str = "SELECT * FROM states WHERE code = ?";

/// `SQLite`-backed state repository.
pub struct SqliteStateRepository {
    pool: SqlitePool,
}

impl SqliteStateRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find_one(
        &self,
        query: &'static str,
        value: String,
    ) -> Result<Option<State>, EstoreError> {
        let row: Option<Wrapper> = sqlx::query_as(query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }
}

fn conflict(state: &State, err: sqlx::Error) -> EstoreError {
    if !is_unique_violation(&err) {
        return StorageError::from(err).into();
    }
    let (field, value) = match violated_column(&err).as_deref() {
        Some("code") => ("code", state.code.clone()),
        _ => ("name", state.name.clone()),
    };
    ConflictError {
        entity: "State",
        field,
        value,
    }
    .into()
}

impl StateRepository for SqliteStateRepository {
    fn create(&self, state: State) -> impl Future<Output = Result<State, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(state.id.to_string())
                .bind(&state.name)
                .bind(&state.code)
                .execute(&pool)
                .await
                .map_err(|err| conflict(&state, err))?;

            Ok(state)
        }
    }

    fn get_by_id(
        &self,
        id: StateId,
    ) -> impl Future<Output = Result<Option<State>, EstoreError>> + Send {
        self.find_one(SELECT_BY_ID, id.to_string())
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<State>, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<State>, EstoreError>> + Send {
        self.find_one(SELECT_BY_NAME, name.to_string())
    }

    fn find_by_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<Option<State>, EstoreError>> + Send {
        self.find_one(SELECT_BY_CODE, code.to_string())
    }
}
